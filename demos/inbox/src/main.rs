use clap::Parser;
use point_inbox::terminal::{USAGE, parse_command};
use point_inbox::config::DEFAULT_ENDPOINT;
use point_inbox::{ClientConfig, Event, EventLoop, Session, WriterSink, bind_inbox_handlers};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Terminal inbox: prints every message from the endpoint and sends x/y pairs.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// WebSocket endpoint to connect to
    #[arg(long, env = "INBOX_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Origin header to send with the handshake
    #[arg(long)]
    origin: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = ClientConfig::new(&args.endpoint)?;
    if let Some(origin) = args.origin {
        config = config.with_origin(origin);
    }

    let mut event_loop = EventLoop::new();
    bind_inbox_handlers(&mut event_loop);

    let mut session = Session::connect(
        &config,
        event_loop.queue(),
        Box::new(WriterSink::new(std::io::stdout())),
    );

    log::info!("Inbox connecting to {}", session.socket().url());

    let queue = event_loop.queue();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_command(&line) {
                    Ok(Some(Event::Shutdown)) => break,
                    Ok(Some(event)) => queue.push(event),
                    Ok(None) => {}
                    Err(message) => eprintln!("{}", message),
                },
                Ok(None) => break,
                Err(e) => {
                    log::error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
        queue.shutdown();
    });

    eprintln!("{}", USAGE);
    event_loop.run(&mut session).await;
    event_loop
        .close_and_wait(&mut session, Duration::from_secs(2))
        .await;

    Ok(())
}
