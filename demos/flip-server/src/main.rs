use clap::Parser;
use point_inbox::server::{DEFAULT_LISTEN_ADDR, FlipServer};

/// WebSocket server that answers each {"x","y"} point with the coordinates swapped.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Address to listen on
    #[arg(default_value = DEFAULT_LISTEN_ADDR)]
    addr: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let server = FlipServer::bind(&args.addr).await?;
    log::info!("Serving on {}", server.local_addr()?);
    server.run().await?;

    Ok(())
}
