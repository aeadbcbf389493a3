use futures_util::{SinkExt, Stream, StreamExt};
use point_inbox::server::FlipServer;
use std::time::Duration;
use tokio_tungstenite::tungstenite::Message;

async fn next_text<S>(ws: &mut S) -> String
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timed out waiting for reply")
            .expect("stream ended")
            .expect("read error");
        if let Message::Text(text) = msg {
            return text.as_str().to_string();
        }
    }
}

#[tokio::test]
async fn test_server_flips_points_and_reports_errors() {
    let server = FlipServer::bind("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());

    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{}", addr))
        .await
        .unwrap();

    ws.send(Message::Text(r#"{"x":3,"y":4}"#.into())).await.unwrap();
    assert_eq!(next_text(&mut ws).await, r#"{"x":4,"y":3}"#);

    // Binary frames are not answered, so the next reply belongs to the next text frame.
    ws.send(Message::Binary(vec![0u8; 4].into())).await.unwrap();
    ws.send(Message::Text("not json".into())).await.unwrap();
    let reply: serde_json::Value = serde_json::from_str(&next_text(&mut ws).await).unwrap();
    assert!(reply["error"].is_string());

    ws.send(Message::Text(r#"{"x":-7,"y":0}"#.into())).await.unwrap();
    assert_eq!(next_text(&mut ws).await, r#"{"x":0,"y":-7}"#);

    ws.close(None).await.unwrap();
}

#[tokio::test]
async fn test_server_handles_connections_independently() {
    let server = FlipServer::bind("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());

    let url = format!("ws://{}", addr);
    let (mut first, _) = tokio_tungstenite::connect_async(url.as_str()).await.unwrap();
    let (mut second, _) = tokio_tungstenite::connect_async(url.as_str()).await.unwrap();

    second.send(Message::Text(r#"{"x":1,"y":2}"#.into())).await.unwrap();
    first.send(Message::Text(r#"{"x":5,"y":6}"#.into())).await.unwrap();

    assert_eq!(next_text(&mut first).await, r#"{"x":6,"y":5}"#);
    assert_eq!(next_text(&mut second).await, r#"{"x":2,"y":1}"#);
}
