use serde::{Deserialize, Serialize};

/// Point as the server reads it. Non-integer or missing fields are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn flipped(self) -> Point {
        Point {
            x: self.y,
            y: self.x,
        }
    }
}

#[derive(Serialize)]
struct ErrorReply {
    error: String,
}

/// Reply to one text frame: the flipped point, or `{"error": ...}` when the
/// frame is not a point.
pub fn respond(text: &str) -> String {
    let reply = serde_json::from_str::<Point>(text)
        .map(Point::flipped)
        .and_then(|p| serde_json::to_string(&p));

    match reply {
        Ok(json) => json,
        Err(e) => error_reply(&e.to_string()),
    }
}

fn error_reply(message: &str) -> String {
    serde_json::to_string(&ErrorReply {
        error: message.to_string(),
    })
    .unwrap_or_else(|_| r#"{"error":"unencodable error"}"#.to_string())
}
