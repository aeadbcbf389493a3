use std::io::Write;

use crate::socket::Payload;

/// Receives every entry appended to a [`DisplayList`].
pub trait RenderSink: Send {
    fn entry_appended(&mut self, list_id: &str, index: usize, text: &str);
}

/// Sink that renders nothing.
pub struct NullSink;

impl RenderSink for NullSink {
    fn entry_appended(&mut self, _list_id: &str, _index: usize, _text: &str) {}
}

/// Writes each entry as a `- <text>` line.
pub struct WriterSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> RenderSink for WriterSink<W> {
    fn entry_appended(&mut self, list_id: &str, _index: usize, text: &str) {
        if let Err(e) = writeln!(self.writer, "- {}", text).and_then(|_| self.writer.flush()) {
            log::warn!("Failed to render entry in {}: {}", list_id, e);
        }
    }
}

/// Ordered, append-only list of rendered entries.
pub struct DisplayList {
    id: String,
    entries: Vec<String>,
    sink: Box<dyn RenderSink>,
}

impl DisplayList {
    pub fn new(id: impl Into<String>, sink: Box<dyn RenderSink>) -> Self {
        Self {
            id: id.into(),
            entries: vec![],
            sink,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Append an entry and return its index.
    pub fn append(&mut self, text: String) -> usize {
        let index = self.entries.len();
        self.sink.entry_appended(&self.id, index, &text);
        self.entries.push(text);
        index
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Render a payload as a JSON string literal.
///
/// serde_json escapes the same characters `JSON.stringify` does. Binary data
/// has no text form and renders as `{}`, like a stringified `Blob`.
pub fn render_payload(payload: &Payload) -> String {
    match payload {
        Payload::Text(text) => {
            serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
        }
        Payload::Binary(_) => "{}".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingSink(Arc<Mutex<Vec<(usize, String)>>>);

    impl RenderSink for RecordingSink {
        fn entry_appended(&mut self, _list_id: &str, index: usize, text: &str) {
            self.0.lock().unwrap().push((index, text.to_string()));
        }
    }

    #[test]
    fn test_render_payload_quotes_text() {
        assert_eq!(render_payload(&"hello".into()), r#""hello""#);
        assert_eq!(render_payload(&r#"{"x":4,"y":3}"#.into()), r#""{\"x\":4,\"y\":3}""#);
        assert_eq!(render_payload(&"".into()), r#""""#);
    }

    #[test]
    fn test_render_payload_escapes_like_json_stringify() {
        assert_eq!(render_payload(&"a\nb\tc".into()), r#""a\nb\tc""#);
        assert_eq!(render_payload(&"back\\slash".into()), r#""back\\slash""#);
        assert_eq!(render_payload(&"\u{1}".into()), r#""\u0001""#);
        assert_eq!(render_payload(&"héllo ✓".into()), "\"héllo ✓\"");
    }

    #[test]
    fn test_render_payload_binary() {
        assert_eq!(render_payload(&Payload::Binary(vec![1, 2, 3])), "{}");
    }

    #[test]
    fn test_append_keeps_order_and_duplicates() {
        let sink = RecordingSink::default();
        let mut list = DisplayList::new("inbox-list", Box::new(sink.clone()));

        for text in ["a", "b", "a", "c"] {
            list.append(render_payload(&text.into()));
        }

        assert_eq!(list.len(), 4);
        assert_eq!(list.entries(), &[r#""a""#, r#""b""#, r#""a""#, r#""c""#]);
        assert_eq!(list.last(), Some(r#""c""#));

        let rendered = sink.0.lock().unwrap();
        assert_eq!(rendered.len(), 4);
        assert_eq!(rendered[2], (2, r#""a""#.to_string()));
    }

    #[test]
    fn test_writer_sink() {
        let mut sink = WriterSink::new(Vec::new());
        sink.entry_appended("inbox-list", 0, r#""hello""#);
        sink.entry_appended("inbox-list", 1, "{}");
        assert_eq!(
            String::from_utf8(sink.into_inner()).unwrap(),
            "- \"hello\"\n- {}\n"
        );
    }
}
