//! Incremental `text/event-stream` decoding.
//!
//! # Design
//! `SseDecoder` is fed raw chunks exactly as they arrive from the transport
//! and returns every event completed by that chunk. It keeps no reference
//! to the connection, so the blocking and async stream handles share it.
//! A frame still open when the input ends is dropped. A UTF-8 byte order
//! mark opening the stream is skipped.

use std::time::Duration;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// One dispatched server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Event type; `message` when the frame names none.
    pub event: String,
    /// `data` lines joined with `\n`.
    pub data: String,
    /// Last event id seen on the stream, if any.
    pub id: Option<String>,
    /// Reconnection delay announced by the server.
    pub retry: Option<Duration>,
}

impl SseEvent {
    /// Decode the data payload as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.data)
    }
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    line: Vec<u8>,
    skip_lf: bool,
    past_first_line: bool,
    event: Option<String>,
    data: Vec<String>,
    has_data: bool,
    last_id: Option<String>,
    retry: Option<Duration>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a chunk and return the events it completes, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        let mut events = Vec::new();
        for &byte in chunk {
            if self.skip_lf {
                self.skip_lf = false;
                if byte == b'\n' {
                    continue;
                }
            }
            match byte {
                b'\r' => {
                    self.skip_lf = true;
                    self.end_line(&mut events);
                }
                b'\n' => self.end_line(&mut events),
                other => self.line.push(other),
            }
        }
        events
    }

    /// Whether bytes of an unfinished frame are buffered.
    pub fn has_pending(&self) -> bool {
        !self.line.is_empty() || self.has_data || self.event.is_some()
    }

    fn end_line(&mut self, events: &mut Vec<SseEvent>) {
        let mut raw = std::mem::take(&mut self.line);
        if !self.past_first_line {
            self.past_first_line = true;
            if raw.starts_with(BOM) {
                raw = raw.split_off(BOM.len());
            }
        }
        let line = String::from_utf8_lossy(&raw);

        if line.is_empty() {
            if let Some(event) = self.dispatch() {
                events.push(event);
            }
            return;
        }
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line.as_ref(), ""),
        };
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => {
                self.data.push(value.to_string());
                self.has_data = true;
            }
            "id" if !value.contains('\0') => self.last_id = Some(value.to_string()),
            "retry" => {
                if let Ok(ms) = value.parse::<u64>() {
                    self.retry = Some(Duration::from_millis(ms));
                }
            }
            _ => {}
        }
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let event = self.event.take();
        if !self.has_data {
            return None;
        }
        self.has_data = false;
        let data = std::mem::take(&mut self.data).join("\n");
        Some(SseEvent {
            event: event.filter(|e| !e.is_empty()).unwrap_or_else(|| "message".to_string()),
            data,
            id: self.last_id.clone(),
            retry: self.retry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_event_with_default_type() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: hello\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "message");
        assert_eq!(events[0].data, "hello");
        assert_eq!(events[0].id, None);
    }

    #[test]
    fn leading_byte_order_mark_is_skipped() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed("\u{feff}data: first\n\n".as_bytes());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "first");
    }

    #[test]
    fn byte_order_mark_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(&BOM[..2]).is_empty());
        let mut rest = BOM[2..].to_vec();
        rest.extend_from_slice(b"data: first\n\n");
        let events = decoder.feed(&rest);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "first");
    }

    #[test]
    fn byte_order_mark_only_counts_at_stream_start() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed("data: a\n\n\u{feff}data: b\n\n".as_bytes());
        let data: Vec<_> = events.iter().map(|e| e.data.as_str()).collect();
        assert_eq!(data, vec!["a"]);
    }

    #[test]
    fn multi_line_data_is_joined() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"event: progress\ndata: a\ndata: b\n\n");
        assert_eq!(events[0].event, "progress");
        assert_eq!(events[0].data, "a\nb");
    }

    #[test]
    fn frames_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"da").is_empty());
        assert!(decoder.feed(b"ta: par").is_empty());
        assert!(decoder.has_pending());
        let events = decoder.feed(b"tial\n\ndata: next\n\n");
        let data: Vec<_> = events.iter().map(|e| e.data.as_str()).collect();
        assert_eq!(data, vec!["partial", "next"]);
        assert!(!decoder.has_pending());
    }

    #[test]
    fn crlf_split_between_chunks_is_one_line_break() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: x\r").is_empty());
        let events = decoder.feed(b"\n\r\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "x");
    }

    #[test]
    fn bare_cr_line_endings() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: one\r\rdata: two\r\r");
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].data, "two");
    }

    #[test]
    fn comments_and_unknown_fields_are_ignored() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b": keep-alive\n\nfoo: bar\ndata: x\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "x");
    }

    #[test]
    fn id_persists_and_retry_is_parsed() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"id: 7\nretry: 1500\ndata: a\n\ndata: b\n\n");
        assert_eq!(events[0].id.as_deref(), Some("7"));
        assert_eq!(events[1].id.as_deref(), Some("7"));
        assert_eq!(events[1].retry, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn frame_without_data_dispatches_nothing() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"event: ping\n\n").is_empty());
        let events = decoder.feed(b"data: after\n\n");
        assert_eq!(events[0].event, "message");
    }

    #[test]
    fn empty_data_line_still_dispatches() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "");
    }

    #[test]
    fn json_payload_decodes() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: {\"status\":\"progress\",\"message\":\"Hi\"}\n\n");
        let value: serde_json::Value = events[0].json().unwrap();
        assert_eq!(value["message"], "Hi");
    }
}
