//! The response envelope returned by every detailed call.

use crate::http::{find_header, HttpResponse};

/// Status, headers, raw body and the classified outcome of one call.
///
/// Created once per call and never mutated; `parsed` is `None` when the
/// status was not one the endpoint documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    status: u16,
    headers: Vec<(String, String)>,
    content: Vec<u8>,
    parsed: Option<T>,
}

impl<T> Response<T> {
    pub fn new(raw: HttpResponse, parsed: Option<T>) -> Self {
        Self {
            status: raw.status,
            headers: raw.headers,
            content: raw.body,
            parsed,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Raw body bytes exactly as received.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }

    pub fn parsed(&self) -> Option<&T> {
        self.parsed.as_ref()
    }

    /// The plain calling convention: drop everything but the outcome.
    pub fn into_parsed(self) -> Option<T> {
        self.parsed
    }
}
