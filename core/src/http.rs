//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and classifies `HttpResponse` values
//! without touching the network; a transport executes the round-trip.
//! The body is a closed enum, so a request can never carry JSON and
//! multipart fields at once. A request encodes its own body, so every
//! transport sends identical bytes.

use std::fmt;
use std::time::Duration;

use serde_json::Value;

use crate::error::ApiError;
use crate::multipart::MultipartBody;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartBody),
}

impl RequestBody {
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }

    pub fn content_type(&self) -> Option<String> {
        match self {
            RequestBody::Empty => None,
            RequestBody::Json(_) => Some("application/json".to_string()),
            RequestBody::Multipart(form) => Some(form.content_type()),
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `endpoint::build_request`. `url` excludes the query string;
/// `query` holds only parameters that were actually provided.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub cookies: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub timeout: Duration,
    pub follow_redirects: bool,
    pub streaming: bool,
}

impl HttpRequest {
    /// `url` with the query string appended.
    pub fn full_url(&self) -> Result<String, ApiError> {
        let parsed = if self.query.is_empty() {
            url::Url::parse(&self.url)
        } else {
            url::Url::parse_with_params(&self.url, &self.query)
        };
        parsed.map(String::from).map_err(|source| ApiError::InvalidUrl {
            url: self.url.clone(),
            source,
        })
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Cookies folded into a single `Cookie` header value.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let joined = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        Some(joined)
    }

    /// Headers plus the folded cookie header, ready to put on the wire.
    pub fn wire_headers(&self) -> Vec<(String, String)> {
        let mut headers = self.headers.clone();
        if let Some(cookie) = self.cookie_header() {
            set_header(&mut headers, "cookie", cookie);
        }
        headers
    }

    /// Encoded body bytes, `None` for an empty body.
    pub fn body_bytes(&self) -> Result<Option<Vec<u8>>, ApiError> {
        match &self.body {
            RequestBody::Empty => Ok(None),
            RequestBody::Json(value) => serde_json::to_vec(value).map(Some).map_err(ApiError::Encode),
            RequestBody::Multipart(form) => Ok(Some(form.encode())),
        }
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`, then passed
/// to `endpoint::classify_response`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

pub(crate) fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Insert or replace a header, matching names case-insensitively.
pub(crate) fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
    match headers.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(name)) {
        Some(entry) => entry.1 = value,
        None => headers.push((name.to_string(), value)),
    }
}
