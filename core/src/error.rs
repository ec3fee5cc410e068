//! Error types for the CustomGPT request/response layer.
//!
//! # Design
//! `UnexpectedStatus` is only produced when the configuration asks for it;
//! otherwise an undocumented status code classifies to `None` and the caller
//! inspects the raw envelope. Decode failures keep the status they were
//! decoding for so the caller can tell which outcome variant was attempted.
//! No variant ever carries the bearer credential.

use thiserror::Error;

/// Errors produced while building requests or classifying responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status code the endpoint does not document
    /// and `fail_on_unrecognized_status` is set.
    #[error("unexpected status {status}: {}", String::from_utf8_lossy(body))]
    UnexpectedStatus { status: u16, body: Vec<u8> },

    /// The status matched a documented outcome but the body did not decode
    /// into that outcome's payload.
    #[error("failed to decode {status} response body: {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// A model could not be converted to or from its JSON mapping.
    #[error("model conversion failed: {0}")]
    Model(#[source] serde_json::Error),

    /// The request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A loose argument was not recognized by the operation.
    #[error("{operation} does not accept argument `{name}`")]
    UnknownArgument { operation: &'static str, name: String },

    /// An argument was recognized but could not be used.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The base URL and path did not form a valid URL.
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ApiError {
    /// Status code of an `UnexpectedStatus` or `Decode` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UnexpectedStatus { status, .. } | ApiError::Decode { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}
