use customgpt_core::ApiError;
use thiserror::Error;

/// Errors surfaced by the transports and the namespace layer.
///
/// Transport failures pass through unchanged; nothing here retries.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Blocking transport failure (connect, timeout, DNS, I/O).
    #[error(transparent)]
    Transport(#[from] ureq::Error),

    /// Async transport failure.
    #[error(transparent)]
    AsyncTransport(#[from] reqwest::Error),

    /// A process-wide setting could not be read.
    #[error("invalid setting: {0}")]
    Config(String),
}

impl Error {
    /// Status code carried by an unexpected-status or decode error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => err.status(),
            _ => None,
        }
    }
}
