//! Transports and resource namespaces for the CustomGPT API.
//!
//! # Overview
//! `customgpt_core` builds requests and classifies responses without doing
//! I/O. This crate executes them: `blocking::Client` over ureq and
//! `nonblocking::AsyncClient` over reqwest, both returning the same
//! `Response` envelope. Streaming replies of `send_message` come back as
//! `MessageStream` / `AsyncMessageStream`.
//!
//! # Design
//! - `Session` owns the process-wide `Settings` and lazily derives a
//!   `ClientConfig` snapshot from them. Setters drop the snapshot, so a
//!   change applies from the next call on.
//! - Namespaces (`session.projects()`, `session.conversations()`, ...) take
//!   loose `Kwargs` and pluck the recognized names into the typed body.
//!   Every method has an `_async` twin built from the same request.
//! - Spans record endpoint name, method, URL and status. The credential is
//!   never recorded.

pub mod blocking;
pub mod error;
pub mod kwargs;
pub mod namespace;
pub mod nonblocking;
pub mod session;
pub mod stream;

pub use blocking::Client;
pub use error::Error;
pub use kwargs::{Arg, Kwargs};
pub use nonblocking::AsyncClient;
pub use session::{Session, Settings};
pub use stream::{AsyncMessageStream, MessageStream, StreamEnd, StreamReply, StreamState};

pub use customgpt_core::{ApiError, ClientConfig, Field, File, Response, SseEvent};
