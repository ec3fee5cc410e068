//! I/O-free core of the CustomGPT API client.
//!
//! # Overview
//! Builds `HttpRequest` values and classifies `HttpResponse` values without
//! touching the network (host-does-IO pattern). A transport executes the
//! actual HTTP round-trip, so everything here is deterministic and testable.
//!
//! # Design
//! - `ClientConfig` is an immutable value threaded through every call.
//! - Each REST action is an `Endpoint`: a struct of typed inputs that
//!   knows its method, path, query, body and headers.
//! - `endpoint::build_request` and `endpoint::classify_response` are the
//!   two halves of every call; `build_response` wraps the latter in the
//!   `Response` envelope.
//! - Outcomes are closed enums, one variant per documented status code.
//! - Models keep "unset" apart from "null" through `Field`, and keep keys
//!   they do not know about.
//! - `sse::SseDecoder` turns event-stream bytes into events for both the
//!   blocking and the async streaming handles.

pub mod api;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod model;
pub mod models;
pub mod multipart;
pub mod response;
pub mod sse;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use endpoint::{build_request, build_response, classify_response, Endpoint, Outcome};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use model::{ApiResponse, ErrorResponse, Field, Model};
pub use multipart::{File, MultipartForm};
pub use response::Response;
pub use sse::{SseDecoder, SseEvent};
