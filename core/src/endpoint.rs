//! The build-request / classify-response pair shared by every endpoint.
//!
//! # Design
//! An endpoint is a plain struct holding its path parameters, query model
//! and body model. `build_request` turns it into an `HttpRequest` using a
//! `ClientConfig`; `classify_response` matches the returned status against
//! the endpoint's closed `Outcome` enum. Neither function performs I/O.
//!
//! Outcome enums are declared with the `outcome!` macro, one variant per
//! documented status code.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{set_header, HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::response::Response;

/// One REST action.
pub trait Endpoint {
    type Outcome: Outcome;

    /// Operation name used in logs and argument errors.
    const NAME: &'static str;
    const METHOD: HttpMethod;

    /// Path below the base URL, parameters already substituted.
    fn path(&self) -> String;

    fn query(&self) -> Result<Vec<(String, String)>, ApiError> {
        Ok(Vec::new())
    }

    fn body(&self) -> Result<RequestBody, ApiError> {
        Ok(RequestBody::Empty)
    }

    /// Call-specific headers; these win over configuration defaults.
    fn headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn is_streaming(&self) -> bool {
        false
    }
}

/// The closed set of typed outcomes of one endpoint.
pub trait Outcome: Sized {
    /// Status codes this outcome has a variant for.
    const DOCUMENTED: &'static [u16];

    /// Decode `body` into the variant for `status`; `None` if undocumented.
    fn parse(status: u16, body: &[u8]) -> Option<Result<Self, ApiError>>;

    /// Status code of the variant.
    fn status(&self) -> u16;
}

/// Build the request descriptor for `endpoint`.
pub fn build_request<E: Endpoint>(config: &ClientConfig, endpoint: &E) -> Result<HttpRequest, ApiError> {
    let body = endpoint.body()?;
    let mut headers = config.headers();
    if let Some(content_type) = body.content_type() {
        set_header(&mut headers, "content-type", content_type);
    }
    for (name, value) in endpoint.headers() {
        set_header(&mut headers, &name, value);
    }

    Ok(HttpRequest {
        method: E::METHOD,
        url: format!("{}{}", config.base_url(), endpoint.path()),
        headers,
        cookies: config.cookies().to_vec(),
        query: endpoint.query()?,
        body,
        timeout: config.timeout(),
        follow_redirects: config.follow_redirects(),
        streaming: endpoint.is_streaming(),
    })
}

/// Classify a raw response into the endpoint's outcome.
///
/// Undocumented statuses yield `Ok(None)`, or `UnexpectedStatus` when the
/// configuration asks to fail on them.
pub fn classify_response<O: Outcome>(
    config: &ClientConfig,
    response: &HttpResponse,
) -> Result<Option<O>, ApiError> {
    match O::parse(response.status, &response.body) {
        Some(parsed) => parsed.map(Some),
        None if config.fail_on_unrecognized_status() => Err(ApiError::UnexpectedStatus {
            status: response.status,
            body: response.body.clone(),
        }),
        None => {
            debug!(status = response.status, "undocumented status left unclassified");
            Ok(None)
        }
    }
}

/// Classify `response` and wrap it in the detailed envelope.
pub fn build_response<O: Outcome>(
    config: &ClientConfig,
    response: HttpResponse,
) -> Result<Response<O>, ApiError> {
    let parsed = classify_response(config, &response)?;
    Ok(Response::new(response, parsed))
}

/// Decode a documented response body.
pub fn decode_json<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|source| ApiError::Decode { status, source })
}

/// Percent-encode a string path parameter.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Declare an outcome enum with one variant per documented status code.
///
/// ```ignore
/// outcome! {
///     pub enum GetUserOutcome {
///         200 => Ok(ApiResponse<User>),
///         401 => Unauthorized(ErrorResponse),
///     }
/// }
/// ```
#[macro_export]
macro_rules! outcome {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($code:literal => $variant:ident($payload:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $($variant($payload)),+
        }

        impl $crate::endpoint::Outcome for $name {
            const DOCUMENTED: &'static [u16] = &[$($code),+];

            fn parse(status: u16, body: &[u8]) -> Option<Result<Self, $crate::ApiError>> {
                match status {
                    $($code => Some($crate::endpoint::decode_json(status, body).map($name::$variant)),)+
                    _ => None,
                }
            }

            fn status(&self) -> u16 {
                match self {
                    $($name::$variant(_) => $code,)+
                }
            }
        }
    };
}
