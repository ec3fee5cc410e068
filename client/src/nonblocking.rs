//! Async transport over reqwest.
//!
//! Mirrors `blocking::Client` call for call. The classification is the same
//! core code; only the wait differs.

use customgpt_core::api::{SendMessage, SendMessageOutcome};
use customgpt_core::{
    build_request, build_response, ApiError, ClientConfig, Endpoint, HttpMethod, HttpRequest,
    HttpResponse, Response,
};
use reqwest::redirect::Policy;
use tracing::{field, instrument, Span};

use crate::blocking::{streaming_refused, MAX_REDIRECTS};
use crate::error::Error;
use crate::stream::{AsyncMessageStream, StreamReply};

#[derive(Clone)]
pub struct AsyncClient {
    config: ClientConfig,
    http: reqwest::Client,
    streaming_http: reqwest::Client,
}

impl AsyncClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .redirect(redirect_policy(&config))
            .timeout(config.timeout())
            .build()?;
        // No whole-request deadline: the body may stay open for the whole answer.
        let streaming_http = reqwest::Client::builder()
            .redirect(redirect_policy(&config))
            .connect_timeout(config.timeout())
            .read_timeout(config.timeout())
            .build()?;
        Ok(Self {
            config,
            http,
            streaming_http,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run `endpoint` and return the full envelope.
    pub async fn call<E: Endpoint>(&self, endpoint: &E) -> Result<Response<E::Outcome>, Error> {
        if endpoint.is_streaming() {
            return Err(streaming_refused(E::NAME).into());
        }
        let request = build_request(&self.config, endpoint)?;
        let response = self.execute(E::NAME, &request).await?;
        Ok(build_response(&self.config, response)?)
    }

    pub async fn call_parsed<E: Endpoint>(&self, endpoint: &E) -> Result<Option<E::Outcome>, Error> {
        Ok(self.call(endpoint).await?.into_parsed())
    }

    #[instrument(
        name = "customgpt.request",
        skip_all,
        fields(endpoint = name, method = %request.method, url = %request.url, status = field::Empty)
    )]
    pub async fn execute(&self, name: &'static str, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let response = send(&self.http, request).await?;
        let status = response.status().as_u16();
        Span::current().record("status", status);
        let headers = response_headers(&response);
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    /// Send a message with streaming enabled; see `blocking::Client::stream`.
    #[instrument(
        name = "customgpt.stream",
        skip_all,
        fields(endpoint = SendMessage::NAME, project_id = endpoint.project_id, status = field::Empty)
    )]
    pub async fn stream(&self, endpoint: &SendMessage) -> Result<StreamReply<AsyncMessageStream>, Error> {
        if !endpoint.is_streaming() {
            return Err(ApiError::InvalidArgument(
                "stream requires `stream` to be set on the query".to_string(),
            )
            .into());
        }
        let request = build_request(&self.config, endpoint)?;
        let response = send(&self.streaming_http, &request).await?;
        let status = response.status().as_u16();
        Span::current().record("status", status);

        if response.status().is_success() {
            return Ok(StreamReply::Events(AsyncMessageStream::new(response.bytes_stream())));
        }

        let headers = response_headers(&response);
        let body = response.bytes().await?.to_vec();
        let raw = HttpResponse {
            status,
            headers,
            body,
        };
        Ok(StreamReply::Rejected(build_response::<SendMessageOutcome>(&self.config, raw)?))
    }
}

impl std::fmt::Debug for AsyncClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncClient").field("config", &self.config).finish_non_exhaustive()
    }
}

fn redirect_policy(config: &ClientConfig) -> Policy {
    if config.follow_redirects() {
        Policy::limited(MAX_REDIRECTS as usize)
    } else {
        Policy::none()
    }
}

async fn send(http: &reqwest::Client, request: &HttpRequest) -> Result<reqwest::Response, Error> {
    let method = match request.method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    };
    let mut builder = http.request(method, request.full_url()?);
    for (name, value) in request.wire_headers() {
        builder = builder.header(name, value);
    }
    if let Some(bytes) = request.body_bytes()? {
        builder = builder.body(bytes);
    }
    Ok(builder.send().await?)
}

fn response_headers(response: &reqwest::Response) -> Vec<(String, String)> {
    response
        .headers()
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect()
}
