//! Blocking transport over ureq.
//!
//! # Design
//! `Client` pairs one immutable `ClientConfig` with two ureq agents built
//! from it: a buffered one bounded by the configured timeout end to end, and
//! a streaming one that bounds only connect and response head. Both return
//! 4xx/5xx as data so the endpoint can classify them.

use customgpt_core::api::{SendMessage, SendMessageOutcome};
use customgpt_core::{
    build_request, build_response, ApiError, ClientConfig, Endpoint, HttpMethod, HttpRequest,
    HttpResponse, Response,
};
use tracing::{field, instrument, Span};

use crate::error::Error;
use crate::stream::{MessageStream, StreamReply};

/// Redirect hops followed when the configuration allows redirects.
pub(crate) const MAX_REDIRECTS: u32 = 10;

#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    agent: ureq::Agent,
    streaming_agent: ureq::Agent,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        let redirects = if config.follow_redirects() { MAX_REDIRECTS } else { 0 };
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(redirects)
            .max_redirects_will_error(false)
            .timeout_global(Some(config.timeout()))
            .build()
            .new_agent();
        let streaming_agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(redirects)
            .max_redirects_will_error(false)
            .timeout_connect(Some(config.timeout()))
            .timeout_recv_response(Some(config.timeout()))
            .build()
            .new_agent();
        Self {
            config,
            agent,
            streaming_agent,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run `endpoint` and return the full envelope.
    ///
    /// Streaming endpoints are refused; use [`Client::stream`].
    pub fn call<E: Endpoint>(&self, endpoint: &E) -> Result<Response<E::Outcome>, Error> {
        if endpoint.is_streaming() {
            return Err(streaming_refused(E::NAME).into());
        }
        let request = build_request(&self.config, endpoint)?;
        let response = self.execute(E::NAME, &request)?;
        Ok(build_response(&self.config, response)?)
    }

    /// Run `endpoint` and keep only the classified outcome.
    pub fn call_parsed<E: Endpoint>(&self, endpoint: &E) -> Result<Option<E::Outcome>, Error> {
        Ok(self.call(endpoint)?.into_parsed())
    }

    /// Execute a request descriptor and buffer the whole reply.
    #[instrument(
        name = "customgpt.request",
        skip_all,
        fields(endpoint = name, method = %request.method, url = %request.url, status = field::Empty)
    )]
    pub fn execute(&self, name: &'static str, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let mut response = send(&self.agent, request)?;
        let status = response.status().as_u16();
        Span::current().record("status", status);
        let headers = response_headers(&response);
        let body = response.body_mut().read_to_vec()?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    /// Send a message with streaming enabled.
    ///
    /// A 2xx reply becomes a [`MessageStream`]; anything else is read in
    /// full and classified.
    #[instrument(
        name = "customgpt.stream",
        skip_all,
        fields(endpoint = SendMessage::NAME, project_id = endpoint.project_id, status = field::Empty)
    )]
    pub fn stream(&self, endpoint: &SendMessage) -> Result<StreamReply<MessageStream>, Error> {
        if !endpoint.is_streaming() {
            return Err(ApiError::InvalidArgument(
                "stream requires `stream` to be set on the query".to_string(),
            )
            .into());
        }
        let request = build_request(&self.config, endpoint)?;
        let mut response = send(&self.streaming_agent, &request)?;
        let status = response.status().as_u16();
        Span::current().record("status", status);

        if response.status().is_success() {
            let reader = response.into_body().into_reader();
            return Ok(StreamReply::Events(MessageStream::new(Box::new(reader))));
        }

        let headers = response_headers(&response);
        let body = response.body_mut().read_to_vec()?;
        let raw = HttpResponse {
            status,
            headers,
            body,
        };
        Ok(StreamReply::Rejected(build_response::<SendMessageOutcome>(&self.config, raw)?))
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("config", &self.config).finish_non_exhaustive()
    }
}

pub(crate) fn streaming_refused(operation: &str) -> ApiError {
    ApiError::InvalidArgument(format!(
        "{operation} with `stream` set returns an event stream; use the streaming call"
    ))
}

fn send(
    agent: &ureq::Agent,
    request: &HttpRequest,
) -> Result<ureq::http::Response<ureq::Body>, Error> {
    let url = request.full_url()?;
    let headers = request.wire_headers();

    let response = match request.method {
        HttpMethod::Get => with_headers(agent.get(&url), &headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(&url), &headers).call(),
        HttpMethod::Post | HttpMethod::Put => {
            let builder = match request.method {
                HttpMethod::Post => agent.post(&url),
                _ => agent.put(&url),
            };
            let builder = with_headers(builder, &headers);
            match request.body_bytes()? {
                Some(bytes) => builder.send(&bytes[..]),
                None => builder.send_empty(),
            }
        }
    }?;
    Ok(response)
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn response_headers(response: &ureq::http::Response<ureq::Body>) -> Vec<(String, String)> {
    response
        .headers()
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect()
}
