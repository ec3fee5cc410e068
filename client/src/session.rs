//! Process-wide settings and the session that owns them.
//!
//! # Design
//! `Session` is the explicit stand-in for a global default client. It holds
//! `Settings` and derives a `ClientConfig` snapshot (plus the transports
//! built from it) the first time a namespace method runs. Every setter takes
//! `&mut self` and drops the snapshot, so:
//! - no call can be in flight while settings change, and
//! - the change applies from the next call on.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use customgpt_core::api::SendMessage;
use customgpt_core::{ClientConfig, Endpoint, Response, DEFAULT_BASE_URL};
use tracing::debug;

use crate::blocking::Client;
use crate::error::Error;
use crate::namespace::{
    Citations, Conversations, PageMetadata, Pages, Plugins, ProjectSettings, Projects, Sources, Users,
};
use crate::nonblocking::AsyncClient;
use crate::stream::{AsyncMessageStream, MessageStream, StreamReply};

pub const ENV_API_KEY: &str = "CUSTOMGPT_API_KEY";
pub const ENV_BASE_URL: &str = "CUSTOMGPT_BASE_URL";
pub const ENV_TIMEOUT: &str = "CUSTOMGPT_TIMEOUT";
pub const ENV_RAISE_ON_UNEXPECTED_STATUS: &str = "CUSTOMGPT_RAISE_ON_UNEXPECTED_STATUS";

/// Timeout of session calls unless overridden.
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(100);

/// The knobs a session derives its configuration from.
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub raise_on_unexpected_status: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_SESSION_TIMEOUT,
            raise_on_unexpected_status: false,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`; unset names keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut settings = Settings::default();
        if let Some(key) = lookup(ENV_API_KEY) {
            settings.api_key = key;
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|url| !url.trim().is_empty()) {
            settings.base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            settings.timeout = parse_seconds(&raw)?;
        }
        if let Some(raw) = lookup(ENV_RAISE_ON_UNEXPECTED_STATUS) {
            settings.raise_on_unexpected_status = parse_switch(ENV_RAISE_ON_UNEXPECTED_STATUS, &raw)?;
        }
        Ok(settings)
    }

    pub fn to_config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url, self.api_key.clone())
            .with_timeout(self.timeout)
            .with_fail_on_unrecognized_status(self.raise_on_unexpected_status)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &if self.api_key.is_empty() { "<empty>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("raise_on_unexpected_status", &self.raise_on_unexpected_status)
            .finish()
    }
}

fn parse_seconds(raw: &str) -> Result<Duration, Error> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| Error::Config(format!("{ENV_TIMEOUT} must be a number of seconds, got {raw:?}")))
}

fn parse_switch(name: &str, raw: &str) -> Result<bool, Error> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!("{name} must be a boolean, got {raw:?}"))),
    }
}

/// Owner of the default configuration used by the namespaces.
#[derive(Debug, Default)]
pub struct Session {
    settings: Settings,
    client: OnceLock<Client>,
    async_client: OnceLock<AsyncClient>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            client: OnceLock::new(),
            async_client: OnceLock::new(),
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::new(Settings::from_env()?))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The configuration the next call uses.
    pub fn config(&self) -> &ClientConfig {
        self.client().config()
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.update(|settings| settings.api_key = api_key.into());
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.update(|settings| settings.base_url = base_url.into());
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.update(|settings| settings.timeout = timeout);
    }

    /// Change any settings; the snapshot is rebuilt on the next call.
    pub fn update(&mut self, change: impl FnOnce(&mut Settings)) {
        change(&mut self.settings);
        let blocking = self.client.take();
        let nonblocking = self.async_client.take();
        if blocking.is_some() || nonblocking.is_some() {
            debug!("session settings changed; configuration will be rebuilt");
        }
    }

    pub fn projects(&self) -> Projects<'_> {
        Projects::new(self)
    }

    pub fn conversations(&self) -> Conversations<'_> {
        Conversations::new(self)
    }

    pub fn citations(&self) -> Citations<'_> {
        Citations::new(self)
    }

    pub fn pages(&self) -> Pages<'_> {
        Pages::new(self)
    }

    pub fn page_metadata(&self) -> PageMetadata<'_> {
        PageMetadata::new(self)
    }

    pub fn plugins(&self) -> Plugins<'_> {
        Plugins::new(self)
    }

    pub fn project_settings(&self) -> ProjectSettings<'_> {
        ProjectSettings::new(self)
    }

    pub fn sources(&self) -> Sources<'_> {
        Sources::new(self)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    pub(crate) fn client(&self) -> &Client {
        self.client.get_or_init(|| Client::new(self.settings.to_config()))
    }

    pub(crate) fn async_client(&self) -> Result<&AsyncClient, Error> {
        if let Some(client) = self.async_client.get() {
            return Ok(client);
        }
        let client = AsyncClient::new(self.settings.to_config())?;
        Ok(self.async_client.get_or_init(|| client))
    }

    pub(crate) fn call<E: Endpoint>(&self, endpoint: &E) -> Result<Response<E::Outcome>, Error> {
        self.client().call(endpoint)
    }

    pub(crate) async fn call_async<E: Endpoint>(&self, endpoint: &E) -> Result<Response<E::Outcome>, Error> {
        self.async_client()?.call(endpoint).await
    }

    pub(crate) fn stream(&self, endpoint: &SendMessage) -> Result<StreamReply<MessageStream>, Error> {
        self.client().stream(endpoint)
    }

    pub(crate) async fn stream_async(
        &self,
        endpoint: &SendMessage,
    ) -> Result<StreamReply<AsyncMessageStream>, Error> {
        self.async_client()?.stream(endpoint).await
    }
}
