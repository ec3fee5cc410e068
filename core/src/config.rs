//! Client configuration.
//!
//! # Design
//! `ClientConfig` is an immutable value. Every `with_*` method consumes the
//! value and returns a modified copy, so a configuration handed to an
//! in-flight call never changes underneath it. The bearer credential only
//! leaves this type as the authorization header; `Debug` redacts it.

use std::fmt;
use std::time::Duration;

use crate::http::set_header;

pub const DEFAULT_BASE_URL: &str = "https://app.customgpt.ai";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything an endpoint operation needs besides its own arguments.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    token: String,
    auth_prefix: String,
    auth_header_name: String,
    headers: Vec<(String, String)>,
    cookies: Vec<(String, String)>,
    timeout: Duration,
    follow_redirects: bool,
    fail_on_unrecognized_status: bool,
}

impl ClientConfig {
    pub fn new(base_url: &str, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            auth_prefix: "Bearer".to_string(),
            auth_header_name: "Authorization".to_string(),
            headers: Vec::new(),
            cookies: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            follow_redirects: false,
            fail_on_unrecognized_status: false,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Scheme word placed before the token. Empty sends the bare token.
    pub fn with_auth_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.auth_prefix = prefix.into();
        self
    }

    pub fn with_auth_header_name(mut self, name: impl Into<String>) -> Self {
        self.auth_header_name = name.into();
        self
    }

    /// Merge additional default headers; later names replace earlier ones.
    pub fn with_headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            let name = name.into();
            set_header(&mut self.headers, &name, value.into());
        }
        self
    }

    /// Merge additional cookies; later names replace earlier ones.
    pub fn with_cookies<K, V>(mut self, cookies: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in cookies {
            let name = name.into();
            let value = value.into();
            match self.cookies.iter_mut().find(|(key, _)| *key == name) {
                Some(entry) => entry.1 = value,
                None => self.cookies.push((name, value)),
            }
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    pub fn with_fail_on_unrecognized_status(mut self, fail: bool) -> Self {
        self.fail_on_unrecognized_status = fail;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn follow_redirects(&self) -> bool {
        self.follow_redirects
    }

    pub fn fail_on_unrecognized_status(&self) -> bool {
        self.fail_on_unrecognized_status
    }

    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn cookies(&self) -> &[(String, String)] {
        &self.cookies
    }

    /// The authorization header followed by the default headers.
    pub fn headers(&self) -> Vec<(String, String)> {
        let auth_value = if self.auth_prefix.is_empty() {
            self.token.clone()
        } else {
            format!("{} {}", self.auth_prefix, self.token)
        };
        let mut headers = vec![(self.auth_header_name.clone(), auth_value)];
        for (name, value) in &self.headers {
            set_header(&mut headers, name, value.clone());
        }
        headers
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &if self.token.is_empty() { "<empty>" } else { "<redacted>" })
            .field("auth_header_name", &self.auth_header_name)
            .field("headers", &self.headers)
            .field("cookies", &self.cookies.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .field("timeout", &self.timeout)
            .field("follow_redirects", &self.follow_redirects)
            .field("fail_on_unrecognized_status", &self.fail_on_unrecognized_status)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ClientConfig::new(DEFAULT_BASE_URL, "key");
        assert_eq!(config.base_url(), "https://app.customgpt.ai");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(!config.follow_redirects());
        assert!(!config.fail_on_unrecognized_status());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("http://localhost:3000/", "key");
        assert_eq!(config.base_url(), "http://localhost:3000");
    }

    #[test]
    fn with_methods_leave_original_untouched() {
        let base = ClientConfig::new(DEFAULT_BASE_URL, "key");
        let slow = base.clone().with_timeout(Duration::from_secs(60));
        assert_eq!(base.timeout(), Duration::from_secs(5));
        assert_eq!(slow.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn headers_start_with_bearer_auth() {
        let config = ClientConfig::new(DEFAULT_BASE_URL, "key").with_headers([("X-Trace", "1")]);
        assert_eq!(
            config.headers(),
            vec![
                ("Authorization".to_string(), "Bearer key".to_string()),
                ("X-Trace".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn empty_prefix_sends_bare_token() {
        let config = ClientConfig::new(DEFAULT_BASE_URL, "key")
            .with_auth_prefix("")
            .with_auth_header_name("X-Api-Key");
        assert_eq!(config.headers(), vec![("X-Api-Key".to_string(), "key".to_string())]);
    }

    #[test]
    fn later_headers_and_cookies_win() {
        let config = ClientConfig::new(DEFAULT_BASE_URL, "key")
            .with_headers([("Accept", "text/html")])
            .with_headers([("accept", "application/json")])
            .with_cookies([("session", "a")])
            .with_cookies([("session", "b")]);
        let headers = config.headers();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1].1, "application/json");
        assert_eq!(config.cookies(), &[("session".to_string(), "b".to_string())]);
    }

    #[test]
    fn debug_redacts_token() {
        let config = ClientConfig::new(DEFAULT_BASE_URL, "super-secret").with_cookies([("sid", "hidden")]);
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(!printed.contains("hidden"));
        assert!(printed.contains("<redacted>"));
    }
}
