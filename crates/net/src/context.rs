// ABOUTME: Explicit client context passed to every network operation.
// ABOUTME: ClientConfig holds the settings; ClientConfigBuilder offers a fluent way to set them.

use std::time::Duration;

use crate::error::FetchError;

/// Settings for HTTP access to feeds.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    /// Timeout for the whole request, body included.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Responses larger than this are rejected.
    pub max_body_bytes: u64,
    pub max_redirects: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("podcore/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_body_bytes: 50 * 1024 * 1024,
            max_redirects: 10,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }
}

/// Builder for constructing a ClientContext with custom settings.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Set the User-Agent header sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the overall request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the largest accepted response body.
    pub fn max_body_bytes(mut self, limit: u64) -> Self {
        self.config.max_body_bytes = limit;
        self
    }

    pub fn max_redirects(mut self, redirects: usize) -> Self {
        self.config.max_redirects = redirects;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Configuration plus the HTTP client built from it. Create one per
/// application and hand it to the operations that need network access.
#[derive(Debug, Clone)]
pub struct ClientContext {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ClientContext {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}
