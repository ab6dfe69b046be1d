//! HTTP client configuration

/// Configuration for the HTTP dispatcher
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-request timeout in seconds. None leaves requests unbounded.
    pub timeout_secs: Option<u64>,

    /// Value of the User-Agent header
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: concat!("apiline/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
