//! reqwest-backed dispatcher

use crate::http::{HttpClientConfig, HttpDispatcher, HttpRequest, HttpResponse, TransportError};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Method, Url};
use std::time::Duration;
use tracing::{debug, warn};

/// Sends requests over the network with a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestDispatcher {
    client: Client,
    timeout_secs: Option<u64>,
}

impl ReqwestDispatcher {
    /// Build a dispatcher from configuration
    pub fn new(config: HttpClientConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout_secs.unwrap_or_default())
        } else if error.is_connect() {
            TransportError::Connect(error.to_string())
        } else if error.is_builder() {
            TransportError::InvalidRequest(error.to_string())
        } else {
            TransportError::Other(error.to_string())
        }
    }
}

#[async_trait]
impl HttpDispatcher for ReqwestDispatcher {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            TransportError::InvalidRequest(format!("invalid method '{}'", request.method))
        })?;
        let url = Url::parse(&request.url).map_err(|e| {
            TransportError::InvalidRequest(format!("invalid URL '{}': {}", request.url, e))
        })?;

        debug!("{} {} ({} byte body)", method, url, request.body.len());

        let mut builder = self.client.request(method, url);
        if request.has_body() {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(request.body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("request to {} failed: {}", request.url, e);
            self.classify(e)
        })?;

        let status = response.status().as_u16();
        // Consuming the body releases the connection on every path
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        debug!("received {} with {} byte body", status, body.len());

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
