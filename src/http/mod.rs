//! HTTP dispatch capability
//!
//! The execution engine only talks to the network through
//! [`HttpDispatcher`], so tests can script responses and the binary can
//! plug in the reqwest-backed [`ReqwestDispatcher`].

pub mod client;
pub mod reqwest_client;
pub mod response;

use async_trait::async_trait;
pub use client::HttpClientConfig;
pub use reqwest_client::ReqwestDispatcher;
pub use response::{HttpRequest, HttpResponse, TransportError};

/// Trait for sending one request and waiting for its response
#[async_trait]
pub trait HttpDispatcher: Send + Sync {
    /// Send a request and return status and payload
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<D: HttpDispatcher + ?Sized> HttpDispatcher for &D {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<D: HttpDispatcher + ?Sized> HttpDispatcher for std::sync::Arc<D> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}
