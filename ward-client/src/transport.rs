//! Seams between the controllers and the outside world: HTTP and timers.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Status and raw body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a readable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("could not read response body: {0}")]
    Body(String),
}

/// Issues GET requests. Futures need not be `Send`; everything runs on the UI
/// task.
pub trait Transport {
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, TransportError>>;
}

impl<T: Transport> Transport for std::rc::Rc<T> {
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        (**self).get(url)
    }
}

/// Suspends the calling task. Used for the search debounce.
pub trait Timer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;

    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    impl Transport for ReqwestTransport {
        async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|err| TransportError::Request(err.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|err| TransportError::Body(err.to_string()))?;
            Ok(HttpResponse { status, body })
        }
    }

    #[derive(Debug, Clone, Copy, Default)]
    pub struct TokioTimer;

    impl Timer for TokioTimer {
        async fn sleep(&self, duration: Duration) {
            tokio::time::sleep(duration).await;
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{ReqwestTransport, TokioTimer};
