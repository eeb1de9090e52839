//! The HTTP transport seam.
//!
//! [`ApiClient`](crate::ApiClient) prepares fully-formed [`RawRequest`]s and
//! hands them to a [`Transport`], which performs exactly one attempt and
//! reports the outcome as a tagged [`TransportError`] instead of raising.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
pub use globens_core::TransportError;
use reqwest::Method;
use reqwest::header::HeaderMap;
use url::Url;

use crate::RequestBody;

#[cfg(any(test, feature = "test-utils"))]
mod mock;
mod reqwest_transport;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use mock::{MockTransport, RecordedRequest};
pub use reqwest_transport::ReqwestTransport;

/// A request ready to be sent.
#[derive(Debug, Clone)]
pub struct RawRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
    pub timeout: Duration,
}

/// A 2xx response.
#[derive(Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

impl fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .field("len", &self.body.len())
            .finish()
    }
}

/// Sends prepared requests.
///
/// Implementations return `Ok` only for 2xx responses and never retry.
#[async_trait::async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    /// Performs a single attempt.
    async fn send(&self, request: RawRequest) -> Result<RawResponse, TransportError>;
}
