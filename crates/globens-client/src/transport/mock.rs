//! Scripted transport for tests.
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! globens-client = { version = "...", features = ["test-utils"] }
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use serde::Serialize;
use url::Url;

use super::{RawRequest, RawResponse, Transport, TransportError};
use crate::RequestBody;

/// A request observed by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl RecordedRequest {
    /// Path of the request URL.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Value of the `Authorization` header, if sent.
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
    }

    /// JSON body decoded as a value, if the request carried one.
    pub fn json(&self) -> Option<serde_json::Value> {
        match &self.body {
            RequestBody::Json(bytes) => serde_json::from_slice(bytes).ok(),
            _ => None,
        }
    }
}

/// Transport that replays scripted outcomes in order and records requests.
///
/// When the script runs out, calls fail with a network error.
#[derive(Debug, Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Creates a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw outcome.
    pub fn push(&self, outcome: Result<RawResponse, TransportError>) -> &Self {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
        self
    }

    /// Queues a 200 response with a JSON body.
    pub fn push_json<T: Serialize>(&self, body: &T) -> &Self {
        let body = serde_json::to_vec(body).unwrap_or_default();
        self.push(Ok(RawResponse::new(200, body)))
    }

    /// Queues a non-2xx response.
    pub fn push_status(&self, status: u16, body: impl Into<bytes::Bytes>) -> &Self {
        self.push(Err(TransportError::status(status, body)))
    }

    /// Queues a transport failure.
    pub fn push_error(&self, error: TransportError) -> &Self {
        self.push(Err(error))
    }

    /// Requests observed so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests observed so far.
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: RawRequest) -> Result<RawResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method: request.method,
                url: request.url,
                headers: request.headers,
                body: request.body,
            });

        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::network("no scripted response")))
    }
}
