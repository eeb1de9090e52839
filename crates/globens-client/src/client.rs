//! The API client factory shared by all resource services.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use globens_core::{
    ApiResponse, Failure, Locale, NormalizedError, Normalizer, Precondition, TransportError,
};
use globens_session::TokenStore;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue,
};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;
use validator::Validate;

use crate::transport::{RawRequest, RawResponse, ReqwestTransport, Transport};
use crate::{
    ApiRequest, AuthRequirement, BodyKind, ClientConfig, Error, ResourceGroup, Result,
    TRACING_TARGET_CLIENT,
};

/// Inner state shared between clones.
struct ApiClientInner {
    config: ClientConfig,
    base_url: Url,
    transport: Arc<dyn Transport>,
    store: Arc<dyn TokenStore>,
    normalizer: Normalizer,
}

/// Prepares requests for every resource group and normalizes their failures.
///
/// The client reads the current session from the injected [`TokenStore`] on
/// every call, attaches it as a bearer token, applies the group timeout and
/// sends exactly one attempt through its [`Transport`]. Clones share the same
/// configuration, transport and store.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
///
/// use globens_client::{ApiClient, ClientConfig, Services};
/// use globens_session::MemoryTokenStore;
///
/// let client = ApiClient::new(ClientConfig::default(), Arc::new(MemoryTokenStore::new()))?;
/// let games = Services::new(client).games().list_games(1, 15).await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
    cancellation: Option<CancellationToken>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("locale", &self.inner.normalizer.locale())
            .field("store", &self.inner.store)
            .field("cancellable", &self.cancellation.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client backed by a reqwest transport.
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, store, Arc::new(transport))
    }

    /// Creates a client with a custom transport.
    pub fn with_transport(
        config: ClientConfig,
        store: Arc<dyn TokenStore>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let base_url = parse_base_url(config.effective_api_url())?;
        let normalizer = Normalizer::new(config.locale);

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            base_url = %base_url,
            locale = %config.locale,
            "Created API client"
        );

        let inner = ApiClientInner {
            config,
            base_url,
            transport,
            store,
            normalizer,
        };

        Ok(Self {
            inner: Arc::new(inner),
            cancellation: None,
        })
    }

    /// Returns a client whose calls are aborted when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancellation: Some(token),
        }
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Parsed base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Interface locale.
    pub fn locale(&self) -> Locale {
        self.inner.normalizer.locale()
    }

    /// Token store read on every call.
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.inner.store
    }

    /// Converts a failure into the uniform error envelope.
    pub fn normalize(&self, failure: Failure) -> NormalizedError {
        let error = self.inner.normalizer.normalize(failure);

        tracing::warn!(
            target: TRACING_TARGET_CLIENT,
            kind = %error.kind(),
            status = ?error.status(),
            message = %error.message(),
            "Request failed"
        );

        error
    }

    /// Validates a payload locally.
    pub fn validate<V: Validate>(&self, payload: &V) -> Result<(), NormalizedError> {
        payload.validate().map_err(|errors| {
            let error = self.inner.normalizer.validation(&errors);

            tracing::debug!(
                target: TRACING_TARGET_CLIENT,
                fields = error.field_errors().len(),
                "Rejected payload before sending"
            );

            error
        })
    }

    /// Builds the full URL of a request.
    pub fn url(&self, request: &ApiRequest) -> Url {
        let mut url = self.inner.base_url.clone();

        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .push(request.group.path_segment())
                .extend(&request.segments);
        }

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        url
    }

    /// Sends a request and returns the raw 2xx response.
    ///
    /// A call requiring a session fails with a precondition before any
    /// network activity when no usable session is stored.
    pub async fn execute(&self, request: ApiRequest) -> Result<RawResponse, Failure> {
        let body = request.body.clone()?;
        let body_kind = body.kind();

        let session = self.inner.store.session();
        let authorization = session
            .as_ref()
            .and_then(|session| bearer_header(&session.authorization()));
        let sent_token = session
            .filter(|_| authorization.is_some())
            .map(|session| session.access_token);

        if request.auth == AuthRequirement::Required && authorization.is_none() {
            tracing::debug!(
                target: TRACING_TARGET_CLIENT,
                group = %request.group,
                "No session for an authenticated call"
            );
            return Err(Precondition::NotAuthenticated.into());
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(self.locale().as_str()),
        );
        if body_kind == BodyKind::Json {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        let authenticated = authorization.is_some();
        if let Some(authorization) = authorization {
            headers.insert(AUTHORIZATION, authorization);
        }

        let url = self.url(&request);
        let timeout = self.inner.config.timeout_for(request.group, body_kind);
        let raw = RawRequest {
            method: request.method.clone(),
            url,
            headers,
            body,
            timeout,
        };

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            method = %raw.method,
            url = %raw.url,
            body = %body_kind,
            authenticated,
            timeout_ms = timeout.as_millis(),
            "Sending request"
        );

        let started_at = Instant::now();
        let outcome = match &self.cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => Err(TransportError::Cancelled),
                    outcome = self.inner.transport.send(raw) => outcome,
                }
            }
            None => self.inner.transport.send(raw).await,
        };
        let elapsed = started_at.elapsed();

        match &outcome {
            Ok(response) => tracing::debug!(
                target: TRACING_TARGET_CLIENT,
                group = %request.group,
                status = response.status,
                elapsed_ms = elapsed.as_millis(),
                "Request completed"
            ),
            Err(TransportError::Status { status: 401, .. })
                if request.auth == AuthRequirement::Required =>
            {
                self.clear_rejected_session(request.group, sent_token.as_deref());
            }
            Err(error) => tracing::debug!(
                target: TRACING_TARGET_CLIENT,
                group = %request.group,
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "Request did not complete"
            ),
        }

        outcome.map_err(Failure::from)
    }

    /// Clears the stored session after the backend rejected `sent_token`.
    ///
    /// A session written while the rejected call was in flight is kept.
    fn clear_rejected_session(&self, group: ResourceGroup, sent_token: Option<&str>) {
        let stored = self.inner.store.load();
        let same_session = stored
            .as_ref()
            .is_some_and(|session| Some(session.access_token.as_str()) == sent_token);

        if !same_session {
            tracing::debug!(
                target: TRACING_TARGET_CLIENT,
                group = %group,
                "Session replaced while the rejected call was in flight, keeping it"
            );
            return;
        }

        tracing::warn!(
            target: TRACING_TARGET_CLIENT,
            group = %group,
            "Session rejected by backend, clearing it"
        );
        self.inner.store.clear();
    }

    /// Sends a request and decodes the response body.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, NormalizedError> {
        let response = self
            .execute(request)
            .await
            .map_err(|failure| self.normalize(failure))?;
        decode(&response).map_err(|failure| self.normalize(failure))
    }

    /// Sends a request answered with an [`ApiResponse`] envelope.
    ///
    /// An envelope reporting `success: false` is a failure even on a 2xx
    /// status.
    pub async fn send_envelope<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<ApiResponse<T>, NormalizedError> {
        let response = self
            .execute(request)
            .await
            .map_err(|failure| self.normalize(failure))?;

        let envelope: ApiResponse<T> =
            decode(&response).map_err(|failure| self.normalize(failure))?;
        if !envelope.success {
            return Err(self.normalize(Failure::Rejected {
                status: response.status,
                message: envelope.message,
            }));
        }

        Ok(envelope)
    }
}

/// Decodes a JSON response body.
pub fn decode<T: DeserializeOwned>(response: &RawResponse) -> Result<T, Failure> {
    serde_json::from_slice(&response.body).map_err(|error| Failure::Decode {
        status: response.status,
        reason: error.to_string(),
    })
}

fn bearer_header(authorization: &str) -> Option<HeaderValue> {
    match HeaderValue::from_str(authorization) {
        Ok(mut value) => {
            value.set_sensitive(true);
            Some(value)
        }
        Err(_) => {
            tracing::warn!(
                target: TRACING_TARGET_CLIENT,
                "Stored access token is not a valid header value, ignoring it"
            );
            None
        }
    }
}

fn parse_base_url(api_url: &str) -> Result<Url> {
    let url = Url::parse(api_url).map_err(|error| Error::invalid_url(api_url, error))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_url(api_url, "scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(Error::invalid_url(api_url, "URL cannot be a base"));
    }

    Ok(url)
}
