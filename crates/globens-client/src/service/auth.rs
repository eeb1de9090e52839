//! Account registration, login and session lifecycle.

use globens_core::{ApiResponse, Precondition, Result, Session};
use jiff::Timestamp;
use tokio_util::sync::CancellationToken;

use crate::model::{AuthData, ConfirmPhone, Login, RefreshRequest, Register, ResendOtp};
use crate::{ApiClient, ApiRequest, ResourceGroup, TRACING_TARGET_SERVICE};

/// Authentication endpoints and the local session they manage.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    /// Creates the service.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Returns a service whose calls are aborted when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self::new(self.client.with_cancellation(token))
    }

    /// Registers a new account. No session is created until the phone is
    /// confirmed.
    pub async fn register(&self, payload: &Register) -> Result<ApiResponse<AuthData>> {
        self.client.validate(payload)?;

        let request = ApiRequest::post(ResourceGroup::Auth)
            .segment("register")
            .json(payload);
        self.client.send_envelope(request).await
    }

    /// Logs in and stores the returned session.
    pub async fn login(&self, payload: &Login) -> Result<ApiResponse<AuthData>> {
        self.client.validate(payload)?;

        let request = ApiRequest::post(ResourceGroup::Auth)
            .segment("login")
            .json(payload);
        let response = self.client.send_envelope(request).await?;
        self.store_session(&response, "login");
        Ok(response)
    }

    /// Confirms a phone number with a one-time password and stores the
    /// returned session.
    pub async fn confirm_phone(&self, payload: &ConfirmPhone) -> Result<ApiResponse<AuthData>> {
        self.client.validate(payload)?;

        let request = ApiRequest::post(ResourceGroup::Auth)
            .segment("confirm-phone")
            .json(payload);
        let response = self.client.send_envelope(request).await?;
        self.store_session(&response, "confirm_phone");
        Ok(response)
    }

    /// Sends a new one-time password.
    pub async fn resend_otp(&self, payload: &ResendOtp) -> Result<ApiResponse<AuthData>> {
        self.client.validate(payload)?;

        let request = ApiRequest::post(ResourceGroup::Auth)
            .segment("resend-otp")
            .json(payload);
        self.client.send_envelope(request).await
    }

    /// Exchanges the stored refresh token for a new session.
    ///
    /// Fails locally when no session or no usable refresh token is stored.
    pub async fn refresh(&self) -> Result<ApiResponse<AuthData>> {
        let store = self.client.store();
        let Some(session) = store.load() else {
            return Err(self.client.normalize(Precondition::NotAuthenticated.into()));
        };
        let Some(refresh_token) = session.refresh_token_at(Timestamp::now()) else {
            return Err(self.client.normalize(Precondition::NoRefreshToken.into()));
        };

        let payload = RefreshRequest {
            refresh_token: refresh_token.to_owned(),
        };
        let request = ApiRequest::post(ResourceGroup::Auth)
            .segment("refresh")
            .json(&payload);
        let response = self.client.send_envelope(request).await?;
        self.store_session(&response, "refresh");
        Ok(response)
    }

    /// Invalidates the session on the server, then clears it locally.
    ///
    /// The local session is cleared whatever the outcome of the server call.
    pub async fn logout(&self) -> Result<ApiResponse<serde_json::Value>> {
        let request = ApiRequest::post(ResourceGroup::Auth).segment("logout");
        let result = self.client.send_envelope(request).await;

        self.logout_local();

        if let Err(error) = &result {
            tracing::debug!(
                target: TRACING_TARGET_SERVICE,
                kind = %error.kind(),
                "Server logout failed, local session cleared anyway"
            );
        }

        result
    }

    /// Clears the local session without contacting the server.
    pub fn logout_local(&self) {
        self.client.store().clear();

        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            "Logged out"
        );
    }

    /// Current access token, if a usable session is stored.
    pub fn access_token(&self) -> Option<String> {
        self.client.store().read()
    }

    /// Returns whether a usable session is stored.
    pub fn is_authenticated(&self) -> bool {
        self.client.store().is_authenticated()
    }

    fn store_session(&self, response: &ApiResponse<AuthData>, operation: &'static str) {
        let Some(token) = response.data.as_ref().and_then(|data| data.token.as_ref()) else {
            tracing::debug!(
                target: TRACING_TARGET_SERVICE,
                operation,
                "Response carried no token, session unchanged"
            );
            return;
        };

        let session = Session::from_token(token, Timestamp::now());
        self.client.store().write(&session);

        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            operation,
            expires_at = %session.expires_at,
            has_refresh_token = session.refresh_token.is_some(),
            "Session stored"
        );
    }
}
