//! Profile of the signed-in user.

use globens_core::{ApiResponse, Failure, Result};
use tokio_util::sync::CancellationToken;

use crate::model::{Profile, ProfileUpdate, Upload};
use crate::{ApiClient, ApiRequest, MultipartForm, ResourceGroup, TRACING_TARGET_SERVICE};

/// Profile endpoints. Every call requires a stored session.
#[derive(Debug, Clone)]
pub struct ProfileService {
    client: ApiClient,
}

impl ProfileService {
    /// Creates the service.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Returns a service whose calls are aborted when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self::new(self.client.with_cancellation(token))
    }

    /// Fetches the profile. A response without profile data is an error.
    pub async fn get_profile(&self) -> Result<Profile> {
        let request = ApiRequest::get(ResourceGroup::Profile)
            .segment("me")
            .authenticated();
        let response = self.client.send_envelope::<Profile>(request).await?;

        let message = response.message;
        response.data.ok_or_else(|| {
            self.client.normalize(Failure::Rejected {
                status: 200,
                message,
            })
        })
    }

    /// Applies a partial update.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<ApiResponse<Profile>> {
        self.client.validate(update)?;

        let request = ApiRequest::put(ResourceGroup::Profile)
            .segment("me")
            .json(update)
            .authenticated();
        self.client.send_envelope(request).await
    }

    /// Uploads a new avatar image.
    pub async fn upload_avatar(&self, avatar: Upload) -> Result<ApiResponse<Profile>> {
        tracing::debug!(
            target: TRACING_TARGET_SERVICE,
            file_name = %avatar.file_name,
            len = avatar.bytes.len(),
            "Uploading avatar"
        );

        let form = MultipartForm::new().file(avatar.into_part("avatar"));
        let request = ApiRequest::post(ResourceGroup::Profile)
            .segment("avatar")
            .multipart(form)
            .authenticated();
        self.client.send_envelope(request).await
    }

    /// Removes the avatar image.
    pub async fn delete_avatar(&self) -> Result<ApiResponse<Profile>> {
        let request = ApiRequest::delete(ResourceGroup::Profile)
            .segment("avatar")
            .authenticated();
        self.client.send_envelope(request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use globens_core::{ErrorKind, Locale, Message, Session, TokenPayload};
    use globens_session::{MemoryTokenStore, TokenStore};
    use jiff::Timestamp;
    use reqwest::Method;
    use serde_json::json;

    use super::*;
    use crate::transport::MockTransport;
    use crate::{ClientConfig, RequestBody};

    fn service(store: Arc<dyn TokenStore>) -> (ProfileService, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        let config = ClientConfig::new("https://api.example.test/api/v1").with_locale(Locale::En);
        let client = ApiClient::with_transport(config, store, transport.clone()).unwrap();
        (ProfileService::new(client), transport)
    }

    fn signed_in() -> Arc<dyn TokenStore> {
        let session = Session::from_token(&TokenPayload::new("abc", 3600), Timestamp::now());
        Arc::new(MemoryTokenStore::with_session(session))
    }

    fn profile_response() -> serde_json::Value {
        json!({
            "success": true,
            "message": "OK",
            "message_type": "success",
            "data": {
                "username": "alice", "phone": "+998901234567", "status": "active",
                "full_name": "Alice", "avatar": "https://cdn/a.png", "email": "alice@globens.uz"
            }
        })
    }

    #[tokio::test]
    async fn test_get_profile() {
        let (profile, transport) = service(signed_in());
        transport.push_json(&profile_response());

        let me = profile.get_profile().await.unwrap();
        assert_eq!(me.username, "alice");

        let request = transport.last_request().unwrap();
        assert_eq!(request.path(), "/api/v1/profile/me");
        assert_eq!(request.authorization(), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn test_every_call_requires_session() {
        let (profile, transport) = service(Arc::new(MemoryTokenStore::new()));

        let errors = [
            profile.get_profile().await.unwrap_err(),
            profile
                .update_profile(&ProfileUpdate::default())
                .await
                .unwrap_err(),
            profile
                .upload_avatar(Upload::new("a.png", "image/png", vec![1]))
                .await
                .unwrap_err(),
            profile.delete_avatar().await.unwrap_err(),
        ];

        for error in errors {
            assert_eq!(error.kind(), ErrorKind::Precondition);
            assert_eq!(error.message(), Message::NotAuthenticated.text(Locale::En));
        }
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_profile_data_is_an_error() {
        let (profile, transport) = service(signed_in());
        transport.push_json(&json!({"success": true, "message": "Profile not found"}));

        let error = profile.get_profile().await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Backend);
        assert_eq!(error.message(), "Profile not found");
    }

    #[tokio::test]
    async fn test_update_profile_validation_errors_from_backend() {
        let (profile, transport) = service(signed_in());
        transport.push_status(
            422,
            r#"{"success":false,"message":"Validation failed","message_type":"error",
                "errors":[{"field":"username","message":"The username has already been taken."},
                          {"field":"email","message":"The email has already been taken."}]}"#,
        );

        let update = ProfileUpdate {
            username: Some("alice".into()),
            email: Some("alice@globens.uz".into()),
            ..ProfileUpdate::default()
        };
        let error = profile.update_profile(&update).await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.field_errors().len(), 2);
        assert!(error.message().contains("The username has already been taken."));
        assert!(error.message().contains("The email has already been taken."));

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(
            request.json().unwrap(),
            json!({"username": "alice", "email": "alice@globens.uz"})
        );
    }

    #[tokio::test]
    async fn test_update_profile_rejects_invalid_email_locally() {
        let (profile, transport) = service(signed_in());

        let update = ProfileUpdate {
            email: Some("nope".into()),
            ..ProfileUpdate::default()
        };
        let error = profile.update_profile(&update).await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Validation);
        assert!(error.field_error("email").is_some());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_avatar_is_multipart() {
        let (profile, transport) = service(signed_in());
        transport.push_json(&profile_response());

        profile
            .upload_avatar(Upload::new("me.png", "image/png", vec![1, 2, 3]))
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.path(), "/api/v1/profile/avatar");
        let RequestBody::Multipart(form) = request.body else {
            panic!("expected a multipart body");
        };
        assert_eq!(form.files[0].field, "avatar");
        assert_eq!(form.files[0].file_name, "me.png");
    }

    #[tokio::test]
    async fn test_session_expired_message() {
        let (profile, transport) = service(signed_in());
        transport.push_status(403, r#"{"message":"Forbidden"}"#);

        let error = profile.delete_avatar().await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Authentication);
        assert_eq!(error.message(), Message::SessionExpired.text(Locale::En));
    }
}
