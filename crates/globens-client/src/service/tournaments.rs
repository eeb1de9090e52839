//! Tournaments.

use globens_core::{DataEnvelope, Failure, Paginated, Result};
use tokio_util::sync::CancellationToken;

use crate::model::{
    Tournament, TournamentDetail, TournamentRegistration, TournamentRegistrationResponse,
};
use crate::{ApiClient, ApiRequest, ResourceGroup, TRACING_TARGET_SERVICE, decode};

/// Tournament listing, details and team registration.
#[derive(Debug, Clone)]
pub struct TournamentsService {
    client: ApiClient,
}

impl TournamentsService {
    /// Creates the service.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Returns a service whose calls are aborted when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self::new(self.client.with_cancellation(token))
    }

    /// Lists tournaments.
    pub async fn list_tournaments(&self) -> Result<Paginated<Tournament>> {
        self.client
            .send(ApiRequest::get(ResourceGroup::Tournaments))
            .await
    }

    /// Fetches a tournament with its matches, participants and prizes.
    pub async fn tournament(&self, tournament_id: u64) -> Result<TournamentDetail> {
        let request = ApiRequest::get(ResourceGroup::Tournaments).segment(tournament_id);
        let detail: DataEnvelope<TournamentDetail> = self.client.send(request).await?;
        Ok(detail.data)
    }

    /// Registers a team. A response with `success: false` is an error.
    pub async fn register(
        &self,
        tournament_id: u64,
        registration: &TournamentRegistration,
    ) -> Result<TournamentRegistrationResponse> {
        self.client.validate(registration)?;

        tracing::debug!(
            target: TRACING_TARGET_SERVICE,
            tournament_id,
            team_name = %registration.team_name,
            players = registration.players.len(),
            "Registering for tournament"
        );

        let request = ApiRequest::post(ResourceGroup::Tournaments)
            .segment(tournament_id)
            .segment("register")
            .json(registration);
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|failure| self.client.normalize(failure))?;

        let registered: TournamentRegistrationResponse =
            decode(&response).map_err(|failure| self.client.normalize(failure))?;
        if !registered.success {
            return Err(self.client.normalize(Failure::Rejected {
                status: response.status,
                message: registered.message,
            }));
        }

        Ok(registered)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use globens_core::{ErrorKind, Locale, Session, TokenPayload};
    use globens_session::{MemoryTokenStore, TokenStore};
    use jiff::Timestamp;
    use reqwest::Method;
    use serde_json::json;

    use super::*;
    use crate::ClientConfig;
    use crate::model::TournamentStatus;
    use crate::transport::MockTransport;

    fn service(store: Arc<dyn TokenStore>) -> (TournamentsService, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        let config = ClientConfig::new("https://api.example.test/api/v1").with_locale(Locale::En);
        let client = ApiClient::with_transport(config, store, transport.clone()).unwrap();
        (TournamentsService::new(client), transport)
    }

    fn anonymous() -> Arc<dyn TokenStore> {
        Arc::new(MemoryTokenStore::new())
    }

    fn tournament() -> serde_json::Value {
        json!({
            "id": 1, "name": "Globens CS2 Championship", "game": "Counter-Strike 2",
            "gameSlug": "cs2", "prize": "$50,000", "teams": 12, "startDate": "2025-11-15",
            "endDate": "2025-12-15", "status": "upcoming", "maxTeams": 32,
            "format": "double_elimination", "location": "offline"
        })
    }

    fn registration() -> TournamentRegistration {
        TournamentRegistration {
            team_name: "Team Alpha".into(),
            players: vec!["alice".into(), "bob".into()],
            captain_email: "alice@globens.uz".into(),
        }
    }

    #[tokio::test]
    async fn test_list_tournaments() {
        let (tournaments, transport) = service(anonymous());
        transport.push_json(&json!({"data": [tournament()]}));

        let page = tournaments.list_tournaments().await.unwrap();
        assert_eq!(page.data[0].status, TournamentStatus::Upcoming);
        assert!(!page.data[0].is_full());
        assert_eq!(
            transport.last_request().unwrap().path(),
            "/api/v1/tournaments"
        );
    }

    #[tokio::test]
    async fn test_tournament_detail() {
        let (tournaments, transport) = service(anonymous());
        let mut detail = tournament();
        detail["participants"] = json!([]);
        transport.push_json(&json!({"data": detail}));

        let detail = tournaments.tournament(1).await.unwrap();
        assert_eq!(detail.tournament.game_slug, "cs2");
        assert!(detail.matches.is_empty());
        assert_eq!(
            transport.last_request().unwrap().path(),
            "/api/v1/tournaments/1"
        );
    }

    #[tokio::test]
    async fn test_register_sends_camel_case_payload() {
        let (tournaments, transport) = service(anonymous());
        transport.push_json(&json!({"success": true, "message": "Registered", "teamId": 55}));

        let registered = tournaments.register(1, &registration()).await.unwrap();
        assert_eq!(registered.team_id, Some(55));

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path(), "/api/v1/tournaments/1/register");
        assert!(request.authorization().is_none());
        assert_eq!(
            request.json().unwrap(),
            json!({
                "teamName": "Team Alpha",
                "players": ["alice", "bob"],
                "captainEmail": "alice@globens.uz"
            })
        );
    }

    #[tokio::test]
    async fn test_register_attaches_token_when_signed_in() {
        let session = Session::from_token(&TokenPayload::new("abc", 3600), Timestamp::now());
        let (tournaments, transport) =
            service(Arc::new(MemoryTokenStore::with_session(session)));
        transport.push_json(&json!({"success": true, "message": "Registered"}));

        tournaments.register(1, &registration()).await.unwrap();
        assert_eq!(
            transport.last_request().unwrap().authorization(),
            Some("Bearer abc")
        );
    }

    #[tokio::test]
    async fn test_register_validates_locally() {
        let (tournaments, transport) = service(anonymous());

        let invalid = TournamentRegistration {
            players: Vec::new(),
            ..registration()
        };
        let error = tournaments.register(1, &invalid).await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Validation);
        assert!(error.field_error("players").is_some());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_register_refused() {
        let (tournaments, transport) = service(anonymous());
        transport.push_json(&json!({"success": false, "message": "Registration is closed"}));

        let error = tournaments.register(1, &registration()).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Backend);
        assert_eq!(error.message(), "Registration is closed");
    }
}
