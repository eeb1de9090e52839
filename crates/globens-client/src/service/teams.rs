//! Teams.

use globens_core::{Paginated, Result};
use tokio_util::sync::CancellationToken;

use crate::model::{CreateTeamResponse, JoinTeamResponse, NewTeam, Team};
use crate::{ApiClient, ApiRequest, ResourceGroup, TRACING_TARGET_SERVICE};

/// Team listing, creation and membership.
#[derive(Debug, Clone)]
pub struct TeamsService {
    client: ApiClient,
}

impl TeamsService {
    /// Creates the service.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Returns a service whose calls are aborted when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self::new(self.client.with_cancellation(token))
    }

    /// Lists teams. The bearer token is sent when a session is stored.
    pub async fn list_teams(&self) -> Result<Paginated<Team>> {
        self.client.send(ApiRequest::get(ResourceGroup::Teams)).await
    }

    /// Creates a team, uploading its avatar in the same request.
    ///
    /// Any 2xx status means the team was created, whether or not the
    /// response echoes it back.
    pub async fn create_team(&self, team: NewTeam) -> Result<CreateTeamResponse> {
        self.client.validate(&team)?;

        tracing::debug!(
            target: TRACING_TARGET_SERVICE,
            name = %team.name,
            game_id = %team.game_id,
            has_avatar = team.avatar.is_some(),
            "Creating team"
        );

        let request = ApiRequest::post(ResourceGroup::Teams)
            .multipart(team.into_form())
            .authenticated();
        self.client.send(request).await
    }

    /// Joins the team with the given id.
    pub async fn join_team(&self, team_id: u64) -> Result<JoinTeamResponse> {
        let request = ApiRequest::post(ResourceGroup::Teams)
            .segment(team_id)
            .segment("join")
            .authenticated();
        self.client.send(request).await
    }
}
