//! Games catalog.

use globens_core::{DataEnvelope, Failure, Result, TransportError};
use tokio_util::sync::CancellationToken;

use crate::model::{Game, GamesPage};
use crate::{ApiClient, ApiRequest, ResourceGroup, TRACING_TARGET_SERVICE};

/// Status the CDN in front of the backend answers with when the origin is
/// unreachable.
pub const ORIGIN_UNREACHABLE: u16 = 523;

/// Default page size of the catalog.
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Games catalog endpoints.
#[derive(Debug, Clone)]
pub struct GamesService {
    client: ApiClient,
}

impl GamesService {
    /// Creates the service.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Returns a service whose calls are aborted when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self::new(self.client.with_cancellation(token))
    }

    /// Lists one page of games.
    ///
    /// While the backend origin is unreachable an empty page is returned
    /// instead of an error.
    pub async fn list_games(&self, page: u32, per_page: u32) -> Result<GamesPage> {
        let request = ApiRequest::get(ResourceGroup::Games)
            .query("page", page)
            .query("per_page", per_page);

        match self.client.execute(request).await {
            Ok(response) => GamesPage::from_slice(&response.body).map_err(|error| {
                self.client.normalize(Failure::Decode {
                    status: response.status,
                    reason: error.to_string(),
                })
            }),
            Err(Failure::Transport(TransportError::Status {
                status: ORIGIN_UNREACHABLE,
                ..
            })) => {
                tracing::warn!(
                    target: TRACING_TARGET_SERVICE,
                    status = ORIGIN_UNREACHABLE,
                    "Games backend unreachable, returning an empty page"
                );
                Ok(GamesPage::empty(per_page))
            }
            Err(failure) => Err(self.client.normalize(failure)),
        }
    }

    /// Fetches one game by slug.
    pub async fn game(&self, slug: &str) -> Result<Game> {
        let request = ApiRequest::get(ResourceGroup::Games).segment(slug);
        let game: DataEnvelope<Game> = self.client.send(request).await?;
        Ok(game.data)
    }
}
