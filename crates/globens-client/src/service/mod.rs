//! Resource services built on a shared [`ApiClient`].

mod auth;
mod banners;
mod games;
mod news;
mod profile;
mod servers;
mod teams;
mod tournaments;

use tokio_util::sync::CancellationToken;

pub use self::auth::AuthService;
pub use self::banners::BannersService;
pub use self::games::{DEFAULT_PER_PAGE, GamesService, ORIGIN_UNREACHABLE};
pub use self::news::NewsService;
pub use self::profile::ProfileService;
pub use self::servers::ServersService;
pub use self::teams::TeamsService;
pub use self::tournaments::TournamentsService;
use crate::ApiClient;

/// Entry point to every resource service.
///
/// All services handed out share the client, and with it the token store.
#[derive(Debug, Clone)]
pub struct Services {
    client: ApiClient,
}

impl Services {
    /// Creates the facade.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Returns a facade whose services abort their calls when `token` is
    /// cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self::new(self.client.with_cancellation(token))
    }

    /// The underlying client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.client.clone())
    }

    pub fn profile(&self) -> ProfileService {
        ProfileService::new(self.client.clone())
    }

    pub fn teams(&self) -> TeamsService {
        TeamsService::new(self.client.clone())
    }

    pub fn games(&self) -> GamesService {
        GamesService::new(self.client.clone())
    }

    pub fn news(&self) -> NewsService {
        NewsService::new(self.client.clone())
    }

    pub fn banners(&self) -> BannersService {
        BannersService::new(self.client.clone())
    }

    pub fn servers(&self) -> ServersService {
        ServersService::new(self.client.clone())
    }

    pub fn tournaments(&self) -> TournamentsService {
        TournamentsService::new(self.client.clone())
    }
}
