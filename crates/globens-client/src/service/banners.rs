//! Home page banners.

use globens_core::{DataEnvelope, Result};
use tokio_util::sync::CancellationToken;

use crate::model::Banner;
use crate::{ApiClient, ApiRequest, ResourceGroup};

/// Home page banners.
#[derive(Debug, Clone)]
pub struct BannersService {
    client: ApiClient,
}

impl BannersService {
    /// Creates the service.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Returns a service whose calls are aborted when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self::new(self.client.with_cancellation(token))
    }

    /// Lists banners sorted by their display order.
    pub async fn list_banners(&self) -> Result<Vec<Banner>> {
        let banners: DataEnvelope<Vec<Banner>> =
            self.client.send(ApiRequest::get(ResourceGroup::Banners)).await?;

        let mut banners = banners.data;
        banners.sort_by_key(|banner| banner.order);
        Ok(banners)
    }
}
