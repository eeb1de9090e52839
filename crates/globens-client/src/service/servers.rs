//! Game servers.

use globens_core::Result;
use tokio_util::sync::CancellationToken;

use crate::model::ServersPage;
use crate::{ApiClient, ApiRequest, ResourceGroup};

/// Game servers browser.
#[derive(Debug, Clone)]
pub struct ServersService {
    client: ApiClient,
}

impl ServersService {
    /// Creates the service.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Returns a service whose calls are aborted when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self::new(self.client.with_cancellation(token))
    }

    /// Lists one page of servers.
    pub async fn list_servers(&self, page: u32) -> Result<ServersPage> {
        let request = ApiRequest::get(ResourceGroup::Servers).query("page", page);
        self.client.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use globens_core::{ErrorKind, Locale};
    use globens_session::MemoryTokenStore;
    use serde_json::json;

    use super::*;
    use crate::ClientConfig;
    use crate::transport::MockTransport;

    fn service() -> (ServersService, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        let config = ClientConfig::new("https://api.example.test/api/v1").with_locale(Locale::En);
        let client =
            ApiClient::with_transport(config, Arc::new(MemoryTokenStore::new()), transport.clone())
                .unwrap();
        (ServersService::new(client), transport)
    }

    #[tokio::test]
    async fn test_list_servers() {
        let (servers, transport) = service();
        transport.push_json(&json!({
            "data": [{"id": 7, "url": "cs.globens.uz:27015", "game_id": 2, "name": "Public"}],
            "links": {"next": null},
            "meta": {"current_page": [3]}
        }));

        let page = servers.list_servers(3).await.unwrap();
        assert_eq!(page.data[0].id, 7);
        assert!(!page.has_next());

        let request = transport.last_request().unwrap();
        assert_eq!(request.path(), "/api/v1/servers");
        assert_eq!(request.url.query(), Some("page=3"));
    }

    #[tokio::test]
    async fn test_malformed_listing_is_an_error() {
        let (servers, transport) = service();
        transport.push_json(&json!({"data": "maintenance"}));

        let error = servers.list_servers(1).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unknown);
    }
}
