//! News articles.

use globens_core::{DataEnvelope, Paginated, Result};
use tokio_util::sync::CancellationToken;

use crate::model::NewsItem;
use crate::{ApiClient, ApiRequest, ResourceGroup};

/// News articles.
#[derive(Debug, Clone)]
pub struct NewsService {
    client: ApiClient,
}

impl NewsService {
    /// Creates the service.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Returns a service whose calls are aborted when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self::new(self.client.with_cancellation(token))
    }

    /// Lists one page of articles, newest first.
    pub async fn list_news(&self, page: u32, per_page: u32) -> Result<Paginated<NewsItem>> {
        let request = ApiRequest::get(ResourceGroup::News)
            .query("page", page)
            .query("per_page", per_page);
        self.client.send(request).await
    }

    /// Fetches one article by slug.
    pub async fn news(&self, slug: &str) -> Result<NewsItem> {
        let request = ApiRequest::get(ResourceGroup::News).segment(slug);
        let item: DataEnvelope<NewsItem> = self.client.send(request).await?;
        Ok(item.data)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use globens_core::{ErrorKind, Locale, Message};
    use globens_session::MemoryTokenStore;
    use serde_json::json;

    use super::*;
    use crate::ClientConfig;
    use crate::transport::{MockTransport, TransportError};

    fn service(locale: Locale) -> (NewsService, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        let config = ClientConfig::new("https://api.example.test/api/v1").with_locale(locale);
        let client =
            ApiClient::with_transport(config, Arc::new(MemoryTokenStore::new()), transport.clone())
                .unwrap();
        (NewsService::new(client), transport)
    }

    #[tokio::test]
    async fn test_list_news() {
        let (news, transport) = service(Locale::En);
        transport.push_json(&json!({
            "data": [{"id": 1, "title": "Finals", "slug": "finals"}],
            "links": {"next": "/news?page=3"},
            "meta": {"current_page": 2, "last_page": 3, "per_page": 5, "total": 11}
        }));

        let page = news.list_news(2, 5).await.unwrap();
        assert_eq!(page.data[0].slug, "finals");
        assert!(page.has_next());

        let request = transport.last_request().unwrap();
        assert_eq!(request.path(), "/api/v1/news");
        assert_eq!(request.url.query(), Some("page=2&per_page=5"));
        assert_eq!(
            request.headers.get("accept-language").unwrap(),
            Locale::En.as_str()
        );
    }

    #[tokio::test]
    async fn test_news_by_slug() {
        let (news, transport) = service(Locale::Uz);
        transport.push_json(&json!({"data": {"id": 3, "title": "Patch", "slug": "patch-notes"}}));

        let item = news.news("patch-notes").await.unwrap();
        assert_eq!(item.id, 3);
        assert_eq!(
            transport.last_request().unwrap().path(),
            "/api/v1/news/patch-notes"
        );
    }

    #[tokio::test]
    async fn test_network_failure_is_localized() {
        let (news, transport) = service(Locale::Ru);
        transport.push_error(TransportError::network("connection reset"));

        let error = news.list_news(1, 15).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Connectivity);
        assert_eq!(error.message(), Message::NoConnection.text(Locale::Ru));
    }
}
