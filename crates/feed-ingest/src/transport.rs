use std::time::Duration;

use async_trait::async_trait;
use news_core::{FeedTransport, IngestError};
use reqwest::Client;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; MarketSense/1.0)";
const ACCEPT: &str = "application/rss+xml, application/atom+xml, application/xml, text/xml, */*";

/// Feed transport over plain HTTP. The proxy path re-issues the request
/// through a same-origin endpoint (`{proxy_base}?url=<feed url>`) so the
/// server side can get past CORS-restricted or bot-hostile feed hosts.
#[derive(Clone)]
pub struct HttpFeedTransport {
    client: Client,
    proxy_base: Option<String>,
}

impl HttpFeedTransport {
    pub fn new() -> Self {
        Self::with_proxy(None)
    }

    pub fn with_proxy(proxy_base: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, proxy_base }
    }

    async fn get_text(&self, builder: reqwest::RequestBuilder) -> Result<String, IngestError> {
        let response = builder
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
            .send()
            .await
            .map_err(|e| IngestError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IngestError::Transport(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| IngestError::Transport(e.to_string()))
    }
}

impl Default for HttpFeedTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedTransport for HttpFeedTransport {
    async fn fetch_feed_text(&self, url: &str) -> Result<String, IngestError> {
        self.get_text(self.client.get(url)).await
    }

    async fn fetch_feed_text_via_proxy(&self, url: &str) -> Result<String, IngestError> {
        let base = self.proxy_base.as_deref().ok_or_else(|| {
            IngestError::Transport("no proxy endpoint configured".to_string())
        })?;

        self.get_text(self.client.get(base).query(&[("url", url)]))
            .await
    }
}
