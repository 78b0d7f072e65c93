use async_trait::async_trait;

use crate::IngestError;

/// Transport for fetching raw feed text. The direct path goes straight to the
/// feed host; the proxy path forwards through a same-origin endpoint that
/// re-issues the request server-side (CORS/anti-bot workarounds live behind
/// this contract, not in the aggregator).
#[async_trait]
pub trait FeedTransport: Send + Sync {
    async fn fetch_feed_text(&self, url: &str) -> Result<String, IngestError>;

    async fn fetch_feed_text_via_proxy(&self, url: &str) -> Result<String, IngestError>;
}
