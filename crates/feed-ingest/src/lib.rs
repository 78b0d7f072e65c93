//! Feed ingestion: fetch configured RSS/Atom sources, normalize them into
//! the uniform item shape, and hand back a merged, sorted, sentiment-scored
//! batch. Individual feed failures degrade the batch; they never abort it.

use std::sync::Arc;

use futures_util::future::join_all;
use news_core::{FeedTransport, IngestError, NewsCategory, NewsItem, RssFeed};
use sentiment_engine::SentimentScorer;

pub mod fallback;
pub mod feeds;
pub mod normalize;
pub mod parse;
pub mod transport;

pub use fallback::fallback_items;
pub use feeds::default_feeds;
pub use normalize::normalize;
pub use parse::parse_feed;
pub use transport::HttpFeedTransport;

pub struct NewsAggregator {
    transport: Arc<dyn FeedTransport>,
    scorer: SentimentScorer,
    feeds: Vec<RssFeed>,
}

impl NewsAggregator {
    pub fn new(transport: Arc<dyn FeedTransport>, feeds: Vec<RssFeed>) -> Self {
        Self {
            transport,
            scorer: SentimentScorer::default(),
            feeds,
        }
    }

    pub fn with_scorer(mut self, scorer: SentimentScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn feeds(&self) -> &[RssFeed] {
        &self.feeds
    }

    /// Fetch every configured feed concurrently and return one scored batch,
    /// newest first. Never returns an empty batch: total feed failure
    /// substitutes the fallback items.
    pub async fn fetch_all(&self) -> Vec<NewsItem> {
        let items = self.fetch_feeds(&self.feeds).await;
        self.finish_batch(items, None)
    }

    /// Same as [`fetch_all`](Self::fetch_all) restricted to feeds of one
    /// category. No configured feed for the category short-circuits to the
    /// category's fallback items.
    pub async fn fetch_by_category(&self, category: NewsCategory) -> Vec<NewsItem> {
        let feeds: Vec<RssFeed> = self
            .feeds
            .iter()
            .filter(|f| f.category == category)
            .cloned()
            .collect();

        if feeds.is_empty() {
            tracing::warn!("no feeds configured for category {}", category);
            return self.finish_batch(Vec::new(), Some(category));
        }

        let items = self.fetch_feeds(&feeds).await;
        self.finish_batch(items, Some(category))
    }

    async fn fetch_feeds(&self, feeds: &[RssFeed]) -> Vec<NewsItem> {
        let fetches = feeds.iter().map(|feed| async move {
            match self.fetch_feed(feed).await {
                Ok(items) => {
                    tracing::info!("fetched {} items from {}", items.len(), feed.name);
                    items
                }
                Err(e) => {
                    tracing::warn!("feed {} unavailable: {}", feed.name, e);
                    Vec::new()
                }
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }

    /// Direct fetch, then one proxy retry, then parse + normalize.
    async fn fetch_feed(&self, feed: &RssFeed) -> Result<Vec<NewsItem>, IngestError> {
        let text = match self.transport.fetch_feed_text(&feed.url).await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("direct fetch failed for {} ({}), trying proxy", feed.name, e);
                self.transport.fetch_feed_text_via_proxy(&feed.url).await?
            }
        };

        let raw = parse::parse_feed(&text)?;
        if raw.is_empty() {
            tracing::debug!("no items in feed {}", feed.name);
            return Ok(Vec::new());
        }

        Ok(normalize::normalize(feed, raw))
    }

    /// Merge policy: substitute fallbacks for an empty batch, sort newest
    /// first, then score every item; sentiment is mandatory from here on.
    fn finish_batch(&self, mut items: Vec<NewsItem>, category: Option<NewsCategory>) -> Vec<NewsItem> {
        if items.is_empty() {
            tracing::warn!("empty batch, substituting fallback items");
            items = fallback::fallback_items();
            if let Some(category) = category {
                items.retain(|i| i.category == category);
            }
        }

        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        self.scorer.process_batch(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    /// Transport stub: canned responses per path, no network.
    struct StubTransport {
        direct: Result<String, String>,
        proxy: Result<String, String>,
    }

    #[async_trait]
    impl FeedTransport for StubTransport {
        async fn fetch_feed_text(&self, _url: &str) -> Result<String, IngestError> {
            self.direct
                .clone()
                .map_err(IngestError::Transport)
        }

        async fn fetch_feed_text_via_proxy(&self, _url: &str) -> Result<String, IngestError> {
            self.proxy
                .clone()
                .map_err(IngestError::Transport)
        }
    }

    fn rss_with_items(titles: &[(&str, &str)]) -> String {
        let items: String = titles
            .iter()
            .map(|(title, pub_date)| {
                format!(
                    "<item><title>{}</title><link>https://example.com/{}</link><pubDate>{}</pubDate></item>",
                    title,
                    title.to_lowercase().replace(' ', "-"),
                    pub_date
                )
            })
            .collect();
        format!(
            "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>t</title>\
             <link>https://example.com</link><description>d</description>{}</channel></rss>",
            items
        )
    }

    fn one_feed() -> Vec<RssFeed> {
        vec![RssFeed::new(
            "stub",
            "Stub Feed",
            "https://example.com/rss",
            NewsCategory::Business,
        )]
    }

    #[tokio::test]
    async fn test_fetch_all_scores_and_sorts() {
        let xml = rss_with_items(&[
            ("Older rally", "Mon, 03 Aug 2026 10:00:00 GMT"),
            ("Newer crash", "Mon, 03 Aug 2026 12:00:00 GMT"),
        ]);
        let aggregator = NewsAggregator::new(
            Arc::new(StubTransport {
                direct: Ok(xml),
                proxy: Err("unused".to_string()),
            }),
            one_feed(),
        );

        let batch = aggregator.fetch_all().await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].title, "Newer crash");
        assert!(batch.iter().all(|i| i.sentiment.is_some()));
        assert!(batch[0].published_at > batch[1].published_at);
    }

    #[tokio::test]
    async fn test_proxy_fallback_delivers_items() {
        let xml = rss_with_items(&[("Via proxy", "Mon, 03 Aug 2026 10:00:00 GMT")]);
        let aggregator = NewsAggregator::new(
            Arc::new(StubTransport {
                direct: Err("connection refused".to_string()),
                proxy: Ok(xml),
            }),
            one_feed(),
        );

        let batch = aggregator.fetch_all().await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].title, "Via proxy");
    }

    #[tokio::test]
    async fn test_total_failure_yields_scored_fallbacks() {
        let aggregator = NewsAggregator::new(
            Arc::new(StubTransport {
                direct: Err("down".to_string()),
                proxy: Err("also down".to_string()),
            }),
            one_feed(),
        );

        let batch = aggregator.fetch_all().await;
        assert!(!batch.is_empty());
        assert!(batch.iter().all(|i| i.sentiment.is_some()));
        assert!(batch.iter().any(|i| i.id.starts_with("fallback-")));
    }

    #[tokio::test]
    async fn test_category_fetch_filters_fallbacks() {
        let aggregator = NewsAggregator::new(
            Arc::new(StubTransport {
                direct: Err("down".to_string()),
                proxy: Err("down".to_string()),
            }),
            one_feed(),
        );

        let batch = aggregator.fetch_by_category(NewsCategory::Business).await;
        assert!(!batch.is_empty());
        assert!(batch.iter().all(|i| i.category == NewsCategory::Business));

        // no politics feed configured: category-filtered fallbacks
        let batch = aggregator.fetch_by_category(NewsCategory::Politics).await;
        assert!(!batch.is_empty());
        assert!(batch.iter().all(|i| i.category == NewsCategory::Politics));
    }

    #[tokio::test]
    async fn test_one_bad_feed_does_not_poison_batch() {
        // two feeds share the stub transport; garbage parses as an error on
        // both paths, so the healthy feed alone fills the batch
        struct SplitTransport;

        #[async_trait]
        impl FeedTransport for SplitTransport {
            async fn fetch_feed_text(&self, url: &str) -> Result<String, IngestError> {
                if url.contains("good") {
                    Ok(rss_with_items(&[("Healthy gain", "Mon, 03 Aug 2026 10:00:00 GMT")]))
                } else {
                    Ok("<<<garbage".to_string())
                }
            }

            async fn fetch_feed_text_via_proxy(&self, _url: &str) -> Result<String, IngestError> {
                Err(IngestError::Transport("no proxy".to_string()))
            }
        }

        let feeds = vec![
            RssFeed::new("good", "Good Feed", "https://example.com/good", NewsCategory::Business),
            RssFeed::new("bad", "Bad Feed", "https://example.com/bad", NewsCategory::World),
        ];
        let aggregator = NewsAggregator::new(Arc::new(SplitTransport), feeds);

        let batch = aggregator.fetch_all().await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].title, "Healthy gain");
    }

    #[tokio::test]
    async fn test_recent_items_feed_the_indicator_window() {
        // items normalized without a pubDate land at ingestion time, inside
        // the indicator's 24h window
        let xml = "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>t</title>\
                   <link>l</link><description>d</description>\
                   <item><title>Undated surge</title></item></channel></rss>";
        let aggregator = NewsAggregator::new(
            Arc::new(StubTransport {
                direct: Ok(xml.to_string()),
                proxy: Err("unused".to_string()),
            }),
            one_feed(),
        );

        let batch = aggregator.fetch_all().await;
        assert_eq!(batch.len(), 1);
        assert!(Utc::now() - batch[0].published_at < Duration::minutes(1));
    }
}
