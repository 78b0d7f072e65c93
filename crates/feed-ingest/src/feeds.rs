use news_core::{NewsCategory, RssFeed};

/// Default feed table. Feeds are static configuration; the category set is
/// assigned here, never inferred from content.
pub fn default_feeds() -> Vec<RssFeed> {
    vec![
        RssFeed::new(
            "yahoo-finance",
            "Yahoo Finance",
            "https://finance.yahoo.com/news/rssindex",
            NewsCategory::Business,
        ),
        RssFeed::new(
            "cnbc-business",
            "CNBC Business",
            "https://www.cnbc.com/id/10001147/device/rss/rss.html",
            NewsCategory::Business,
        ),
        RssFeed::new(
            "npr-politics",
            "NPR Politics",
            "https://feeds.npr.org/1014/rss.xml",
            NewsCategory::Politics,
        ),
        RssFeed::new(
            "npr-world",
            "NPR World",
            "https://feeds.npr.org/1004/rss.xml",
            NewsCategory::World,
        ),
        RssFeed::new(
            "theverge",
            "The Verge",
            "https://www.theverge.com/rss/index.xml",
            NewsCategory::Technology,
        ),
    ]
}
