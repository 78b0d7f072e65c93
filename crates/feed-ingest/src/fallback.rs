use chrono::Utc;
use news_core::{NewsCategory, NewsItem, SentimentAnalysis};

const FALLBACK_SOURCE: &str = "MarketSense Fallback";

/// Fixed substitute batch served when every feed comes back empty, so
/// downstream consumers always have something to render.
pub fn fallback_items() -> Vec<NewsItem> {
    let now = Utc::now();

    vec![
        NewsItem {
            id: "fallback-business-1".to_string(),
            title: "Markets React to Economic Data".to_string(),
            description:
                "Financial markets showed mixed reactions to the latest economic indicators."
                    .to_string(),
            content: None,
            source: FALLBACK_SOURCE.to_string(),
            url: "#".to_string(),
            image_url: None,
            published_at: now,
            category: NewsCategory::Business,
            sentiment: Some(SentimentAnalysis {
                score: 0.1,
                comparative: 0.1,
                positive: vec!["react".to_string()],
                negative: vec!["mixed".to_string()],
            }),
        },
        NewsItem {
            id: "fallback-politics-1".to_string(),
            title: "Government Announces New Policy Framework".to_string(),
            description: "A new policy framework aimed at economic growth was introduced today."
                .to_string(),
            content: None,
            source: FALLBACK_SOURCE.to_string(),
            url: "#".to_string(),
            image_url: None,
            published_at: now,
            category: NewsCategory::Politics,
            sentiment: Some(SentimentAnalysis {
                score: 0.2,
                comparative: 0.2,
                positive: vec!["growth".to_string()],
                negative: vec![],
            }),
        },
        NewsItem {
            id: "fallback-world-1".to_string(),
            title: "Global Markets Respond to International Developments".to_string(),
            description: "International markets are adjusting to new global economic realities."
                .to_string(),
            content: None,
            source: FALLBACK_SOURCE.to_string(),
            url: "#".to_string(),
            image_url: None,
            published_at: now,
            category: NewsCategory::World,
            sentiment: Some(SentimentAnalysis {
                score: -0.1,
                comparative: -0.1,
                positive: vec![],
                negative: vec!["adjusting".to_string()],
            }),
        },
        NewsItem {
            id: "fallback-technology-1".to_string(),
            title: "Tech Companies Announce Quarterly Results".to_string(),
            description: "Major technology companies have reported their quarterly earnings."
                .to_string(),
            content: None,
            source: FALLBACK_SOURCE.to_string(),
            url: "#".to_string(),
            image_url: None,
            published_at: now,
            category: NewsCategory::Technology,
            sentiment: Some(SentimentAnalysis::default()),
        },
    ]
}
