use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// News category, assigned per feed (not inferred from content)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Business,
    Politics,
    World,
    Technology,
    General,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 5] = [
        NewsCategory::Business,
        NewsCategory::Politics,
        NewsCategory::World,
        NewsCategory::Technology,
        NewsCategory::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::Business => "business",
            NewsCategory::Politics => "politics",
            NewsCategory::World => "world",
            NewsCategory::Technology => "technology",
            NewsCategory::General => "general",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsCategory {
    type Err = crate::IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "business" => Ok(NewsCategory::Business),
            "politics" => Ok(NewsCategory::Politics),
            "world" => Ok(NewsCategory::World),
            "technology" => Ok(NewsCategory::Technology),
            "general" => Ok(NewsCategory::General),
            other => Err(crate::IngestError::InvalidData(format!(
                "unknown news category: {}",
                other
            ))),
        }
    }
}

/// Sentiment analysis attached to a news item after scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    /// Clamped to [-1, 1]
    pub score: f64,
    /// Raw length-normalized score, unclamped
    pub comparative: f64,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

/// A single normalized news article
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub source: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub category: NewsCategory,
    /// Populated by the scorer; every item the aggregator returns has this set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentAnalysis>,
}

/// A configured RSS/Atom source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RssFeed {
    pub id: String,
    pub name: String,
    pub url: String,
    pub category: NewsCategory,
}

impl RssFeed {
    pub fn new(id: &str, name: &str, url: &str, category: NewsCategory) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            category,
        }
    }
}

/// One raw entry out of a parsed RSS/Atom feed; every field may be absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFeedItem {
    pub guid: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub pub_date: Option<String>,
    /// Plain-text summary (contentSnippet / description)
    pub summary: Option<String>,
    /// Full HTML body (content / content:encoded)
    pub content: Option<String>,
}

/// Discrete market mood label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketMood {
    Terrible,
    Bad,
    Neutral,
    Good,
    Great,
}

impl MarketMood {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketMood::Terrible => "Terrible",
            MarketMood::Bad => "Bad",
            MarketMood::Neutral => "Neutral",
            MarketMood::Good => "Good",
            MarketMood::Great => "Great",
        }
    }
}

impl fmt::Display for MarketMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single current market-mood value derived from recent news sentiment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketIndicator {
    /// -1 (extreme fear) to 1 (extreme greed)
    pub value: f64,
    pub label: MarketMood,
    pub timestamp: DateTime<Utc>,
}

/// One timestamped snapshot of aggregate sentiment (overall + per category)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentHistoryPoint {
    /// Epoch milliseconds
    pub timestamp: i64,
    /// Overall average sentiment, rounded to 2 decimals
    pub value: f64,
    /// Size of the contributing batch
    pub news_count: usize,
    /// Per-category averages, independently rounded
    pub category_sentiment: BTreeMap<NewsCategory, f64>,
}

/// Current quote for a symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: i64,
}

/// Market index snapshot (price proxied through a tracking ETF)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIndex {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub timestamp: DateTime<Utc>,
}

/// One point in a price time series
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    /// Date label as the provider reports it (daily: YYYY-MM-DD)
    pub date: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
}

/// Quote plus market cap, used for gainer/loser rankings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMover {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: i64,
    pub market_cap: f64,
}
