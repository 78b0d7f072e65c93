use news_core::{NewsCategory, NewsItem};

/// Keywords suggesting positive market movement
const POSITIVE_KEYWORDS: &[&str] = &[
    "growth",
    "profit",
    "gain",
    "surge",
    "rise",
    "increase",
    "up",
    "higher",
    "rally",
    "bull",
    "bullish",
    "rebound",
    "recovery",
    "boom",
    "exceed expectations",
    "outperform",
    "beat",
    "strong",
    "positive",
    "optimistic",
    "confidence",
    "dividend",
    "upgrade",
    "innovation",
    "expansion",
    "acquisition",
    "merger",
];

/// Keywords suggesting negative market movement
const NEGATIVE_KEYWORDS: &[&str] = &[
    "decline",
    "loss",
    "drop",
    "fall",
    "plunge",
    "decrease",
    "down",
    "lower",
    "slump",
    "bear",
    "bearish",
    "recession",
    "crisis",
    "crash",
    "miss expectations",
    "underperform",
    "weak",
    "negative",
    "pessimistic",
    "fear",
    "concern",
    "worry",
    "warning",
    "downgrade",
    "layoff",
    "restructuring",
    "bankruptcy",
    "lawsuit",
    "investigation",
];

/// Financial metrics that flag potentially important news
const METRIC_KEYWORDS: &[&str] = &[
    "earnings",
    "revenue",
    "sales",
    "profit",
    "margin",
    "forecast",
    "guidance",
    "outlook",
    "projection",
    "target",
    "estimate",
    "quarter",
    "annual",
    "fiscal",
    "eps",
    "pe ratio",
    "market cap",
    "valuation",
    "debt",
    "cash flow",
];

/// Market events and conditions
const EVENT_KEYWORDS: &[&str] = &[
    "announcement",
    "report",
    "release",
    "conference",
    "statement",
    "testimony",
    "meeting",
    "vote",
    "decision",
    "approval",
    "rejection",
    "launch",
    "debut",
    "ipo",
    "offering",
    "split",
    "dividend",
    "buyback",
    "acquisition",
    "merger",
    "takeover",
    "spinoff",
    "regulation",
    "policy",
    "law",
    "bill",
    "act",
];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Whether an item is likely relevant to market sentiment aggregation.
///
/// An item qualifies if ANY of the three conditions holds:
/// 1. business category with a positive/negative/metric keyword;
/// 2. non-business category with strong sentiment (|score| > 0.25) and a
///    positive/negative/event keyword;
/// 3. strong sentiment alone, regardless of category or keywords.
///
/// The third condition overlaps the second; the disjunction is kept as-is
/// so the truth table matches existing behavior exactly.
pub fn is_market_impacting(item: &NewsItem) -> bool {
    let text = format!("{} {}", item.title, item.description).to_lowercase();

    let has_positive = contains_any(&text, POSITIVE_KEYWORDS);
    let has_negative = contains_any(&text, NEGATIVE_KEYWORDS);
    let has_metric = contains_any(&text, METRIC_KEYWORDS);
    let has_event = contains_any(&text, EVENT_KEYWORDS);

    let has_strong_sentiment = item
        .sentiment
        .as_ref()
        .map(|s| s.score.abs() > 0.25)
        .unwrap_or(false);

    let is_business_with_keywords = item.category == NewsCategory::Business
        && (has_positive || has_negative || has_metric);

    let is_significant_non_business = item.category != NewsCategory::Business
        && has_strong_sentiment
        && (has_positive || has_negative || has_event);

    is_business_with_keywords || is_significant_non_business || has_strong_sentiment
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use news_core::SentimentAnalysis;

    fn item(
        title: &str,
        category: NewsCategory,
        score: Option<f64>,
    ) -> NewsItem {
        NewsItem {
            id: "test".to_string(),
            title: title.to_string(),
            description: String::new(),
            content: None,
            source: "Test".to_string(),
            url: "#".to_string(),
            image_url: None,
            published_at: Utc::now(),
            category,
            sentiment: score.map(|s| SentimentAnalysis {
                score: s,
                comparative: s,
                positive: vec![],
                negative: vec![],
            }),
        }
    }

    #[test]
    fn test_business_with_keyword_weak_sentiment() {
        // business + "surge" keyword qualifies even at score 0.1
        let it = item("Prices surge", NewsCategory::Business, Some(0.1));
        assert!(is_market_impacting(&it));
    }

    #[test]
    fn test_strong_sentiment_override_any_category() {
        let it = item("Quiet afternoon", NewsCategory::World, Some(-0.4));
        assert!(is_market_impacting(&it));
    }

    #[test]
    fn test_non_business_weak_no_keywords() {
        let it = item("Local festival opens", NewsCategory::World, Some(0.1));
        assert!(!is_market_impacting(&it));
    }

    #[test]
    fn test_non_business_keyword_weak_sentiment() {
        // event keyword but sentiment below the 0.25 bar and not business
        let it = item("Officials hold a meeting", NewsCategory::Politics, Some(0.2));
        assert!(!is_market_impacting(&it));
    }

    #[test]
    fn test_missing_sentiment_business_keyword_still_qualifies() {
        let it = item("Company reports record earnings", NewsCategory::Business, None);
        assert!(is_market_impacting(&it));
    }

    #[test]
    fn test_missing_sentiment_non_business_does_not_qualify() {
        let it = item("Officials hold a meeting", NewsCategory::Politics, None);
        assert!(!is_market_impacting(&it));
    }

    #[test]
    fn test_deterministic() {
        let it = item("Markets rally on earnings", NewsCategory::Business, Some(0.3));
        let first = is_market_impacting(&it);
        for _ in 0..10 {
            assert_eq!(is_market_impacting(&it), first);
        }
    }
}
