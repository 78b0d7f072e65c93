use chrono::{DateTime, Duration, Utc};
use news_core::{MarketIndicator, MarketMood, NewsCategory, NewsItem};

/// Fixed (label, min, max, color) bands. Adjacent bands share boundary
/// values; the first matching band wins, and that order is authoritative.
const MOOD_BANDS: &[(MarketMood, f64, f64, &str)] = &[
    (MarketMood::Terrible, -1.0, -0.6, "#DC2626"),
    (MarketMood::Bad, -0.6, -0.2, "#F97316"),
    (MarketMood::Neutral, -0.2, 0.2, "#A3A3A3"),
    (MarketMood::Good, 0.2, 0.6, "#22C55E"),
    (MarketMood::Great, 0.6, 1.0, "#15803D"),
];

/// Map a sentiment value onto its mood band and display color.
pub fn mood_from_value(value: f64) -> (MarketMood, &'static str) {
    MOOD_BANDS
        .iter()
        .find(|(_, min, max, _)| value >= *min && value <= *max)
        .map(|(mood, _, _, color)| (*mood, *color))
        .unwrap_or((MarketMood::Neutral, "#A3A3A3"))
}

/// Weighted average sentiment over items published in the last 24 hours,
/// with business items weighted 2x. Items without a score contribute zero
/// to the numerator but still carry their weight, as in the source model.
pub fn market_sentiment_value(items: &[NewsItem], now: DateTime<Utc>) -> f64 {
    if items.is_empty() {
        return 0.0;
    }

    let cutoff = now - Duration::hours(24);
    let recent: Vec<&NewsItem> = items.iter().filter(|i| i.published_at >= cutoff).collect();
    if recent.is_empty() {
        return 0.0;
    }

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for item in recent {
        let weight = if item.category == NewsCategory::Business {
            2.0
        } else {
            1.0
        };
        let score = item.sentiment.as_ref().map(|s| s.score).unwrap_or(0.0);
        weighted_sum += score * weight;
        total_weight += weight;
    }

    (weighted_sum / total_weight).clamp(-1.0, 1.0)
}

/// Current market mood from a scored news batch.
pub fn market_indicator(items: &[NewsItem]) -> MarketIndicator {
    market_indicator_at(items, Utc::now())
}

pub fn market_indicator_at(items: &[NewsItem], now: DateTime<Utc>) -> MarketIndicator {
    let value = market_sentiment_value(items, now);
    let (label, _) = mood_from_value(value);

    MarketIndicator {
        value,
        label,
        timestamp: now,
    }
}
