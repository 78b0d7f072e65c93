use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use news_core::{NewsCategory, NewsItem, SentimentHistoryPoint};

/// Rolling, append-only series of aggregate sentiment snapshots.
///
/// Appends are rate-limited: a new point lands at most once per interval
/// (30 minutes by default), so per-fetch churn does not flood the series.
/// The tracker owns the series and the last-append timestamp; nothing else
/// mutates either.
pub struct SentimentHistoryTracker {
    points: Vec<SentimentHistoryPoint>,
    last_append: Option<DateTime<Utc>>,
    min_interval: Duration,
}

impl SentimentHistoryTracker {
    pub fn new() -> Self {
        Self::with_interval(Duration::minutes(30))
    }

    pub fn with_interval(min_interval: Duration) -> Self {
        Self {
            points: Vec::new(),
            last_append: None,
            min_interval,
        }
    }

    /// Fold a freshly ingested batch into the series. No-op when called
    /// again inside the rate-limit window, or when the batch carries no
    /// scored items at all (no data point beats a fabricated zero).
    pub fn record(&mut self, batch: &[NewsItem]) {
        self.record_at(batch, Utc::now());
    }

    pub fn record_at(&mut self, batch: &[NewsItem], now: DateTime<Utc>) {
        if let Some(last) = self.last_append {
            if now - last < self.min_interval {
                tracing::debug!("sentiment history update inside rate-limit window, skipping");
                return;
            }
        }

        let scores: Vec<f64> = batch
            .iter()
            .filter_map(|i| i.sentiment.as_ref().map(|s| s.score))
            .collect();
        if scores.is_empty() {
            tracing::debug!("batch has no scored items, skipping history point");
            return;
        }

        let value = round2(scores.iter().sum::<f64>() / scores.len() as f64);

        let mut category_sentiment = BTreeMap::new();
        for category in NewsCategory::ALL {
            let cat_scores: Vec<f64> = batch
                .iter()
                .filter(|i| i.category == category)
                .filter_map(|i| i.sentiment.as_ref().map(|s| s.score))
                .collect();

            let cat_value = if cat_scores.is_empty() {
                // carry forward rather than recording a misleading zero
                self.last_category_value(category)
            } else {
                round2(cat_scores.iter().sum::<f64>() / cat_scores.len() as f64)
            };
            category_sentiment.insert(category, cat_value);
        }

        self.points.push(SentimentHistoryPoint {
            timestamp: now.timestamp_millis(),
            value,
            news_count: batch.len(),
            category_sentiment,
        });
        self.last_append = Some(now);
    }

    fn last_category_value(&self, category: NewsCategory) -> f64 {
        self.points
            .iter()
            .rev()
            .find_map(|p| p.category_sentiment.get(&category).copied())
            .unwrap_or(0.0)
    }

    /// Chronological, append-only view of the series.
    pub fn history(&self) -> &[SentimentHistoryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for SentimentHistoryTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use news_core::SentimentAnalysis;

    fn item(category: NewsCategory, score: Option<f64>) -> NewsItem {
        NewsItem {
            id: "x".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            content: None,
            source: "s".to_string(),
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
    fn test_rate_limited_append() {
        let mut tracker = SentimentHistoryTracker::new();
        let t0 = Utc::now();

        tracker.record_at(&[item(NewsCategory::Business, Some(0.5))], t0);
        tracker.record_at(
            &[item(NewsCategory::Business, Some(-0.5))],
            t0 + Duration::minutes(29),
        );
        assert_eq!(tracker.len(), 1);

        tracker.record_at(
            &[item(NewsCategory::Business, Some(-0.5))],
            t0 + Duration::minutes(31),
        );
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_unscored_items_excluded_from_mean() {
        let mut tracker = SentimentHistoryTracker::new();
        let batch = vec![
            item(NewsCategory::Business, Some(0.5)),
            item(NewsCategory::Business, None),
        ];
        tracker.record_at(&batch, Utc::now());

        let point = &tracker.history()[0];
        // mean over the one scored item, not 0.25 over two
        assert_eq!(point.value, 0.5);
        // the batch size still counts every item
        assert_eq!(point.news_count, 2);
    }

    #[test]
    fn test_zero_scored_batch_is_skipped() {
        let mut tracker = SentimentHistoryTracker::new();
        tracker.record_at(&[item(NewsCategory::World, None)], Utc::now());
        assert!(tracker.is_empty());

        // and the skip does not consume the rate-limit window
        tracker.record_at(&[item(NewsCategory::World, Some(0.3))], Utc::now());
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_category_carry_forward() {
        let mut tracker = SentimentHistoryTracker::new();
        let t0 = Utc::now();

        tracker.record_at(&[item(NewsCategory::Technology, Some(0.42))], t0);
        tracker.record_at(
            &[item(NewsCategory::Technology, Some(0.11))],
            t0 + Duration::hours(1),
        );
        // no technology items in this batch: the 0.42→0.11 history carries
        // its latest value forward
        tracker.record_at(
            &[item(NewsCategory::Business, Some(-0.2))],
            t0 + Duration::hours(2),
        );

        let last = tracker.history().last().unwrap();
        assert_eq!(last.category_sentiment[&NewsCategory::Technology], 0.11);
        assert_eq!(last.category_sentiment[&NewsCategory::Business], -0.2);
        // never-seen category with no history records zero
        assert_eq!(last.category_sentiment[&NewsCategory::General], 0.0);
    }

    #[test]
    fn test_values_rounded_two_decimals() {
        let mut tracker = SentimentHistoryTracker::new();
        let batch = vec![
            item(NewsCategory::Business, Some(0.333)),
            item(NewsCategory::Business, Some(0.333)),
            item(NewsCategory::Business, Some(0.334)),
        ];
        tracker.record_at(&batch, Utc::now());

        let point = &tracker.history()[0];
        assert_eq!(point.value, 0.33);
        assert_eq!(point.category_sentiment[&NewsCategory::Business], 0.33);
    }

    #[test]
    fn test_history_is_chronological() {
        let mut tracker = SentimentHistoryTracker::new();
        let t0 = Utc::now();
        for i in 0..3 {
            tracker.record_at(
                &[item(NewsCategory::World, Some(0.1 * i as f64))],
                t0 + Duration::hours(i),
            );
        }
        let stamps: Vec<i64> = tracker.history().iter().map(|p| p.timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }
}
