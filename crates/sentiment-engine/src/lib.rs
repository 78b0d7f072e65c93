use news_core::{NewsItem, SentimentAnalysis};

pub mod classifier;
pub mod lexicon;

pub use classifier::is_market_impacting;
pub use lexicon::SentimentLexicon;

/// Lexicon-based sentiment scorer tuned for market/economic news.
///
/// Scoring is a pure function of the input text: tokens are matched against
/// the merged vocabulary for a length-normalized comparative score, then the
/// full text is scanned for economic-indicator phrases whose multipliers
/// compound into a single sharpening factor. The published score is clamped
/// to [-1, 1]; the comparative is left raw.
pub struct SentimentScorer {
    lexicon: SentimentLexicon,
}

impl SentimentScorer {
    pub fn new(lexicon: SentimentLexicon) -> Self {
        Self { lexicon }
    }

    pub fn score_text(&self, text: &str) -> SentimentAnalysis {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SentimentAnalysis::default();
        }

        let mut sum: i32 = 0;
        let mut positive = Vec::new();
        let mut negative = Vec::new();

        for token in &tokens {
            if let Some(weight) = self.lexicon.weight(token) {
                sum += weight;
                if weight > 0 {
                    positive.push(token.clone());
                } else {
                    negative.push(token.clone());
                }
            }
        }

        let comparative = f64::from(sum) / tokens.len() as f64;

        // Indicator multipliers compound: several indicator phrases in one
        // article can push the pre-clamp magnitude well past 1. The clamp
        // below is the only bound.
        let lower = text.to_lowercase();
        let mut multiplier = 1.0;
        for (term, importance) in self.lexicon.indicators() {
            if lower.contains(term) {
                multiplier *= importance;
            }
        }

        let score = (comparative * multiplier).clamp(-1.0, 1.0);

        SentimentAnalysis {
            score,
            comparative,
            positive,
            negative,
        }
    }

    /// Score one item over its title + description and attach the result.
    pub fn analyze_item(&self, item: &NewsItem) -> NewsItem {
        let text = format!("{} {}", item.title, item.description);
        let sentiment = self.score_text(&text);
        NewsItem {
            sentiment: Some(sentiment),
            ..item.clone()
        }
    }

    /// Score a whole batch. Scoring is total, so a malformed item degrades
    /// to a neutral result instead of aborting the batch.
    pub fn process_batch(&self, items: Vec<NewsItem>) -> Vec<NewsItem> {
        tracing::debug!("scoring batch of {} items", items.len());
        items.iter().map(|item| self.analyze_item(item)).collect()
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(SentimentLexicon::default())
    }
}

/// Lowercase tokens split on whitespace with surrounding punctuation
/// stripped. Inner hyphens survive so hyphenated vocabulary entries match.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|w| !w.is_empty())
        .collect()
}
