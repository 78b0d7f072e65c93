pub mod history;
pub mod indicator;

pub use history::SentimentHistoryTracker;
pub use indicator::{market_indicator, market_sentiment_value, mood_from_value};
