pub mod error;
pub mod traits;
pub mod types;

pub use error::IngestError;
pub use traits::FeedTransport;
pub use types::{
    MarketIndex, MarketIndicator, MarketMood, NewsCategory, NewsItem, PricePoint, Quote,
    RawFeedItem, RssFeed, SentimentAnalysis, SentimentHistoryPoint, StockMover,
};
