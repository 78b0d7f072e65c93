use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use market_data::HistoryPeriod;
use market_mood::{market_sentiment_value, mood_from_value};
use news_core::{MarketIndex, MarketIndicator, PricePoint, SentimentHistoryPoint};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::news_routes::fetch_all_news_cached;
use crate::{AppError, AppState};

#[derive(Serialize)]
pub struct MarketSentimentResponse {
    pub sentiment: MarketIndicator,
    pub color: String,
}

#[derive(Serialize)]
pub struct SentimentHistoryResponse {
    pub history: Vec<SentimentHistoryPoint>,
}

#[derive(Serialize)]
pub struct IndicesResponse {
    pub indices: Vec<MarketIndex>,
}

#[derive(Serialize)]
pub struct PriceHistoryResponse {
    pub history: Vec<PricePoint>,
}

#[derive(Deserialize)]
pub struct PriceHistoryQuery {
    #[serde(default = "default_period")]
    pub period: String,
}

fn default_period() -> String {
    "month".to_string()
}

pub fn market_routes() -> Router<AppState> {
    Router::new()
        .route("/api/market/sentiment", get(get_market_sentiment))
        .route("/api/market/history", get(get_sentiment_history))
        .route("/api/market/indices", get(get_indices))
        .route("/api/market/prices/:symbol", get(get_price_history))
}

/// `GET /api/market/sentiment`: weighted 24h mood over the current news
/// batch, with the band color for the gauge.
async fn get_market_sentiment(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    const KEY: &str = "/api/market/sentiment";

    if let Some(cached) = state.cache.get(KEY) {
        return Ok(Json(cached));
    }

    let news = fetch_all_news_cached(&state).await?;
    let value = market_sentiment_value(&news, chrono::Utc::now());
    // published value is rounded for display; the label comes off the raw value
    let rounded = (value * 100.0).round() / 100.0;
    let (label, color) = mood_from_value(value);

    let response = serde_json::to_value(MarketSentimentResponse {
        sentiment: MarketIndicator {
            value: rounded,
            label,
            timestamp: chrono::Utc::now(),
        },
        color: color.to_string(),
    })?;

    state.cache.insert(
        KEY,
        response.clone(),
        Duration::from_secs(state.config.sentiment_cache_secs),
    );
    Ok(Json(response))
}

/// `GET /api/market/history`: the in-process sentiment history series.
async fn get_sentiment_history(
    State(state): State<AppState>,
) -> Result<Json<SentimentHistoryResponse>, AppError> {
    let history = state.history.read().await.history().to_vec();
    Ok(Json(SentimentHistoryResponse { history }))
}

/// `GET /api/market/indices`: S&P 500 / NASDAQ / Dow snapshots.
async fn get_indices(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    const KEY: &str = "/api/market/indices";

    if let Some(cached) = state.cache.get(KEY) {
        return Ok(Json(cached));
    }

    let indices = state.market.market_indices().await?;
    let response = serde_json::to_value(IndicesResponse { indices })?;

    state.cache.insert(
        KEY,
        response.clone(),
        Duration::from_secs(state.config.market_cache_secs),
    );
    Ok(Json(response))
}

/// `GET /api/market/prices/:symbol?period=`: close-price time series.
async fn get_price_history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<PriceHistoryQuery>,
) -> Result<Json<Value>, AppError> {
    let symbol = symbol.to_uppercase();
    let period: HistoryPeriod = query
        .period
        .parse()
        .map_err(|_| AppError::bad_request(format!("invalid period: {}", query.period)))?;

    let key = format!("/api/market/prices/{}?period={}", symbol, query.period);
    if let Some(cached) = state.cache.get(&key) {
        return Ok(Json(cached));
    }

    let history = state.market.index_history(&symbol, period).await?;
    let response = serde_json::to_value(PriceHistoryResponse { history })?;

    state.cache.insert(
        key,
        response.clone(),
        Duration::from_secs(state.config.market_cache_secs),
    );
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{state_with_transport, FEED_XML};

    #[tokio::test]
    async fn test_market_sentiment_shape_and_bounds() {
        let state = state_with_transport(Ok(FEED_XML.to_string()));
        let response = get_market_sentiment(State(state)).await.unwrap();

        let value = response.0["sentiment"]["value"].as_f64().unwrap();
        assert!((-1.0..=1.0).contains(&value));
        assert!(response.0["sentiment"]["label"].is_string());
        assert!(response.0["color"].as_str().unwrap().starts_with('#'));
    }

    #[tokio::test]
    async fn test_market_sentiment_served_from_cache() {
        let state = state_with_transport(Ok(FEED_XML.to_string()));
        let first = get_market_sentiment(State(state.clone())).await.unwrap();
        let second = get_market_sentiment(State(state)).await.unwrap();
        assert_eq!(first.0, second.0);
    }

    #[tokio::test]
    async fn test_history_starts_empty_then_fills() {
        let state = state_with_transport(Ok(FEED_XML.to_string()));
        let empty = get_sentiment_history(State(state.clone())).await.unwrap();
        assert!(empty.0.history.is_empty());

        fetch_all_news_cached(&state).await.unwrap();
        let filled = get_sentiment_history(State(state)).await.unwrap();
        assert_eq!(filled.0.history.len(), 1);
        assert!(filled.0.history[0].news_count > 0);
    }

    #[tokio::test]
    async fn test_invalid_period_is_rejected() {
        let state = state_with_transport(Ok(FEED_XML.to_string()));
        let result = get_price_history(
            State(state),
            Path("SPX".to_string()),
            Query(PriceHistoryQuery {
                period: "decade".to_string(),
            }),
        )
        .await;
        assert!(result.is_err());
    }
}
