use std::time::Duration;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use news_core::{NewsCategory, NewsItem};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};

#[derive(Deserialize)]
pub struct NewsQuery {
    pub category: Option<String>,
}

#[derive(Serialize)]
pub struct NewsResponse {
    pub news: Vec<NewsItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub news_items: Vec<NewsItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analyzed_news: Vec<NewsItem>,
}

pub fn news_routes() -> Router<AppState> {
    Router::new()
        .route("/api/news", get(get_news))
        .route("/api/news/market-impacting", get(get_market_impacting))
        .route("/api/news/sentiment", post(analyze_sentiment))
}

/// Fetch the full scored batch through the response cache and feed the
/// sentiment history as a side effect of a cache miss. Shared with the
/// market-sentiment route so both read the same cached batch.
pub async fn fetch_all_news_cached(state: &AppState) -> Result<Vec<NewsItem>, AppError> {
    const KEY: &str = "/api/news";

    if let Some(cached) = state.cache.get(KEY) {
        return Ok(serde_json::from_value(cached)?);
    }

    let batch = state.aggregator.fetch_all().await;
    state.history.write().await.record(&batch);

    state.cache.insert(
        KEY,
        serde_json::to_value(&batch)?,
        Duration::from_secs(state.config.news_cache_secs),
    );
    Ok(batch)
}

async fn fetch_category_cached(
    state: &AppState,
    category: NewsCategory,
) -> Result<Vec<NewsItem>, AppError> {
    let key = format!("/api/news?category={}", category);

    if let Some(cached) = state.cache.get(&key) {
        return Ok(serde_json::from_value(cached)?);
    }

    let batch = state.aggregator.fetch_by_category(category).await;
    state.cache.insert(
        key,
        serde_json::to_value(&batch)?,
        Duration::from_secs(state.config.news_cache_secs),
    );
    Ok(batch)
}

/// `GET /api/news?category=`: the aggregation endpoint. Always answers
/// with a batch (fallback items under total feed failure); a 500 with an
/// error payload only escapes if even that path fails.
async fn get_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<NewsResponse>, AppError> {
    let news = match query.category.as_deref().filter(|c| !c.is_empty()) {
        Some(raw) => {
            let category: NewsCategory = raw
                .parse()
                .map_err(|_| AppError::bad_request(format!("invalid category: {}", raw)))?;
            fetch_category_cached(&state, category).await?
        }
        None => fetch_all_news_cached(&state).await?,
    };

    Ok(Json(NewsResponse { news }))
}

/// `POST /api/news/sentiment`: re-score a caller-supplied batch.
async fn analyze_sentiment(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let analyzed_news = state.scorer.process_batch(request.news_items);
    Ok(Json(AnalyzeResponse { analyzed_news }))
}

/// `GET /api/news/market-impacting`: the classifier-filtered view of the
/// current batch.
async fn get_market_impacting(
    State(state): State<AppState>,
) -> Result<Json<NewsResponse>, AppError> {
    let batch = fetch_all_news_cached(&state).await?;
    Ok(Json(NewsResponse {
        news: market_impacting(&batch),
    }))
}

/// Items the classifier marks as market-impacting.
pub fn market_impacting(news: &[NewsItem]) -> Vec<NewsItem> {
    news.iter()
        .filter(|item| sentiment_engine::is_market_impacting(item))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{state_with_transport, FEED_XML};

    #[tokio::test]
    async fn test_get_news_returns_scored_batch() {
        let state = state_with_transport(Ok(FEED_XML.to_string()));
        let response = get_news(
            State(state),
            Query(NewsQuery { category: None }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.news.len(), 2);
        assert!(response.0.news.iter().all(|i| i.sentiment.is_some()));
    }

    #[tokio::test]
    async fn test_get_news_total_failure_serves_fallbacks() {
        let state = state_with_transport(Err("feeds down".to_string()));
        let response = get_news(
            State(state),
            Query(NewsQuery { category: None }),
        )
        .await
        .unwrap();

        assert!(!response.0.news.is_empty());
        assert!(response.0.news.iter().all(|i| i.sentiment.is_some()));
    }

    #[tokio::test]
    async fn test_get_news_rejects_unknown_category() {
        let state = state_with_transport(Ok(FEED_XML.to_string()));
        let result = get_news(
            State(state),
            Query(NewsQuery {
                category: Some("sports".to_string()),
            }),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_news_fetch_populates_cache_and_history() {
        let state = state_with_transport(Ok(FEED_XML.to_string()));
        fetch_all_news_cached(&state).await.unwrap();

        assert!(state.cache.get("/api/news").is_some());
        assert_eq!(state.history.read().await.len(), 1);

        // second call is served from cache; history stays rate-limited
        fetch_all_news_cached(&state).await.unwrap();
        assert_eq!(state.history.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_analyze_sentiment_rescoring() {
        let state = state_with_transport(Ok(FEED_XML.to_string()));
        let batch = state.aggregator.fetch_all().await;
        let mut unscored = batch.clone();
        for item in &mut unscored {
            item.sentiment = None;
        }

        let response = analyze_sentiment(
            State(state),
            Json(AnalyzeRequest {
                news_items: unscored,
            }),
        )
        .await
        .unwrap();

        assert!(response.0.analyzed_news.iter().all(|i| i.sentiment.is_some()));
    }

    #[tokio::test]
    async fn test_market_impacting_filter() {
        let state = state_with_transport(Ok(FEED_XML.to_string()));
        let batch = state.aggregator.fetch_all().await;
        let impacting = market_impacting(&batch);
        // "Markets surge on earnings beat" is business news with keywords
        assert!(impacting.iter().any(|i| i.id == "t-1"));
    }
}
