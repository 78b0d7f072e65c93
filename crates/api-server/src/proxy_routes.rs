use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::Value;

use crate::{AppError, AppState};

#[derive(Deserialize)]
pub struct ProxyQuery {
    pub url: String,
}

pub fn proxy_routes() -> Router<AppState> {
    Router::new().route("/api/proxy/rss", get(proxy_rss))
}

/// `GET /api/proxy/rss?url=`: server-side feed fetch for clients (or feed
/// hosts) that cannot be reached directly. Returns the raw XML unchanged.
async fn proxy_rss(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> Result<impl IntoResponse, AppError> {
    if query.url.is_empty() {
        return Err(AppError::bad_request("url parameter is required"));
    }

    let key = format!("/api/proxy/rss?url={}", query.url);
    if let Some(Value::String(cached)) = state.cache.get(&key) {
        return Ok(([(header::CONTENT_TYPE, "application/xml")], cached));
    }

    tracing::info!("proxying feed fetch for {}", query.url);

    let response = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
        .get(&query.url)
        .header("User-Agent", "Mozilla/5.0 (compatible; MarketSense/1.0)")
        .header(
            "Accept",
            "application/rss+xml, application/atom+xml, application/xml, text/xml, */*",
        )
        .send()
        .await
        .map_err(|e| AppError::bad_gateway(format!("RSS feed error: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::bad_gateway(format!(
            "feed server responded with status {}",
            response.status()
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| AppError::bad_gateway(format!("RSS feed error: {}", e)))?;

    state.cache.insert(
        key,
        Value::String(body.clone()),
        Duration::from_secs(state.config.news_cache_secs),
    );

    Ok(([(header::CONTENT_TYPE, "application/xml")], body))
}
