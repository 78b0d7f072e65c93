//! HTTP boundary for the MarketSense pipeline: news aggregation, batch
//! re-scoring, market mood, sentiment history, and market-data pass-through
//! endpoints, with a TTL response cache in front of the GET routes.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use feed_ingest::{default_feeds, HttpFeedTransport, NewsAggregator};
use market_data::AlphaVantageClient;
use market_mood::SentimentHistoryTracker;
use sentiment_engine::SentimentScorer;
use serde_json::json;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod cache;
pub mod config;
pub mod market_routes;
pub mod news_routes;
pub mod proxy_routes;
pub mod stock_routes;

pub use cache::ResponseCache;
pub use config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<NewsAggregator>,
    pub scorer: Arc<SentimentScorer>,
    pub history: Arc<RwLock<SentimentHistoryTracker>>,
    pub market: Arc<AlphaVantageClient>,
    pub cache: Arc<ResponseCache>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn from_config(config: ServerConfig) -> Self {
        let transport = HttpFeedTransport::with_proxy(config.rss_proxy_url.clone());
        let aggregator = NewsAggregator::new(Arc::new(transport), default_feeds());
        let market = AlphaVantageClient::new(config.alpha_vantage_api_key.clone());

        Self {
            aggregator: Arc::new(aggregator),
            scorer: Arc::new(SentimentScorer::default()),
            history: Arc::new(RwLock::new(SentimentHistoryTracker::new())),
            market: Arc::new(market),
            cache: Arc::new(ResponseCache::new()),
            config: Arc::new(config),
        }
    }
}

/// Handler error: HTTP status plus the `{ "error": ... }` payload the
/// consumer contract expects. Anything `?`-propagated lands as a 500.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed ({}): {}", self.status, self.message);
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.into().to_string(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(news_routes::news_routes())
        .merge(market_routes::market_routes())
        .merge(stock_routes::stock_routes())
        .merge(proxy_routes::proxy_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Periodic refresh: re-fetch all feeds and fold the batch into the
/// sentiment history. The tracker's own rate limit decides whether a fire
/// actually appends, so overlapping or frequent fires are harmless.
fn spawn_refresh_task(state: AppState) {
    let interval = Duration::from_secs(state.config.refresh_interval_secs.max(60));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let batch = state.aggregator.fetch_all().await;
            tracing::info!("background refresh ingested {} items", batch.len());
            state.history.write().await.record(&batch);
        }
    });
}

pub async fn run_server() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();
    let bind_addr = config.bind_addr.clone();
    let state = AppState::from_config(config);

    spawn_refresh_task(state.clone());

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("api-server listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
