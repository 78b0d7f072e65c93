use std::time::Duration;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use news_core::StockMover;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AppError, AppState};

#[derive(Deserialize)]
pub struct MoversQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

#[derive(Serialize)]
pub struct GainersResponse {
    pub gainers: Vec<StockMover>,
}

#[derive(Serialize)]
pub struct LosersResponse {
    pub losers: Vec<StockMover>,
}

pub fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/api/stocks/gainers", get(get_gainers))
        .route("/api/stocks/losers", get(get_losers))
}

/// Both movers views share one ranked fetch so a gainers request primes
/// the losers cache and vice versa.
async fn movers_cached(
    state: &AppState,
    limit: usize,
) -> Result<(Vec<StockMover>, Vec<StockMover>), AppError> {
    let key = format!("/api/stocks/movers?limit={}", limit);

    if let Some(cached) = state.cache.get(&key) {
        return Ok(serde_json::from_value(cached)?);
    }

    let movers = state.market.top_movers(limit).await?;
    state.cache.insert(
        key,
        serde_json::to_value(&movers)?,
        Duration::from_secs(state.config.market_cache_secs),
    );
    Ok(movers)
}

async fn get_gainers(
    State(state): State<AppState>,
    Query(query): Query<MoversQuery>,
) -> Result<Json<Value>, AppError> {
    let (gainers, _) = movers_cached(&state, query.limit).await?;
    Ok(Json(serde_json::to_value(GainersResponse { gainers })?))
}

async fn get_losers(
    State(state): State<AppState>,
    Query(query): Query<MoversQuery>,
) -> Result<Json<Value>, AppError> {
    let (_, losers) = movers_cached(&state, query.limit).await?;
    Ok(Json(serde_json::to_value(LosersResponse { losers })?))
}
