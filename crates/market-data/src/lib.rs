//! Alpha Vantage market-data client: quotes, index snapshots, price history
//! and gainer/loser rankings. The provider is opaque to the rest of the
//! system; everything is mapped into the shared core types here.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use futures_util::future::join_all;
use news_core::{IngestError, MarketIndex, PricePoint, Quote, StockMover};
use reqwest::Client;
use serde_json::Value;

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Index proxies: the quote endpoint has no index symbols, so tracking ETFs
/// stand in for the indices they follow.
const INDEX_PROXIES: &[(&str, &str, &str)] = &[
    ("SPY", "SPX", "S&P 500"),
    ("QQQ", "IXIC", "NASDAQ"),
    ("DIA", "DJI", "Dow Jones"),
];

/// Universe ranked for the gainer/loser views.
const COMMON_STOCKS: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("GOOGL", "Alphabet Inc."),
    ("AMZN", "Amazon.com Inc."),
    ("META", "Meta Platforms, Inc."),
    ("TSLA", "Tesla, Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("JPM", "JPMorgan Chase & Co."),
    ("V", "Visa Inc."),
    ("WMT", "Walmart Inc."),
    ("PG", "Procter & Gamble Company"),
    ("JNJ", "Johnson & Johnson"),
    ("MA", "Mastercard Incorporated"),
    ("UNH", "UnitedHealth Group Incorporated"),
    ("HD", "The Home Depot, Inc."),
    ("BAC", "Bank of America Corporation"),
    ("PFE", "Pfizer Inc."),
    ("CSCO", "Cisco Systems, Inc."),
    ("VZ", "Verizon Communications Inc."),
    ("ADBE", "Adobe Inc."),
];

/// Time window for price history requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryPeriod {
    Day,
    Week,
    Month,
    Year,
}

impl HistoryPeriod {
    /// Number of points to keep for the window (hourly for a day, daily
    /// otherwise).
    fn point_limit(&self) -> usize {
        match self {
            HistoryPeriod::Day => 24,
            HistoryPeriod::Week => 7,
            HistoryPeriod::Month => 30,
            HistoryPeriod::Year => 365,
        }
    }
}

impl FromStr for HistoryPeriod {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(HistoryPeriod::Day),
            "week" => Ok(HistoryPeriod::Week),
            "month" => Ok(HistoryPeriod::Month),
            "year" => Ok(HistoryPeriod::Year),
            other => Err(IngestError::InvalidData(format!(
                "unknown history period: {}",
                other
            ))),
        }
    }
}

#[derive(Clone)]
pub struct AlphaVantageClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl AlphaVantageClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Point the client somewhere else (tests run against a mock server).
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key,
            base_url: base_url.into(),
            client,
        }
    }

    async fn get_json(&self, query: &[(&str, &str)]) -> Result<Value, IngestError> {
        let mut params: Vec<(&str, &str)> = query.to_vec();
        params.push(("apikey", self.api_key.as_str()));

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| IngestError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IngestError::Api(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| IngestError::Api(e.to_string()))
    }

    /// Current quote for a symbol. `Ok(None)` when the provider has no data
    /// (unknown symbol, throttled key returning an empty object).
    pub async fn quote(&self, symbol: &str) -> Result<Option<Quote>, IngestError> {
        let body = self
            .get_json(&[("function", "GLOBAL_QUOTE"), ("symbol", symbol)])
            .await?;

        Ok(parse_global_quote(&body, symbol))
    }

    /// Closing-price history for a symbol over the requested window, oldest
    /// first, with per-point change versus the previous close.
    pub async fn index_history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<Vec<PricePoint>, IngestError> {
        let body = if period == HistoryPeriod::Day {
            self.get_json(&[
                ("function", "TIME_SERIES_INTRADAY"),
                ("symbol", symbol),
                ("interval", "60min"),
                ("outputsize", "full"),
            ])
            .await?
        } else {
            let outputsize = if period == HistoryPeriod::Year {
                "full"
            } else {
                "compact"
            };
            self.get_json(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("outputsize", outputsize),
            ])
            .await?
        };

        let key = if period == HistoryPeriod::Day {
            "Time Series (60min)"
        } else {
            "Time Series (Daily)"
        };

        let mut points = parse_time_series(&body, key);
        let keep = period.point_limit().min(points.len());
        points = points.split_off(points.len() - keep);
        Ok(points)
    }

    /// Snapshots for the major indices via their tracking ETFs. Individual
    /// proxy failures degrade the list; an empty list is an error.
    pub async fn market_indices(&self) -> Result<Vec<MarketIndex>, IngestError> {
        let fetches = INDEX_PROXIES.iter().map(|(etf, symbol, name)| async move {
            match self.quote(etf).await {
                Ok(Some(quote)) => Some(MarketIndex {
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                    price: quote.price,
                    change: quote.change,
                    change_percent: quote.change_percent,
                    timestamp: Utc::now(),
                }),
                Ok(None) => {
                    tracing::warn!("no quote data for index proxy {}", etf);
                    None
                }
                Err(e) => {
                    tracing::warn!("index proxy {} failed: {}", etf, e);
                    None
                }
            }
        });

        let indices: Vec<MarketIndex> = join_all(fetches).await.into_iter().flatten().collect();
        if indices.is_empty() {
            return Err(IngestError::Api(
                "no index data available from provider".to_string(),
            ));
        }
        Ok(indices)
    }

    /// Rank the fixed stock universe by percent change. Returns
    /// (gainers, losers), each truncated to `limit`.
    pub async fn top_movers(
        &self,
        limit: usize,
    ) -> Result<(Vec<StockMover>, Vec<StockMover>), IngestError> {
        let fetches = COMMON_STOCKS.iter().map(|(symbol, name)| async move {
            match self.quote(symbol).await {
                Ok(Some(quote)) => Some(StockMover {
                    symbol: quote.symbol,
                    name: name.to_string(),
                    price: quote.price,
                    change: quote.change,
                    change_percent: quote.change_percent,
                    volume: quote.volume,
                    market_cap: 0.0,
                }),
                Ok(None) => None,
                Err(e) => {
                    tracing::warn!("quote for {} failed: {}", symbol, e);
                    None
                }
            }
        });

        let mut movers: Vec<StockMover> = join_all(fetches).await.into_iter().flatten().collect();
        if movers.is_empty() {
            return Err(IngestError::Api(
                "no quote data available from provider".to_string(),
            ));
        }

        movers.sort_by(|a, b| {
            b.change_percent
                .partial_cmp(&a.change_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let gainers: Vec<StockMover> = movers.iter().take(limit).cloned().collect();
        let losers: Vec<StockMover> = movers.iter().rev().take(limit).cloned().collect();
        Ok((gainers, losers))
    }
}

fn field_f64(obj: &Value, key: &str) -> Option<f64> {
    obj.get(key)?.as_str()?.trim().trim_end_matches('%').parse().ok()
}

fn parse_global_quote(body: &Value, fallback_symbol: &str) -> Option<Quote> {
    let quote = body.get("Global Quote")?;
    if quote.as_object().map(|o| o.is_empty()).unwrap_or(true) {
        return None;
    }

    Some(Quote {
        symbol: quote
            .get("01. symbol")
            .and_then(Value::as_str)
            .unwrap_or(fallback_symbol)
            .to_string(),
        name: fallback_symbol.to_string(),
        price: field_f64(quote, "05. price")?,
        change: field_f64(quote, "09. change").unwrap_or(0.0),
        change_percent: field_f64(quote, "10. change percent").unwrap_or(0.0),
        volume: quote
            .get("06. volume")
            .and_then(Value::as_str)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0),
    })
}

/// Map a time-series object (date → bar) to close-price points, oldest
/// first, with change against the previous close.
fn parse_time_series(body: &Value, key: &str) -> Vec<PricePoint> {
    let Some(series) = body.get(key).and_then(Value::as_object) else {
        return Vec::new();
    };

    // date-keyed map sorts lexicographically, which is chronological for
    // the provider's YYYY-MM-DD[ HH:MM:SS] labels
    let ordered: BTreeMap<&String, &Value> = series.iter().collect();

    let mut points = Vec::with_capacity(ordered.len());
    let mut prev_close: Option<f64> = None;
    for (date, bar) in ordered {
        let Some(close) = field_f64(bar, "4. close") else {
            continue;
        };
        let change = prev_close.map(|p| close - p);
        let change_percent = prev_close.and_then(|p| {
            if p == 0.0 {
                None
            } else {
                Some((close - p) / p * 100.0)
            }
        });
        points.push(PricePoint {
            date: date.clone(),
            value: close,
            change,
            change_percent,
        });
        prev_close = Some(close);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_global_quote() {
        let body = json!({
            "Global Quote": {
                "01. symbol": "AAPL",
                "05. price": "228.5000",
                "06. volume": "51234567",
                "09. change": "-1.2500",
                "10. change percent": "-0.5443%"
            }
        });
        let quote = parse_global_quote(&body, "AAPL").unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert!((quote.price - 228.5).abs() < 1e-9);
        assert!((quote.change + 1.25).abs() < 1e-9);
        assert!((quote.change_percent + 0.5443).abs() < 1e-9);
        assert_eq!(quote.volume, 51_234_567);
    }

    #[test]
    fn test_empty_quote_is_none() {
        assert!(parse_global_quote(&json!({"Global Quote": {}}), "X").is_none());
        assert!(parse_global_quote(&json!({}), "X").is_none());
    }

    #[test]
    fn test_parse_time_series_ordered_with_changes() {
        let body = json!({
            "Time Series (Daily)": {
                "2026-08-03": { "4. close": "102.0" },
                "2026-08-01": { "4. close": "100.0" },
                "2026-08-02": { "4. close": "101.0" }
            }
        });
        let points = parse_time_series(&body, "Time Series (Daily)");
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, "2026-08-01");
        assert!(points[0].change.is_none());
        assert_eq!(points[2].date, "2026-08-03");
        assert!((points[2].change.unwrap() - 1.0).abs() < 1e-9);
        assert!((points[2].change_percent.unwrap() - (1.0 / 101.0 * 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_period_parse() {
        assert_eq!("month".parse::<HistoryPeriod>().unwrap(), HistoryPeriod::Month);
        assert!("decade".parse::<HistoryPeriod>().is_err());
    }
}
