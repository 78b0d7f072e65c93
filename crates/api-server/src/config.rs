use std::env;

/// Server configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Alpha Vantage key; market-data endpoints degrade without one
    pub alpha_vantage_api_key: String,
    /// Same-origin RSS proxy the feed transport falls back to
    pub rss_proxy_url: Option<String>,
    /// Background news refresh cadence, seconds
    pub refresh_interval_secs: u64,
    /// Response-cache TTLs, seconds
    pub news_cache_secs: u64,
    pub sentiment_cache_secs: u64,
    pub market_cache_secs: u64,
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string()),
            alpha_vantage_api_key: env::var("ALPHA_VANTAGE_API_KEY").unwrap_or_default(),
            rss_proxy_url: env::var("RSS_PROXY_URL").ok().filter(|v| !v.is_empty()),
            refresh_interval_secs: env_u64("NEWS_REFRESH_INTERVAL_SECS", 600),
            news_cache_secs: env_u64("NEWS_CACHE_SECS", 600),
            sentiment_cache_secs: env_u64("SENTIMENT_CACHE_SECS", 1800),
            market_cache_secs: env_u64("MARKET_CACHE_SECS", 300),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3001".to_string(),
            alpha_vantage_api_key: String::new(),
            rss_proxy_url: None,
            refresh_interval_secs: 600,
            news_cache_secs: 600,
            sentiment_cache_secs: 1800,
            market_cache_secs: 300,
        }
    }
}
