//! HTTP client for the Indian stock market API

use super::{HistoricalFilter, HistoricalPeriod, MarketDataSource, StatsCategory};
use crate::cache::{CacheKey, CacheManager, CacheTier};
use crate::config::StockConfig;
use crate::error::{Result, StockError};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

const API_KEY_HEADER: &str = "X-API-KEY";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Rate-limited, caching client for the upstream API
///
/// Failures are returned as-is; there are no retries.
#[derive(Clone)]
pub struct IndianStockClient {
    http: Client,
    base_url: Url,
    api_key: String,
    rate_limiter: SharedRateLimiter,
    cache: CacheManager,
}

impl fmt::Debug for IndianStockClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndianStockClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl IndianStockClient {
    /// Create a client from configuration
    pub fn new(config: &StockConfig) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| StockError::Config(format!("invalid base url: {e}")))?;

        let per_minute = NonZeroU32::new(config.rate_limit_per_minute).ok_or_else(|| {
            StockError::Config("rate_limit_per_minute must be greater than 0".to_string())
        })?;
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
            rate_limiter,
            cache: CacheManager::from_config(config),
        })
    }

    /// Upstream base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Response caches, exposed for inspection and manual invalidation
    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// Absolute URL for an endpoint path plus query pairs
    pub fn endpoint_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| StockError::Config(format!("invalid endpoint {path}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().copied());
        }
        Ok(url)
    }

    async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = self.endpoint_url(path, query)?;

        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        debug!(%url, "Requesting upstream");
        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = path, status = status.as_u16(), "Upstream request failed");
            return Err(StockError::Api(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn cached(
        &self,
        tier: CacheTier,
        symbol: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value> {
        let key = CacheKey::new(symbol, path, query);
        self.cache
            .tier(tier)
            .get_or_fetch(key, || self.fetch(path, query))
            .await
    }
}

#[async_trait]
impl MarketDataSource for IndianStockClient {
    async fn stock(&self, symbol: &str) -> Result<Value> {
        self.cached(CacheTier::Realtime, symbol, "/stock", &[("name", symbol)])
            .await
    }

    async fn trending(&self) -> Result<Value> {
        self.cached(CacheTier::Realtime, "", "/trending", &[]).await
    }

    async fn historical_stats(&self, symbol: &str, category: StatsCategory) -> Result<Value> {
        self.cached(
            CacheTier::Fundamental,
            symbol,
            "/historical_stats",
            &[("stock_name", symbol), ("stats", category.as_str())],
        )
        .await
    }

    async fn historical_data(
        &self,
        symbol: &str,
        period: HistoricalPeriod,
        filter: HistoricalFilter,
    ) -> Result<Value> {
        self.cached(
            CacheTier::Historical,
            symbol,
            "/historical_data",
            &[
                ("stock_name", symbol),
                ("period", period.as_str()),
                ("filter", filter.as_str()),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::Mutex;

    struct FakeUpstream {
        base_url: String,
        hits: Arc<AtomicUsize>,
        requests: Arc<Mutex<Vec<String>>>,
    }

    /// Minimal HTTP/1.1 server answering every request with the same response
    async fn fake_upstream(status_line: &'static str, body: &'static str) -> FakeUpstream {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let (hits_srv, requests_srv) = (Arc::clone(&hits), Arc::clone(&requests));
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                hits_srv.fetch_add(1, Ordering::SeqCst);

                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                requests_srv
                    .lock()
                    .await
                    .push(String::from_utf8_lossy(&buf).to_string());

                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        FakeUpstream {
            base_url: format!("http://{addr}"),
            hits,
            requests,
        }
    }

    fn client(base_url: &str) -> IndianStockClient {
        let config = StockConfig::builder()
            .api_key("test-key")
            .base_url(base_url)
            .build()
            .unwrap();
        IndianStockClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_url() {
        let client = client("https://stock.indianapi.in");
        let url = client
            .endpoint_url("/historical_stats", &[("stock_name", "TCS"), ("stats", "ratios")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://stock.indianapi.in/historical_stats?stock_name=TCS&stats=ratios"
        );
        assert_eq!(
            client.endpoint_url("/trending", &[]).unwrap().as_str(),
            "https://stock.indianapi.in/trending"
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = client("https://stock.indianapi.in");
        assert!(!format!("{client:?}").contains("test-key"));
    }

    #[tokio::test]
    async fn test_stock_sends_key_and_caches() {
        let upstream = fake_upstream("200 OK", r#"{"companyName":"Tata Consultancy Services"}"#).await;
        let client = client(&upstream.base_url);

        let doc = client.stock("TCS").await.unwrap();
        assert_eq!(doc["companyName"], "Tata Consultancy Services");

        let again = client.stock("TCS").await.unwrap();
        assert_eq!(again, doc);
        assert_eq!(upstream.hits.load(Ordering::SeqCst), 1);

        let requests = upstream.requests.lock().await;
        let request = requests[0].to_lowercase();
        assert!(request.starts_with("get /stock?name=tcs "));
        assert!(request.contains("x-api-key: test-key"));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let upstream = fake_upstream("404 Not Found", r#"{"error":"missing"}"#).await;
        let client = client(&upstream.base_url);

        let err = client.trending().await.unwrap_err();
        assert!(matches!(err, StockError::Api(ref msg) if msg == "HTTP 404: Not Found"));
        assert!(client.cache().tier(CacheTier::Realtime).is_empty().await);
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let upstream = fake_upstream("200 OK", "not json").await;
        let client = client(&upstream.base_url);

        let err = client
            .historical_stats("TCS", StatsCategory::Ratios)
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::Json(_)));
        assert!(err.is_upstream());
    }

    #[tokio::test]
    #[ignore] // Requires network access and INDIAN_STOCK_API_KEY
    async fn test_live_trending() {
        let config = StockConfig::from_env().unwrap();
        let client = IndianStockClient::new(&config).unwrap();
        let doc = client.trending().await.unwrap();
        assert!(doc.get("trending_stocks").is_some());
    }
}
