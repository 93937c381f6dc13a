//! Upstream stats fetching with caching.
//!
//! The engine never fetches anything itself; it consumes [`RawPlayerStats`]
//! handed to it by a [`StatsProvider`]. The HTTP implementation talks to
//! the upstream stats API and caches successful responses on disk with a
//! TTL; the static implementation serves a fixed in-memory table for
//! tests and offline use.
//!
//! No retry policy lives here: stats fetches are idempotent and
//! side-effect free, so a caller that wants retries can wrap the trait.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};
use url::Url;

use crate::models::{PlayerId, RawPlayerStats, StatsContext};

/// Errors from the upstream stats source.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The upstream has no stats for this (player, period, mode, shard).
    #[error("no stats found for player {player_id}")]
    NotFound { player_id: String },

    /// Transport failure, upstream outage, auth rejection, rate limit —
    /// anything that is not a definitive "no such data".
    #[error("upstream stats service unavailable: {0}")]
    Unavailable(String),
}

/// Source of raw per-player stats.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Fetch the raw stats record for one (player, period, mode, shard).
    async fn fetch_raw_stats(
        &self,
        player_id: &PlayerId,
        context: &StatsContext,
    ) -> Result<RawPlayerStats, ProviderError>;
}

/// Configuration for the HTTP stats provider.
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Shard-scoped base URL of the upstream stats API.
    pub base_url: Url,

    /// Bearer token for the upstream API.
    pub api_key: String,

    /// Request timeout.
    pub timeout: Duration,

    /// Directory for cached responses.
    pub cache_dir: PathBuf,

    /// How long a cached response is considered fresh.
    pub cache_ttl: Duration,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://api.pubg.com/shards").expect("static URL"),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
            cache_dir: PathBuf::from("./data/cache"),
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

/// Cached response payload stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedStats {
    fetched_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    stats: RawPlayerStats,
}

/// Stats provider backed by the upstream HTTP API.
///
/// Successful responses are cached on disk keyed by a digest of the
/// request tuple. Not-found and failures are never cached, so a player
/// who shows up later is picked up on the next request.
pub struct HttpStatsProvider {
    client: Client,
    config: HttpProviderConfig,
}

impl HttpStatsProvider {
    pub fn new(config: HttpProviderConfig) -> Result<Self, ProviderError> {
        std::fs::create_dir_all(&config.cache_dir)
            .map_err(|e| ProviderError::Unavailable(format!("cannot create cache dir: {e}")))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key)) {
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.api+json"));
        headers
    }

    /// Cache file name for a request tuple.
    fn cache_path(&self, player_id: &PlayerId, context: &StatsContext) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(context.shard.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(player_id.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(context.period.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(context.mode.as_str().as_bytes());
        let digest = hex::encode(hasher.finalize());
        self.config.cache_dir.join(format!("{digest}.json"))
    }

    async fn read_cached(
        &self,
        player_id: &PlayerId,
        context: &StatsContext,
    ) -> Option<RawPlayerStats> {
        let path = self.cache_path(player_id, context);
        let bytes = fs::read(&path).await.ok()?;
        let cached: CachedStats = serde_json::from_slice(&bytes).ok()?;
        if cached.expires_at <= Utc::now() {
            debug!(?path, "cached stats expired");
            return None;
        }
        Some(cached.stats)
    }

    async fn write_cache(
        &self,
        player_id: &PlayerId,
        context: &StatsContext,
        stats: &RawPlayerStats,
    ) {
        let now = Utc::now();
        let ttl = chrono::Duration::from_std(self.config.cache_ttl)
            .unwrap_or_else(|_| chrono::Duration::hours(1));
        let cached = CachedStats {
            fetched_at: now,
            expires_at: now + ttl,
            stats: stats.clone(),
        };

        let path = self.cache_path(player_id, context);
        match serde_json::to_vec(&cached) {
            Ok(bytes) => {
                if let Err(e) = fs::write(&path, bytes).await {
                    warn!("failed to cache stats response: {e}");
                }
            }
            Err(e) => warn!("failed to serialize stats for cache: {e}"),
        }
    }

    fn stats_url(
        &self,
        player_id: &PlayerId,
        context: &StatsContext,
    ) -> Result<Url, ProviderError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Unavailable("base URL cannot be a base".to_string()))?
            .push(context.shard.as_str())
            .push("players")
            .push(player_id.as_str())
            .push("stats");
        url.query_pairs_mut()
            .append_pair("period", context.period.as_str())
            .append_pair("mode", context.mode.as_str());
        Ok(url)
    }
}

#[async_trait]
impl StatsProvider for HttpStatsProvider {
    #[tracing::instrument(skip(self), fields(player = %player_id, context = %context))]
    async fn fetch_raw_stats(
        &self,
        player_id: &PlayerId,
        context: &StatsContext,
    ) -> Result<RawPlayerStats, ProviderError> {
        if let Some(stats) = self.read_cached(player_id, context).await {
            debug!("serving stats from cache");
            return Ok(stats);
        }

        let url = self.stats_url(player_id, context)?;
        debug!(%url, "requesting stats from upstream");

        let response = self
            .client
            .get(url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ProviderError::NotFound {
                player_id: player_id.to_string(),
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProviderError::Unavailable(
                "upstream rejected the API key".to_string(),
            )),
            StatusCode::TOO_MANY_REQUESTS => Err(ProviderError::Unavailable(
                "rate limited by upstream".to_string(),
            )),
            status if status.is_success() => {
                let stats: RawPlayerStats = response
                    .json()
                    .await
                    .map_err(|e| ProviderError::Unavailable(format!("bad upstream payload: {e}")))?;
                self.write_cache(player_id, context, &stats).await;
                Ok(stats)
            }
            status => Err(ProviderError::Unavailable(format!("HTTP {status}"))),
        }
    }
}

/// In-memory stats provider for tests and offline runs.
#[derive(Debug, Default)]
pub struct StaticStatsProvider {
    stats: HashMap<(String, StatsContext), RawPlayerStats>,
}

impl StaticStatsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record under its own (player, context) tuple.
    pub fn insert(&mut self, stats: RawPlayerStats) {
        let context = StatsContext::new(stats.period, stats.mode, stats.shard);
        self.stats
            .insert((stats.player_id.to_string(), context), stats);
    }

    pub fn with(mut self, stats: RawPlayerStats) -> Self {
        self.insert(stats);
        self
    }
}

#[async_trait]
impl StatsProvider for StaticStatsProvider {
    async fn fetch_raw_stats(
        &self,
        player_id: &PlayerId,
        context: &StatsContext,
    ) -> Result<RawPlayerStats, ProviderError> {
        self.stats
            .get(&(player_id.to_string(), *context))
            .cloned()
            .ok_or_else(|| ProviderError::NotFound {
                player_id: player_id.to_string(),
            })
    }
}
