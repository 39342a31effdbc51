use std::fmt::Display;

use redis::{AsyncCommands, Client};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Creates a Redis client for caching
///
/// Establishes a connection to Redis for fast data caching.
/// Uses connection pooling via the connection-manager feature.
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Cache keys, namespaced per listing.
///
/// Only user-independent listings are cached; per-user rankings are
/// recomputed on every request because interaction history shifts the
/// view and engagement signals between calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    PopularCourses(usize),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::PopularCourses(limit) => write!(f, "popular:{}", limit),
        }
    }
}

/// JSON value cache backed by Redis.
#[derive(Clone)]
pub struct Cache {
    redis_client: Client,
}

impl Cache {
    pub fn new(redis_client: Client) -> Self {
        Self { redis_client }
    }

    /// Attempts to retrieve and deserialize a cached value.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &CacheKey) -> AppResult<Option<T>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        let cached: Option<String> = conn.get(key.to_string()).await.map_err(|e| {
            tracing::warn!(error = %e, "Redis get failed");
            e
        })?;

        match cached {
            Some(json) => {
                let value: T = serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Cache deserialization error: {}", e))
                })?;
                tracing::debug!(key = %key, "Cache hit");
                Ok(Some(value))
            }
            None => {
                tracing::debug!(key = %key, "Cache miss");
                Ok(None)
            }
        }
    }

    /// Serializes and stores a value with a TTL.
    pub async fn set_json<T: Serialize>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl_secs: u64,
    ) -> AppResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::Internal(format!("Cache serialization error: {}", e)))?;

        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        let _: () = conn.set_ex(key.to_string(), json, ttl_secs).await.map_err(|e| {
            tracing::warn!(error = %e, "Redis set failed");
            e
        })?;

        tracing::debug!(key = %key, ttl = ttl_secs, "Cached value");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_keys_are_namespaced() {
        assert_eq!(CacheKey::PopularCourses(10).to_string(), "popular:10");
        assert_eq!(CacheKey::PopularCourses(3).to_string(), "popular:3");
    }
}
