use moka::future::{Cache, CacheBuilder};
use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Shared Redis tier, entries expire after the configured TTL
struct RedisTier {
    conn: Mutex<ConnectionManager>,
    ttl_secs: u64,
}

impl RedisTier {
    async fn fetch(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.lock().await;
        Ok(redis::cmd("GET").arg(key).query_async(&mut *conn).await?)
    }

    async fn store(&self, key: &str, json: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.lock().await;
        redis::cmd("SETEX")
            .arg(key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.lock().await;
        redis::cmd("DEL").arg(key).query_async::<()>(&mut *conn).await?;
        Ok(())
    }
}

/// Two-tier cache for catalog snapshots and single courses
///
/// The moka tier is always present and local to the process. The Redis tier
/// is optional and shared between instances. Values are stored as JSON in
/// both tiers. Recommendation results are never cached, they depend on the
/// profile.
pub struct CacheManager {
    local: Cache<String, String>,
    shared: Option<RedisTier>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a cache manager with a Redis tier at `redis_url`
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self {
            local: local_tier(l1_size, ttl_secs),
            shared: Some(RedisTier {
                conn: Mutex::new(conn),
                ttl_secs,
            }),
            ttl_secs,
        })
    }

    /// Create a cache manager without a Redis tier
    pub fn local(l1_size: u64, ttl_secs: u64) -> Self {
        Self {
            local: local_tier(l1_size, ttl_secs),
            shared: None,
            ttl_secs,
        }
    }

    pub fn has_l2(&self) -> bool {
        self.shared.is_some()
    }

    /// Look `key` up locally, then in Redis
    ///
    /// A Redis hit is copied into the local tier.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, CacheError> {
        if let Some(json) = self.local.get(key).await {
            tracing::trace!("Local cache hit: {}", key);
            return Ok(serde_json::from_str(&json)?);
        }

        let json = match &self.shared {
            Some(shared) => shared.fetch(key).await?,
            None => None,
        };

        match json {
            Some(json) => {
                tracing::trace!("Redis cache hit: {}", key);
                let value = serde_json::from_str(&json)?;
                self.local.insert(key.to_string(), json).await;
                Ok(value)
            }
            None => Err(CacheError::CacheMiss(key.to_string())),
        }
    }

    /// Write `value` to every tier
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let json = serde_json::to_string(value)?;

        if let Some(shared) = &self.shared {
            shared.store(key, &json).await?;
        }
        self.local.insert(key.to_string(), json).await;

        tracing::trace!("Cached {}", key);
        Ok(())
    }

    /// Drop `key` from every tier
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.local.invalidate(key).await;

        if let Some(shared) = &self.shared {
            shared.remove(key).await?;
        }

        tracing::debug!("Invalidated cache key {}", key);
        Ok(())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            l1_size: self.local.entry_count(),
            l2_enabled: self.has_l2(),
            ttl_secs: self.ttl_secs,
        }
    }
}

fn local_tier(max_entries: u64, ttl_secs: u64) -> Cache<String, String> {
    CacheBuilder::new(max_entries)
        .time_to_live(Duration::from_secs(ttl_secs))
        .build()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub l1_size: u64,
    pub l2_enabled: bool,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key of the full catalog snapshot
    pub fn catalog() -> String {
        "catalog:all".to_string()
    }

    pub fn course(course_id: &Uuid) -> String {
        format!("course:{}", course_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_redis_tier_round_trip() {
        let cache = CacheManager::new("redis://127.0.0.1:6379", 1000, 60)
            .await
            .expect("Failed to connect to Redis");
        let key = CacheKey::course(&Uuid::new_v4());

        cache.set(&key, &"Soldador").await.unwrap();
        let cached: String = cache.get(&key).await.unwrap();
        assert_eq!(cached, "Soldador");

        cache.delete(&key).await.unwrap();
        assert!(cache.get::<String>(&key).await.is_err());
    }

    #[tokio::test]
    async fn test_local_cache_set_get_delete() {
        let cache = CacheManager::local(100, 60);
        let key = CacheKey::catalog();

        assert!(matches!(
            cache.get::<Vec<String>>(&key).await,
            Err(CacheError::CacheMiss(_))
        ));

        let names = vec!["Confeiteiro".to_string(), "Soldador".to_string()];
        cache.set(&key, &names).await.unwrap();
        let cached: Vec<String> = cache.get(&key).await.unwrap();
        assert_eq!(cached, names);

        cache.delete(&key).await.unwrap();
        assert!(cache.get::<Vec<String>>(&key).await.is_err());
        assert!(!cache.stats().l2_enabled);
    }

    #[tokio::test]
    async fn test_mismatched_type_is_serialization_error() {
        let cache = CacheManager::local(10, 60);
        cache.set("course:x", &"not a number").await.unwrap();

        assert!(matches!(
            cache.get::<u32>("course:x").await,
            Err(CacheError::Serialization(_))
        ));
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::catalog(), "catalog:all");
        assert_eq!(
            CacheKey::course(&Uuid::nil()),
            "course:00000000-0000-0000-0000-000000000000"
        );
    }
}
