use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::core::{courses_by_location, search_courses, RecommendationResult, Recommender};
use crate::models::{Course, UserProfile};
use crate::services::cache::{CacheError, CacheKey, CacheManager};
use crate::services::store::{CourseStore, StoreError};

/// Errors surfaced by the course repository
///
/// Callers are expected to catch `Store` on read paths and fall back to the
/// built-in catalog.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Course store error: {0}")]
    Store(#[from] StoreError),
}

/// Course repository facade
///
/// Exposes search, lookup, recommendation and CRUD over a course store.
/// Catalog snapshots are optionally cached; any write invalidates them.
///
/// Every write bumps `generation`. A read that overlapped a write does not
/// leave its result in the cache.
pub struct CourseRepository {
    store: Arc<dyn CourseStore>,
    cache: Option<Arc<CacheManager>>,
    recommender: Recommender,
    generation: AtomicU64,
}

impl CourseRepository {
    pub fn new(
        store: Arc<dyn CourseStore>,
        cache: Option<Arc<CacheManager>>,
        recommender: Recommender,
    ) -> Self {
        Self {
            store,
            cache,
            recommender,
            generation: AtomicU64::new(0),
        }
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    /// Read the full catalog once, from cache when available
    async fn snapshot(&self) -> Result<Vec<Course>, RepositoryError> {
        let key = CacheKey::catalog();

        if let Some(cache) = &self.cache {
            match cache.get::<Vec<Course>>(&key).await {
                Ok(courses) => return Ok(courses),
                Err(CacheError::CacheMiss(_)) => {}
                Err(e) => tracing::warn!("Catalog cache read failed, loading from store: {}", e),
            }
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let courses = self.store.get_all().await?;
        self.cache_if_current(&key, &courses, generation).await;

        Ok(courses)
    }

    pub async fn get_all(&self) -> Result<Vec<Course>, RepositoryError> {
        self.snapshot().await
    }

    /// Courses whose name, description or provider contain `term`
    ///
    /// A missing or blank term returns the whole catalog.
    pub async fn search(&self, term: Option<&str>) -> Result<Vec<Course>, RepositoryError> {
        let catalog = self.snapshot().await?;
        Ok(search_courses(&catalog, term))
    }

    /// Courses whose location contains `location`
    pub async fn get_by_location(&self, location: &str) -> Result<Vec<Course>, RepositoryError> {
        let catalog = self.snapshot().await?;
        Ok(courses_by_location(&catalog, location))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Course>, RepositoryError> {
        let key = CacheKey::course(&id);

        if let Some(cache) = &self.cache {
            if let Ok(course) = cache.get::<Course>(&key).await {
                return Ok(Some(course));
            }
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let course = self.store.get_by_id(id).await?;
        if let Some(course) = &course {
            self.cache_if_current(&key, course, generation).await;
        }

        Ok(course)
    }

    /// Ranked recommendations for a profile over one catalog snapshot
    pub async fn get_recommended(
        &self,
        profile: &UserProfile,
    ) -> Result<RecommendationResult, RepositoryError> {
        let catalog = self.snapshot().await?;
        let result = self.recommender.recommend(profile, &catalog);

        tracing::debug!(
            "Recommended {} of {} courses for profile {}",
            result.courses.len(),
            result.total_candidates,
            profile.id
        );

        Ok(result)
    }

    pub async fn insert(&self, course: &Course) -> Result<u64, RepositoryError> {
        let affected = self.store.insert(course).await?;
        if affected > 0 {
            self.invalidate(course.id).await;
        }
        Ok(affected)
    }

    pub async fn update(&self, course: &Course) -> Result<u64, RepositoryError> {
        let affected = self.store.update(course).await?;
        if affected > 0 {
            self.invalidate(course.id).await;
        }
        Ok(affected)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, RepositoryError> {
        let affected = self.store.delete(id).await?;
        if affected > 0 {
            self.invalidate(id).await;
        }
        Ok(affected)
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await.unwrap_or(false)
    }

    /// Cache a value read at `generation` unless a write has happened since
    ///
    /// The generation is checked again after the write to the cache, so a
    /// write racing with `set` still removes the stale entry.
    async fn cache_if_current<T: Serialize>(&self, key: &str, value: &T, generation: u64) {
        let Some(cache) = &self.cache else {
            return;
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Skipping cache fill for {}, a write happened during the read", key);
            return;
        }

        if let Err(e) = cache.set(key, value).await {
            tracing::warn!("Failed to cache {}: {}", key, e);
            return;
        }

        if self.generation.load(Ordering::SeqCst) != generation {
            if let Err(e) = cache.delete(key).await {
                tracing::warn!("Failed to drop stale cache key {}: {}", key, e);
            }
        }
    }

    async fn invalidate(&self, id: Uuid) {
        self.generation.fetch_add(1, Ordering::SeqCst);

        let Some(cache) = &self.cache else {
            return;
        };

        for key in [CacheKey::catalog(), CacheKey::course(&id)] {
            if let Err(e) = cache.delete(&key).await {
                tracing::warn!("Failed to invalidate cache key {}: {}", key, e);
            }
        }
    }
}
