use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Course;

/// Errors surfaced by a course store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid stored value: {0}")]
    InvalidData(String),
}

/// Persistence collaborator behind the course repository
///
/// Write operations return the number of affected records.
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Course>, StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Course>, StoreError>;

    async fn insert(&self, course: &Course) -> Result<u64, StoreError>;

    async fn update(&self, course: &Course) -> Result<u64, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<u64, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Course store kept in process memory
///
/// Insertion order is preserved. Scores are stripped on write, matching the
/// database store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCourseStore {
    courses: Arc<RwLock<Vec<Course>>>,
}

impl InMemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_courses(courses: Vec<Course>) -> Self {
        let courses = courses.into_iter().map(|c| c.with_match_score(0.0)).collect();
        Self {
            courses: Arc::new(RwLock::new(courses)),
        }
    }
}

#[async_trait]
impl CourseStore for InMemoryCourseStore {
    async fn get_all(&self) -> Result<Vec<Course>, StoreError> {
        Ok(self.courses.read().await.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Course>, StoreError> {
        Ok(self.courses.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, course: &Course) -> Result<u64, StoreError> {
        let mut courses = self.courses.write().await;
        if courses.iter().any(|c| c.id == course.id) {
            return Ok(0);
        }
        courses.push(course.with_match_score(0.0));
        Ok(1)
    }

    async fn update(&self, course: &Course) -> Result<u64, StoreError> {
        let mut courses = self.courses.write().await;
        match courses.iter_mut().find(|c| c.id == course.id) {
            Some(existing) => {
                *existing = course.with_match_score(0.0);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<u64, StoreError> {
        let mut courses = self.courses.write().await;
        let before = courses.len();
        courses.retain(|c| c.id != id);
        Ok((before - courses.len()) as u64)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_course(name: &str) -> Course {
        Course {
            name: name.to_string(),
            ..Course::default()
        }
    }

    #[tokio::test]
    async fn test_in_memory_crud() {
        let store = InMemoryCourseStore::new();
        let course = create_course("Confeiteiro");

        assert_eq!(store.insert(&course).await.unwrap(), 1);
        assert_eq!(store.insert(&course).await.unwrap(), 0);

        let mut renamed = course.clone();
        renamed.name = "Confeiteiro Avançado".to_string();
        assert_eq!(store.update(&renamed).await.unwrap(), 1);
        assert_eq!(
            store.get_by_id(course.id).await.unwrap().map(|c| c.name),
            Some("Confeiteiro Avançado".to_string())
        );

        assert_eq!(store.delete(course.id).await.unwrap(), 1);
        assert_eq!(store.delete(course.id).await.unwrap(), 0);
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_strips_scores() {
        let store = InMemoryCourseStore::new();
        let scored = create_course("Soldador").with_match_score(90.0);

        store.insert(&scored).await.unwrap();

        let stored = store.get_by_id(scored.id).await.unwrap().unwrap();
        assert_eq!(stored.match_score, 0.0);
    }

    #[test]
    fn test_update_missing_course() {
        let store = InMemoryCourseStore::with_courses(vec![create_course("Confeiteiro")]);
        let missing = create_course("Operador de Computador");

        let affected = tokio_test::block_on(store.update(&missing)).unwrap();

        assert_eq!(affected, 0);
    }
}
