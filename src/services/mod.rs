// Service exports
pub mod cache;
pub mod postgres;
pub mod profiles;
pub mod repository;
pub mod store;

pub use cache::{CacheError, CacheKey, CacheManager, CacheStats};
pub use postgres::{CourseRow, PostgresCourseStore};
pub use profiles::{ProfileClient, ProfileError};
pub use repository::{CourseRepository, RepositoryError};
pub use store::{CourseStore, InMemoryCourseStore, StoreError};
