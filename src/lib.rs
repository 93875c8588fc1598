//! ConectaBairro course matching service
//!
//! This library ranks vocational courses against a user profile using a
//! weighted multi-criteria score, and exposes the course catalog through a
//! repository facade backed by a pluggable store.

pub mod config;
pub mod core;
pub mod mock_data;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_match_score, Recommender, RecommendationResult};
pub use models::{Course, EducationLevel, ProgramType, ScoringWeights, UserProfile};
pub use services::{CourseRepository, CourseStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let recommender = Recommender::default();
        let result = recommender.recommend(&UserProfile::default(), &mock_data::mock_courses());
        assert_eq!(result.total_candidates, 10);
    }
}
