// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use filters::{contains_ignore_case, courses_by_location, matches_location, matches_search_term, search_courses};
pub use matcher::{RecommendationResult, Recommender, DEFAULT_MAX_RESULTS, DEFAULT_MIN_SCORE};
pub use scoring::{calculate_match_score, score_breakdown};
