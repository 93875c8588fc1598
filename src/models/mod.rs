// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Course, EducationLevel, ProgramType, ScoreBreakdown, ScoringWeights, UserProfile};
pub use requests::{CourseRequest, LocationQuery, RecommendRequest, SearchQuery};
pub use responses::{CourseListResponse, ErrorResponse, HealthResponse, RecommendResponse, WriteResponse};
