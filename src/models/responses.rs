use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::models::domain::{Course, ScoreBreakdown};

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub courses: Vec<Course>,
    pub total_candidates: usize,
    /// Per-course breakdowns, in the same order as `courses`, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdowns: Option<Vec<ScoreBreakdown>>,
    /// True when the catalog came from the built-in fallback data set
    pub degraded: bool,
}

/// Response for catalog listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseListResponse {
    pub courses: Vec<Course>,
    pub total_results: usize,
    pub degraded: bool,
}

/// Response for write operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResponse {
    pub id: Uuid,
    pub affected: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
