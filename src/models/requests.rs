use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};
use crate::models::domain::{Course, EducationLevel, ProgramType, UserProfile};

/// Request for course recommendations
///
/// Either `userId` (profile fetched from the profile backend) or an inline
/// `profile` must be supplied. An inline profile wins when both are present.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_profile_source"))]
pub struct RecommendRequest {
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
    /// Include per-criterion score breakdowns in the response
    #[serde(default)]
    pub explain: bool,
}

fn validate_profile_source(req: &RecommendRequest) -> Result<(), ValidationError> {
    let has_user_id = req
        .user_id
        .as_deref()
        .map(|id| !id.trim().is_empty())
        .unwrap_or(false);

    if has_user_id || req.profile.is_some() {
        Ok(())
    } else {
        let mut error = ValidationError::new("missing_profile");
        error.message = Some("either userId or profile is required".into());
        Err(error)
    }
}

/// Query string for course search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Option<String>,
}

/// Query string for the location filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationQuery {
    #[serde(default)]
    pub location: Option<String>,
}

/// Body for creating or replacing a course
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub program: ProgramType,
    #[serde(default = "default_duration")]
    pub duration: String,
    #[serde(default = "default_weekly_hours")]
    pub weekly_hours: u32,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub stipend: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub available_vacancies: u32,
    #[serde(default)]
    pub min_education_required: EducationLevel,
    #[serde(default)]
    pub areas: Vec<String>,
    #[serde(default = "Utc::now")]
    pub enrollment_start_date: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub enrollment_deadline: DateTime<Utc>,
    #[serde(default)]
    pub thumbnail_url: String,
    #[validate(range(min = 0.0, max = 120.0))]
    #[serde(default = "default_average_student_age")]
    pub average_student_age: f64,
}

fn default_duration() -> String { "6 meses".to_string() }
fn default_weekly_hours() -> u32 { 20 }
fn default_average_student_age() -> f64 { 30.0 }

impl CourseRequest {
    /// Build the course value for `id`
    pub fn into_course(self, id: Uuid) -> Course {
        Course {
            id,
            name: self.name,
            description: self.description,
            provider: self.provider,
            program: self.program,
            duration: self.duration,
            weekly_hours: self.weekly_hours,
            stipend: self.stipend,
            location: self.location,
            available_vacancies: self.available_vacancies,
            min_education_required: self.min_education_required,
            areas: self.areas,
            enrollment_start_date: self.enrollment_start_date,
            enrollment_deadline: self.enrollment_deadline,
            thumbnail_url: self.thumbnail_url,
            average_student_age: self.average_student_age,
            match_score: 0.0,
        }
    }
}
