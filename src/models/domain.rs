use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Formal education level, ordered from lowest to highest
///
/// Comparisons between levels use the declaration order, so
/// `EducationLevel::Medio >= EducationLevel::Fundamental` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum EducationLevel {
    #[default]
    None,
    Fundamental,
    Medio,
    Superior,
}

impl EducationLevel {
    /// Numeric code used by the course table
    pub fn as_code(self) -> i16 {
        match self {
            EducationLevel::None => 0,
            EducationLevel::Fundamental => 1,
            EducationLevel::Medio => 2,
            EducationLevel::Superior => 3,
        }
    }

    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(EducationLevel::None),
            1 => Some(EducationLevel::Fundamental),
            2 => Some(EducationLevel::Medio),
            3 => Some(EducationLevel::Superior),
            _ => None,
        }
    }
}

/// Government or training scheme a course belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProgramType {
    #[default]
    AutonomiaERenda,
    #[serde(rename = "PronatecFIC")]
    PronatecFic,
    PronatecTecnico,
}

impl ProgramType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProgramType::AutonomiaERenda => "AutonomiaERenda",
            ProgramType::PronatecFic => "PronatecFIC",
            ProgramType::PronatecTecnico => "PronatecTecnico",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "AutonomiaERenda" => Some(ProgramType::AutonomiaERenda),
            "PronatecFIC" => Some(ProgramType::PronatecFic),
            "PronatecTecnico" => Some(ProgramType::PronatecTecnico),
            _ => None,
        }
    }
}

/// User profile used to personalise course recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Authentication identity, empty until login is wired
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_age")]
    pub age: u32,
    #[serde(default)]
    pub education_level: EducationLevel,
    /// CEP or neighbourhood/city free text
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub eligible_programs: Vec<ProgramType>,
    // Gamification, never read by matching
    #[serde(default)]
    pub xp: u32,
    #[serde(default = "default_level")]
    pub current_level: u32,
    #[serde(default)]
    pub enrolled_course_ids: Vec<Uuid>,
    #[serde(default)]
    pub completed_course_ids: Vec<Uuid>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_age() -> u32 { 25 }
fn default_level() -> u32 { 1 }

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: String::new(),
            name: String::new(),
            age: default_age(),
            education_level: EducationLevel::None,
            location: String::new(),
            interests: Vec::new(),
            eligible_programs: Vec::new(),
            xp: 0,
            current_level: default_level(),
            enrolled_course_ids: Vec::new(),
            completed_course_ids: Vec::new(),
            created_at: None,
        }
    }
}

/// A vocational training offering
///
/// `match_score` is not part of the canonical record. It is only filled in
/// on copies returned by the recommender and is never written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// SENAI, SENAC, IFPE, IFRS, ...
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub program: ProgramType,
    #[serde(default = "default_duration")]
    pub duration: String,
    #[serde(default = "default_weekly_hours")]
    pub weekly_hours: u32,
    /// Monthly stipend in BRL
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
    #[serde(default = "default_average_student_age")]
    pub average_student_age: f64,
    #[serde(default)]
    pub match_score: f64,
}

fn default_duration() -> String { "6 meses".to_string() }
fn default_weekly_hours() -> u32 { 20 }
fn default_average_student_age() -> f64 { 30.0 }

impl Default for Course {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            description: String::new(),
            provider: String::new(),
            program: ProgramType::default(),
            duration: default_duration(),
            weekly_hours: default_weekly_hours(),
            stipend: 0.0,
            location: String::new(),
            available_vacancies: 0,
            min_education_required: EducationLevel::None,
            areas: Vec::new(),
            enrollment_start_date: now,
            enrollment_deadline: now,
            thumbnail_url: String::new(),
            average_student_age: default_average_student_age(),
            match_score: 0.0,
        }
    }
}

impl Course {
    /// Copy of this course carrying `score` as its match score
    pub fn with_match_score(&self, score: f64) -> Self {
        Self {
            match_score: score,
            ..self.clone()
        }
    }
}

/// Points awarded by each matching criterion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Course location contains the profile location
    pub location: f64,
    /// Awarded when the location does not match
    pub location_baseline: f64,
    pub education: f64,
    /// Per matched interest, before the cap
    pub interest_per_match: f64,
    pub interest_cap: f64,
    /// Age difference within 10 years
    pub age_near: f64,
    /// Age difference within 20 years
    pub age_far: f64,
    pub program_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            location: 30.0,
            location_baseline: 10.0,
            education: 25.0,
            interest_per_match: 8.0,
            interest_cap: 25.0,
            age_near: 20.0,
            age_far: 10.0,
            program_bonus: 10.0,
        }
    }
}

/// Per-criterion contributions of one score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub location: f64,
    pub education: f64,
    pub interests: f64,
    pub age: f64,
    pub program: f64,
    pub total: f64,
}
