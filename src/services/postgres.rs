use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

use crate::models::{Course, EducationLevel, ProgramType};
use crate::services::store::{CourseStore, StoreError};

const COURSE_COLUMNS: &str = r#"
    id, name, description, provider, program, duration, weekly_hours, stipend,
    location, available_vacancies, min_education_required, areas_json,
    enrollment_start_date, enrollment_deadline, thumbnail_url, average_student_age
"#;

/// Storage representation of a course
///
/// Areas are flattened to a JSON array string and enums to their codes.
/// There is no score column: match scores never reach storage.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub provider: String,
    pub program: String,
    pub duration: String,
    pub weekly_hours: i32,
    pub stipend: f64,
    pub location: String,
    pub available_vacancies: i32,
    pub min_education_required: i16,
    pub areas_json: String,
    pub enrollment_start_date: DateTime<Utc>,
    pub enrollment_deadline: DateTime<Utc>,
    pub thumbnail_url: String,
    pub average_student_age: f64,
}

impl CourseRow {
    pub fn from_course(course: &Course) -> Result<Self, StoreError> {
        Ok(Self {
            id: course.id,
            name: course.name.clone(),
            description: course.description.clone(),
            provider: course.provider.clone(),
            program: course.program.as_str().to_string(),
            duration: course.duration.clone(),
            weekly_hours: to_i32(course.weekly_hours, "weekly_hours")?,
            stipend: course.stipend,
            location: course.location.clone(),
            available_vacancies: to_i32(course.available_vacancies, "available_vacancies")?,
            min_education_required: course.min_education_required.as_code(),
            areas_json: serde_json::to_string(&course.areas)?,
            enrollment_start_date: course.enrollment_start_date,
            enrollment_deadline: course.enrollment_deadline,
            thumbnail_url: course.thumbnail_url.clone(),
            average_student_age: course.average_student_age,
        })
    }

    pub fn into_course(self) -> Result<Course, StoreError> {
        let program = ProgramType::parse(&self.program)
            .ok_or_else(|| StoreError::InvalidData(format!("unknown program {}", self.program)))?;
        let min_education_required = EducationLevel::from_code(self.min_education_required)
            .ok_or_else(|| {
                StoreError::InvalidData(format!(
                    "unknown education level {}",
                    self.min_education_required
                ))
            })?;

        Ok(Course {
            id: self.id,
            name: self.name,
            description: self.description,
            provider: self.provider,
            program,
            duration: self.duration,
            weekly_hours: self.weekly_hours.max(0) as u32,
            stipend: self.stipend,
            location: self.location,
            available_vacancies: self.available_vacancies.max(0) as u32,
            min_education_required,
            areas: serde_json::from_str(&self.areas_json)?,
            enrollment_start_date: self.enrollment_start_date,
            enrollment_deadline: self.enrollment_deadline,
            thumbnail_url: self.thumbnail_url,
            average_student_age: self.average_student_age,
            match_score: 0.0,
        })
    }

    fn from_pg_row(row: &PgRow) -> Result<Self, StoreError> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            provider: row.try_get("provider")?,
            program: row.try_get("program")?,
            duration: row.try_get("duration")?,
            weekly_hours: row.try_get("weekly_hours")?,
            stipend: row.try_get("stipend")?,
            location: row.try_get("location")?,
            available_vacancies: row.try_get("available_vacancies")?,
            min_education_required: row.try_get("min_education_required")?,
            areas_json: row.try_get("areas_json")?,
            enrollment_start_date: row.try_get("enrollment_start_date")?,
            enrollment_deadline: row.try_get("enrollment_deadline")?,
            thumbnail_url: row.try_get("thumbnail_url")?,
            average_student_age: row.try_get("average_student_age")?,
        })
    }
}

fn to_i32(value: u32, field: &str) -> Result<i32, StoreError> {
    i32::try_from(value).map_err(|_| StoreError::InvalidData(format!("{} out of range: {}", field, value)))
}

/// PostgreSQL-backed course store
///
/// Courses are returned in insertion order so that ranking ties resolve the
/// same way on every request.
pub struct PostgresCourseStore {
    pool: PgPool,
}

impl PostgresCourseStore {
    /// Create a new store from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
        idle_timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from optional settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL course store");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            acquire_timeout_secs.unwrap_or(5),
            idle_timeout_secs.unwrap_or(600),
        )
        .await
    }

    /// Insert `courses` when the table is empty
    ///
    /// Returns the number of seeded courses.
    pub async fn seed_if_empty(&self, courses: &[Course]) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query("SELECT COUNT(*) AS total FROM courses")
            .fetch_one(&self.pool)
            .await?
            .try_get("total")?;

        if count > 0 {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut seeded = 0;
        for course in courses {
            let row = CourseRow::from_course(course)?;
            seeded += bind_row(sqlx::query(INSERT_SQL), &row)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }
        tx.commit().await?;

        tracing::info!("Seeded {} courses into an empty catalog", seeded);

        Ok(seeded)
    }
}

const INSERT_SQL: &str = r#"
    INSERT INTO courses (
        id, name, description, provider, program, duration, weekly_hours, stipend,
        location, available_vacancies, min_education_required, areas_json,
        enrollment_start_date, enrollment_deadline, thumbnail_url, average_student_age
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
    ON CONFLICT (id) DO NOTHING
"#;

const UPDATE_SQL: &str = r#"
    UPDATE courses SET
        name = $2,
        description = $3,
        provider = $4,
        program = $5,
        duration = $6,
        weekly_hours = $7,
        stipend = $8,
        location = $9,
        available_vacancies = $10,
        min_education_required = $11,
        areas_json = $12,
        enrollment_start_date = $13,
        enrollment_deadline = $14,
        thumbnail_url = $15,
        average_student_age = $16,
        updated_at = NOW()
    WHERE id = $1
"#;

fn bind_row<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    row: &'q CourseRow,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    query
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.description)
        .bind(&row.provider)
        .bind(&row.program)
        .bind(&row.duration)
        .bind(row.weekly_hours)
        .bind(row.stipend)
        .bind(&row.location)
        .bind(row.available_vacancies)
        .bind(row.min_education_required)
        .bind(&row.areas_json)
        .bind(row.enrollment_start_date)
        .bind(row.enrollment_deadline)
        .bind(&row.thumbnail_url)
        .bind(row.average_student_age)
}

#[async_trait]
impl CourseStore for PostgresCourseStore {
    async fn get_all(&self) -> Result<Vec<Course>, StoreError> {
        let query = format!("SELECT {} FROM courses ORDER BY seq ASC", COURSE_COLUMNS);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        let courses = rows
            .iter()
            .map(|row| CourseRow::from_pg_row(row).and_then(CourseRow::into_course))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Loaded {} courses from PostgreSQL", courses.len());

        Ok(courses)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Course>, StoreError> {
        let query = format!("SELECT {} FROM courses WHERE id = $1", COURSE_COLUMNS);

        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;

        row.map(|row| CourseRow::from_pg_row(&row).and_then(CourseRow::into_course))
            .transpose()
    }

    async fn insert(&self, course: &Course) -> Result<u64, StoreError> {
        let row = CourseRow::from_course(course)?;
        let result = bind_row(sqlx::query(INSERT_SQL), &row)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Inserted course {} ({})", course.id, course.name);

        Ok(result.rows_affected())
    }

    async fn update(&self, course: &Course) -> Result<u64, StoreError> {
        let row = CourseRow::from_course(course)?;
        let result = bind_row(sqlx::query(UPDATE_SQL), &row)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
