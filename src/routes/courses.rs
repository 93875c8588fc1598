use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::{courses_by_location, search_courses};
use crate::models::{
    Course, CourseListResponse, CourseRequest, ErrorResponse, HealthResponse, LocationQuery,
    RecommendRequest, RecommendResponse, SearchQuery, UserProfile, WriteResponse,
};
use crate::services::{CourseRepository, ProfileClient, ProfileError};

/// Set on single-course responses; `true` when served from the fallback catalog
pub const DEGRADED_HEADER: &str = "X-Conecta-Degraded";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<CourseRepository>,
    pub profiles: Arc<ProfileClient>,
    /// Served when the course store cannot be read
    pub fallback_catalog: Arc<Vec<Course>>,
}

/// Configure all course-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/courses", web::get().to(list_courses))
        .route("/courses", web::post().to(create_course))
        .route("/courses/location", web::get().to(courses_by_location_handler))
        .route("/courses/recommendations", web::post().to(recommend_courses))
        .route("/courses/{id}", web::get().to(get_course))
        .route("/courses/{id}", web::put().to(update_course))
        .route("/courses/{id}", web::delete().to(delete_course));
}

fn error_response(error: &str, message: impl ToString, status_code: u16) -> ErrorResponse {
    ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code,
    }
}

fn list_response(courses: Vec<Course>, degraded: bool) -> HttpResponse {
    HttpResponse::Ok().json(CourseListResponse {
        total_results: courses.len(),
        courses,
        degraded,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.repository.health_check().await;

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search courses
///
/// GET /api/v1/courses?search={term}
async fn list_courses(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let term = query.search.as_deref();

    match state.repository.search(term).await {
        Ok(courses) => list_response(courses, false),
        Err(e) => {
            tracing::warn!("Course store unavailable, searching fallback catalog: {}", e);
            list_response(search_courses(&state.fallback_catalog, term), true)
        }
    }
}

/// Courses by location
///
/// GET /api/v1/courses/location?location={location}
async fn courses_by_location_handler(
    state: web::Data<AppState>,
    query: web::Query<LocationQuery>,
) -> impl Responder {
    let location = match query.location.as_deref() {
        Some(location) => location,
        None => {
            return HttpResponse::BadRequest().json(error_response(
                "Missing location parameter",
                "location query parameter is required",
                400,
            ));
        }
    };

    match state.repository.get_by_location(location).await {
        Ok(courses) => list_response(courses, false),
        Err(e) => {
            tracing::warn!("Course store unavailable, filtering fallback catalog: {}", e);
            list_response(courses_by_location(&state.fallback_catalog, location), true)
        }
    }
}

/// Get a single course
///
/// GET /api/v1/courses/{id}
async fn get_course(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    let (course, degraded) = match state.repository.get_by_id(id).await {
        Ok(course) => (course, false),
        Err(e) => {
            tracing::warn!("Course store unavailable, looking up {} in fallback catalog: {}", id, e);
            (state.fallback_catalog.iter().find(|c| c.id == id).cloned(), true)
        }
    };

    match course {
        Some(course) => HttpResponse::Ok()
            .insert_header((DEGRADED_HEADER, degraded.to_string()))
            .json(course),
        None => HttpResponse::NotFound().json(error_response(
            "Course not found",
            format!("No course with id {}", id),
            404,
        )),
    }
}

/// Create a course
///
/// POST /api/v1/courses
async fn create_course(
    state: web::Data<AppState>,
    req: web::Json<CourseRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(error_response("Validation failed", errors, 400));
    }

    let course = req.into_inner().into_course(Uuid::new_v4());

    match state.repository.insert(&course).await {
        Ok(affected) => {
            tracing::info!("Created course {} ({})", course.id, course.name);
            HttpResponse::Created().json(WriteResponse {
                id: course.id,
                affected,
            })
        }
        Err(e) => {
            tracing::error!("Failed to create course: {}", e);
            HttpResponse::ServiceUnavailable().json(error_response("Failed to create course", e, 503))
        }
    }
}

/// Replace a course
///
/// PUT /api/v1/courses/{id}
async fn update_course(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<CourseRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(error_response("Validation failed", errors, 400));
    }

    // The path id wins over anything in the body
    let id = path.into_inner();
    let course = req.into_inner().into_course(id);

    match state.repository.update(&course).await {
        Ok(0) => HttpResponse::NotFound().json(error_response(
            "Course not found",
            format!("No course with id {}", id),
            404,
        )),
        Ok(affected) => HttpResponse::Ok().json(WriteResponse { id, affected }),
        Err(e) => {
            tracing::error!("Failed to update course {}: {}", id, e);
            HttpResponse::ServiceUnavailable().json(error_response("Failed to update course", e, 503))
        }
    }
}

/// Delete a course
///
/// DELETE /api/v1/courses/{id}
async fn delete_course(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    match state.repository.delete(id).await {
        Ok(0) => HttpResponse::NotFound().json(error_response(
            "Course not found",
            format!("No course with id {}", id),
            404,
        )),
        Ok(affected) => HttpResponse::Ok().json(WriteResponse { id, affected }),
        Err(e) => {
            tracing::error!("Failed to delete course {}: {}", id, e);
            HttpResponse::ServiceUnavailable().json(error_response("Failed to delete course", e, 503))
        }
    }
}

/// Recommend courses for a profile
///
/// POST /api/v1/courses/recommendations
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "profile": { "location": "São Paulo, SP", "educationLevel": "Medio", ... },
///   "explain": false
/// }
/// ```
async fn recommend_courses(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(error_response("Validation failed", errors, 400));
    }

    let RecommendRequest { user_id, profile, explain } = req.into_inner();

    let profile: UserProfile = match (profile, user_id) {
        (Some(profile), _) => profile,
        (None, Some(user_id)) => match state.profiles.get_profile(&user_id).await {
            Ok(profile) => profile,
            Err(ProfileError::NotFound(message)) => {
                return HttpResponse::NotFound().json(error_response("Profile not found", message, 404));
            }
            Err(e) => {
                tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
                return HttpResponse::BadGateway().json(error_response(
                    "Failed to fetch user profile",
                    e,
                    502,
                ));
            }
        },
        // Rejected by validation
        (None, None) => {
            return HttpResponse::BadRequest().json(error_response(
                "Validation failed",
                "either userId or profile is required",
                400,
            ));
        }
    };

    let recommender = state.repository.recommender();

    let (result, degraded) = match state.repository.get_recommended(&profile).await {
        Ok(result) => (result, false),
        Err(e) => {
            tracing::warn!("Course store unavailable, recommending from fallback catalog: {}", e);
            (recommender.recommend(&profile, &state.fallback_catalog), true)
        }
    };

    let breakdowns = explain.then(|| {
        result
            .courses
            .iter()
            .map(|course| recommender.explain(&profile, course))
            .collect()
    });

    tracing::info!(
        "Returning {} recommendations for profile {} (from {} courses)",
        result.courses.len(),
        profile.id,
        result.total_candidates
    );

    HttpResponse::Ok().json(RecommendResponse {
        courses: result.courses,
        total_candidates: result.total_candidates,
        breakdowns,
        degraded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_error_response_body() {
        let body = error_response("Course not found", "No course with id 1", 404);

        assert_eq!(body.status_code, 404);
        assert_eq!(body.error, "Course not found");
    }
}
