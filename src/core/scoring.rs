use crate::models::{Course, ScoreBreakdown, ScoringWeights, UserProfile};
use crate::core::filters::contains_ignore_case;

/// Age difference (years) that still earns the full age points
pub const AGE_NEAR_YEARS: f64 = 10.0;

/// Age difference (years) that still earns the reduced age points
pub const AGE_FAR_YEARS: f64 = 20.0;

/// Calculate a match score (0-100) for a course against a user profile
///
/// Scoring formula with default weights:
/// score = min(100,
///     location      # 30 if the course location contains the profile location, else 10
///   + education     # 25 if the profile meets the minimum education level
///   + interests     # 8 per interest found in the course areas, capped at 25
///   + age           # 20 within 10 years of the average student, 10 within 20
///   + program       # 10 if the profile is eligible for the course program
/// )
pub fn calculate_match_score(
    profile: &UserProfile,
    course: &Course,
    weights: &ScoringWeights,
) -> f64 {
    score_breakdown(profile, course, weights).total
}

/// Calculate the per-criterion contributions and the clamped total
pub fn score_breakdown(
    profile: &UserProfile,
    course: &Course,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let location = calculate_location_score(&profile.location, &course.location, weights);
    let education = calculate_education_score(profile, course, weights);
    let (interests, _) = calculate_interest_score(&profile.interests, &course.areas, weights);
    let age = calculate_age_score(profile.age, course.average_student_age, weights);
    let program = calculate_program_bonus(profile, course, weights);

    // Clamped once, after the bonus
    let total = (location + education + interests + age + program).clamp(0.0, 100.0);

    ScoreBreakdown {
        location,
        education,
        interests,
        age,
        program,
        total,
    }
}

/// Location score: full points on a case-insensitive substring match,
/// baseline points otherwise (never zero)
#[inline]
fn calculate_location_score(
    profile_location: &str,
    course_location: &str,
    weights: &ScoringWeights,
) -> f64 {
    if contains_ignore_case(course_location, profile_location) {
        weights.location
    } else {
        weights.location_baseline
    }
}

#[inline]
fn calculate_education_score(
    profile: &UserProfile,
    course: &Course,
    weights: &ScoringWeights,
) -> f64 {
    if profile.education_level >= course.min_education_required {
        weights.education
    } else {
        0.0
    }
}

/// Interest score: exact, case-sensitive tag equality, capped
///
/// Returns the score and the number of matched interests.
#[inline]
fn calculate_interest_score(
    interests: &[String],
    areas: &[String],
    weights: &ScoringWeights,
) -> (f64, usize) {
    let matched = interests
        .iter()
        .filter(|interest| areas.contains(interest))
        .count();

    let score = (matched as f64 * weights.interest_per_match).min(weights.interest_cap);

    (score, matched)
}

/// Age score: step function on the distance to the rounded average age
///
/// Computed in f64 so any stored average is accepted. A NaN average is
/// never near, so it earns nothing.
#[inline]
fn calculate_age_score(age: u32, average_student_age: f64, weights: &ScoringWeights) -> f64 {
    let difference = (f64::from(age) - average_student_age.round()).abs();

    if difference <= AGE_NEAR_YEARS {
        weights.age_near
    } else if difference <= AGE_FAR_YEARS {
        weights.age_far
    } else {
        0.0
    }
}

#[inline]
fn calculate_program_bonus(
    profile: &UserProfile,
    course: &Course,
    weights: &ScoringWeights,
) -> f64 {
    if profile.eligible_programs.contains(&course.program) {
        weights.program_bonus
    } else {
        0.0
    }
}
