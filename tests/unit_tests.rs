// Unit tests for the course matching rules

use conecta_match::core::{calculate_match_score, score_breakdown, Recommender};
use conecta_match::models::{Course, EducationLevel, ProgramType, ScoringWeights, UserProfile};

fn create_profile() -> UserProfile {
    UserProfile {
        age: 30,
        education_level: EducationLevel::Medio,
        location: "Recife".to_string(),
        interests: ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect(),
        eligible_programs: vec![ProgramType::AutonomiaERenda],
        ..UserProfile::default()
    }
}

/// Build a course whose contribution per criterion against `create_profile` is known
///
/// `age_tier`: 2 = within 10 years, 1 = within 20 years, 0 = further away
fn create_course(location_match: bool, education_ok: bool, interests: usize, age_tier: u8, program: bool) -> Course {
    Course {
        name: format!("{}-{}-{}-{}-{}", location_match, education_ok, interests, age_tier, program),
        location: if location_match { "Recife, PE" } else { "Canoas, RS" }.to_string(),
        min_education_required: if education_ok { EducationLevel::Fundamental } else { EducationLevel::Superior },
        areas: ["A", "B", "C", "D"].iter().take(interests).map(|s| s.to_string()).collect(),
        average_student_age: match age_tier {
            2 => 30.0,
            1 => 45.0,
            _ => 60.0,
        },
        program: if program { ProgramType::AutonomiaERenda } else { ProgramType::PronatecFic },
        ..Course::default()
    }
}

#[test]
fn test_score_bounds_over_all_combinations() {
    let profile = create_profile();
    let weights = ScoringWeights::default();

    for location_match in [true, false] {
        for education_ok in [true, false] {
            for interests in 0..=4 {
                for age_tier in 0..=2 {
                    for program in [true, false] {
                        let course = create_course(location_match, education_ok, interests, age_tier, program);
                        let score = calculate_match_score(&profile, &course, &weights);
                        assert!((0.0..=100.0).contains(&score), "Score {} out of range for {}", score, course.name);
                    }
                }
            }
        }
    }
}

#[test]
fn test_location_contribution_is_30_or_10() {
    let profile = create_profile();
    let weights = ScoringWeights::default();

    let matched = score_breakdown(&profile, &create_course(true, false, 0, 0, false), &weights);
    let unmatched = score_breakdown(&profile, &create_course(false, false, 0, 0, false), &weights);

    assert_eq!(matched.location, 30.0);
    assert_eq!(unmatched.location, 10.0);
    assert_eq!(matched.total, 30.0);
    assert_eq!(unmatched.total, 10.0);
}

#[test]
fn test_education_gate_uses_ordering() {
    let weights = ScoringWeights::default();
    let mut profile = create_profile();
    let mut course = create_course(false, true, 0, 0, false);

    profile.education_level = EducationLevel::Medio;
    course.min_education_required = EducationLevel::Fundamental;
    assert_eq!(score_breakdown(&profile, &course, &weights).education, 25.0);

    profile.education_level = EducationLevel::Fundamental;
    course.min_education_required = EducationLevel::Medio;
    assert_eq!(score_breakdown(&profile, &course, &weights).education, 0.0);

    profile.education_level = EducationLevel::Superior;
    course.min_education_required = EducationLevel::None;
    assert_eq!(score_breakdown(&profile, &course, &weights).education, 25.0);
}

#[test]
fn test_interest_contribution_capped_at_25() {
    let profile = create_profile();
    let mut course = create_course(false, false, 4, 0, false);
    course.areas.push("E".to_string());

    let breakdown = score_breakdown(&profile, &course, &ScoringWeights::default());

    assert_eq!(breakdown.interests, 25.0);
}

#[test]
fn test_age_tier_boundaries() {
    let weights = ScoringWeights::default();
    let mut course = create_course(false, false, 0, 0, false);
    course.average_student_age = 30.0;

    for (age, expected) in [(40, 20.0), (20, 20.0), (41, 10.0), (19, 10.0), (50, 10.0), (51, 0.0), (9, 0.0)] {
        let profile = UserProfile {
            age,
            ..create_profile()
        };
        assert_eq!(
            score_breakdown(&profile, &course, &weights).age,
            expected,
            "age {} against average 30",
            age
        );
    }
}

#[test]
fn test_program_bonus_can_push_raw_sum_past_100() {
    let profile = UserProfile {
        interests: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        ..create_profile()
    };
    let course = create_course(true, true, 3, 2, true);

    let breakdown = score_breakdown(&profile, &course, &ScoringWeights::default());

    // 30 + 25 + 24 + 20 + 10 = 109 before the clamp
    assert_eq!(breakdown.program, 10.0);
    assert_eq!(breakdown.total, 100.0);
}

#[test]
fn test_top_ten_of_fifteen_distinct_scores() {
    let recommender = Recommender::with_default_weights();
    let profile = create_profile();

    // (location, education, interests, age tier, program) -> expected score
    let fixtures = [
        ((false, true, 1, 1, true), 63.0),
        ((true, false, 0, 1, true), 50.0),
        ((false, false, 4, 2, true), 65.0),
        ((false, true, 2, 0, false), 51.0),
        ((true, false, 1, 2, true), 68.0),
        ((false, true, 1, 0, true), 53.0),
        ((false, false, 3, 1, true), 54.0),
        ((true, false, 2, 1, true), 66.0),
        ((false, false, 4, 1, true), 55.0),
        ((false, true, 4, 0, false), 60.0),
        ((false, false, 2, 2, true), 56.0),
        ((true, false, 1, 1, true), 58.0),
        ((false, true, 3, 0, false), 59.0),
        ((false, false, 3, 2, true), 64.0),
        ((false, true, 2, 0, true), 61.0),
    ];

    let catalog: Vec<Course> = fixtures
        .iter()
        .map(|&((l, e, i, a, p), expected)| {
            let course = create_course(l, e, i, a, p);
            assert_eq!(recommender.score(&profile, &course), expected, "fixture {}", course.name);
            course
        })
        .collect();

    let result = recommender.recommend(&profile, &catalog);

    let scores: Vec<f64> = result.courses.iter().map(|c| c.match_score).collect();
    assert_eq!(scores, vec![68.0, 66.0, 65.0, 64.0, 63.0, 61.0, 60.0, 59.0, 58.0, 56.0]);
    assert_eq!(result.total_candidates, 15);
}

#[test]
fn test_recommend_is_pure() {
    let recommender = Recommender::with_default_weights();
    let profile = create_profile();
    let catalog = vec![create_course(true, true, 2, 2, true), create_course(false, true, 0, 2, false)];
    let snapshot = catalog.clone();

    let first = recommender.recommend(&profile, &catalog);
    let second = recommender.recommend(&profile, &catalog);

    assert_eq!(catalog, snapshot);
    assert_eq!(first.courses, second.courses);
    assert!(catalog.iter().all(|c| c.match_score == 0.0));
}

#[test]
fn test_empty_profile_is_not_an_error() {
    let recommender = Recommender::with_default_weights();
    let profile = UserProfile {
        age: 0,
        ..UserProfile::default()
    };

    let mut course = create_course(false, true, 0, 0, false);
    course.min_education_required = EducationLevel::None;

    let result = recommender.recommend(&profile, &[course]);

    // Empty location matches every course: 30 + 25
    assert_eq!(result.courses.len(), 1);
    assert_eq!(result.courses[0].match_score, 55.0);
}
