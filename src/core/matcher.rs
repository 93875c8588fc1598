use crate::models::{Course, ScoreBreakdown, ScoringWeights, UserProfile};
use crate::core::scoring::{calculate_match_score, score_breakdown};

/// Minimum score a course needs to be recommended
pub const DEFAULT_MIN_SCORE: f64 = 50.0;

/// Maximum number of recommended courses
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Result of the recommendation process
#[derive(Debug)]
pub struct RecommendationResult {
    pub courses: Vec<Course>,
    pub total_candidates: usize,
}

/// Recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Score every course of the catalog snapshot
/// 2. Drop courses below the minimum score
/// 3. Rank by score, highest first
/// 4. Truncate and stamp the score on copies of the survivors
///
/// Ranking uses a stable sort, so courses with equal scores keep their
/// catalog order.
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
    min_score: f64,
    max_results: usize,
}

impl Recommender {
    pub fn new(weights: ScoringWeights, min_score: f64, max_results: usize) -> Self {
        Self {
            weights,
            min_score,
            max_results,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_MIN_SCORE, DEFAULT_MAX_RESULTS)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single course for a profile
    pub fn score(&self, profile: &UserProfile, course: &Course) -> f64 {
        calculate_match_score(profile, course, &self.weights)
    }

    /// Per-criterion contributions for a single course
    pub fn explain(&self, profile: &UserProfile, course: &Course) -> ScoreBreakdown {
        score_breakdown(profile, course, &self.weights)
    }

    /// Rank a catalog snapshot for a profile
    ///
    /// The catalog is only read; returned courses are copies with
    /// `match_score` set.
    pub fn recommend(&self, profile: &UserProfile, catalog: &[Course]) -> RecommendationResult {
        let total_candidates = catalog.len();

        let mut scored: Vec<(&Course, f64)> = catalog
            .iter()
            .map(|course| (course, self.score(profile, course)))
            .filter(|(_, score)| *score >= self.min_score)
            .collect();

        // Stable: equal scores keep catalog order
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
        });

        scored.truncate(self.max_results);

        let courses = scored
            .into_iter()
            .map(|(course, score)| course.with_match_score(score))
            .collect();

        RecommendationResult {
            courses,
            total_candidates,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
