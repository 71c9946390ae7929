use serde::Serialize;

use super::constants::{
    ScoringConstants, DEFAULT_BAYESIAN_PRIOR, DEFAULT_MINIMUM_RATINGS, DEFAULT_PRIOR_WEIGHT,
};
use crate::dataset::TitleStats;

/// Floor for logarithm arguments. A title with no ratings at all would
/// otherwise push `log10` to negative infinity; the floor turns that into a
/// large finite penalty instead.
pub const LOG_FLOOR: f64 = 1e-9;

/// Bounds every final score is clamped to.
pub const SCORE_MIN: f64 = 1.0;
pub const SCORE_MAX: f64 = 10.0;

/// A single named diagnostic value from a scoring pass.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreMetric {
    pub label: &'static str,
    pub value: f64,
}

/// Adjusted score for one title.
///
/// `fair_score` and `fair_weighted_score` are always within
/// [`SCORE_MIN`, `SCORE_MAX`]. `bayesian_score` is the pre-adjustment
/// shrinkage estimate, kept for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct FairScore {
    pub fair_score: f64,

    /// Fair score further discounted by completion rate. Only produced by the
    /// observed strategy.
    pub fair_weighted_score: Option<f64>,

    pub bayesian_score: f64,

    /// Fraction of the audience counted as plan-to-watch: estimated by the
    /// estimate strategy, actual for the observed strategy.
    pub ptw_share: f64,

    pub metrics: Vec<ScoreMetric>,
}

/// A way of turning raw rating aggregates into a fair score.
///
/// Implementations are pure: no IO, no state, identical input gives
/// identical output. Inputs are expected to have passed
/// [`validate_dataset`](super::validation::validate_dataset).
pub trait ScoringStrategy {
    fn name(&self) -> &'static str;

    fn score(&self, stats: &TitleStats, constants: &ScoringConstants) -> FairScore;
}

/// Estimate-based strategy.
///
/// Works from aggregate interest alone: the plan-to-watch pool is estimated
/// as proportional to the mean score (well-liked titles attract more
/// undecided interest), and the popularity rank supplies a completion signal.
pub struct EstimateStrategy;

impl ScoringStrategy for EstimateStrategy {
    fn name(&self) -> &'static str {
        "estimate"
    }

    fn score(&self, stats: &TitleStats, constants: &ScoringConstants) -> FairScore {
        let minimum_ratings = constants.minimum_ratings.unwrap_or(DEFAULT_MINIMUM_RATINGS) as f64;
        let bayesian_prior = constants.bayesian_prior.unwrap_or(DEFAULT_BAYESIAN_PRIOR);
        let prior_weight = constants.prior_weight.unwrap_or(DEFAULT_PRIOR_WEIGHT) as f64;

        let total = stats.total_ratings as f64;

        // Estimate the hidden plan-to-watch pool from the mean score.
        let estimated_ptw_ratio = (stats.mean_score / 10.0) * 0.5;
        let potential_ptw = total * estimated_ptw_ratio;
        let adjusted_total = total + potential_ptw;

        let confidence = ((total / minimum_ratings) * (1.0 - estimated_ptw_ratio)).min(1.0);

        let popularity_bonus = (adjusted_total + 1.0).log10() * 0.08;

        // Titles that convert interest into ratings faster than their
        // popularity rank suggests earn a small bonus; the floor keeps the
        // zero-ratings case finite.
        let completion_arg = total / (stats.popularity_rank as f64 + 1.0);
        let completion_bonus = completion_arg.max(LOG_FLOOR).log10() * 0.05;

        let bayesian_score =
            (prior_weight * bayesian_prior + total * stats.mean_score) / (prior_weight + total);

        let fair_score = (bayesian_score * confidence + popularity_bonus + completion_bonus)
            .clamp(SCORE_MIN, SCORE_MAX);

        FairScore {
            fair_score,
            fair_weighted_score: None,
            bayesian_score,
            ptw_share: estimated_ptw_ratio,
            metrics: vec![
                ScoreMetric { label: "Estimated PTW %", value: estimated_ptw_ratio * 100.0 },
                ScoreMetric { label: "Confidence %", value: confidence * 100.0 },
                ScoreMetric { label: "Popularity bonus", value: popularity_bonus },
                ScoreMetric { label: "Completion bonus", value: completion_bonus },
            ],
        }
    }
}

/// Observed-split strategy.
///
/// Uses the actual rater / plan-to-watch split instead of estimating it, and
/// additionally produces a weighted score that discounts titles whose
/// audience mostly never rated.
pub struct ObservedStrategy;

impl ScoringStrategy for ObservedStrategy {
    fn name(&self) -> &'static str {
        "observed"
    }

    fn score(&self, stats: &TitleStats, constants: &ScoringConstants) -> FairScore {
        let minimum_ratings = constants.minimum_ratings.unwrap_or(DEFAULT_MINIMUM_RATINGS) as f64;
        let bayesian_prior = constants.bayesian_prior.unwrap_or(DEFAULT_BAYESIAN_PRIOR);
        let prior_weight = constants.prior_weight.unwrap_or(DEFAULT_PRIOR_WEIGHT) as f64;

        let total = stats.total_ratings as f64;
        let given = stats.score_given.unwrap_or(0) as f64;

        let plan_to_watch = total - given;
        let completion_rate = if stats.total_ratings > 0 { given / total } else { 0.0 };

        let rating_confidence = (given / minimum_ratings).min(1.0);
        // Completion factor ranges 0.5-1.0 so a thin rater base halves
        // confidence at worst.
        let completion_factor = completion_rate * 0.5 + 0.5;
        let adjusted_confidence = rating_confidence * completion_factor;

        let engagement_bonus = (given + 1.0).log10() * completion_rate * 0.1;
        let popularity_bonus = (given + 1.0).log10() * 0.06 + (total + 1.0).log10() * 0.02;

        let bayesian_score =
            (prior_weight * bayesian_prior + given * stats.mean_score) / (prior_weight + given);

        let fair_score = (bayesian_score * adjusted_confidence + engagement_bonus + popularity_bonus)
            .clamp(SCORE_MIN, SCORE_MAX);

        // Weighted variant penalizes large unrated interest pools even after
        // the confidence correction.
        let fair_weighted_score = if stats.total_ratings > 0 {
            (fair_score * given / total).clamp(SCORE_MIN, SCORE_MAX)
        } else {
            fair_score
        };

        FairScore {
            fair_score,
            fair_weighted_score: Some(fair_weighted_score),
            bayesian_score,
            ptw_share: if stats.total_ratings > 0 { 1.0 - completion_rate } else { 0.0 },
            metrics: vec![
                ScoreMetric { label: "Plan to watch", value: plan_to_watch },
                ScoreMetric { label: "Completion rate %", value: completion_rate * 100.0 },
                ScoreMetric { label: "Confidence %", value: adjusted_confidence * 100.0 },
                ScoreMetric { label: "Engagement bonus", value: engagement_bonus },
                ScoreMetric { label: "Popularity bonus", value: popularity_bonus },
            ],
        }
    }
}
