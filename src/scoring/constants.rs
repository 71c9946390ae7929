use serde::{Deserialize, Serialize};

/// Default minimum rating count for full confidence.
pub const DEFAULT_MINIMUM_RATINGS: u64 = 100;
/// Default prior score (global mean across the tracking site).
pub const DEFAULT_BAYESIAN_PRIOR: f64 = 7.0;
/// Default weight of the prior, in pseudo-observations.
pub const DEFAULT_PRIOR_WEIGHT: u64 = 500;

/// Scoring constants shared by both strategies.
///
/// Each field is optional; missing fields fall back to the shipped defaults.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   minimum_ratings: 100
///   bayesian_prior: 7.0
///   prior_weight: 500
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConstants {
    /// Rating count at which confidence saturates (default: 100)
    #[serde(default)]
    pub minimum_ratings: Option<u64>,

    /// Global prior score that sparse titles shrink toward (default: 7.0)
    #[serde(default)]
    pub bayesian_prior: Option<f64>,

    /// Weight of the prior in pseudo-observations (default: 500)
    #[serde(default)]
    pub prior_weight: Option<u64>,
}

impl Default for ScoringConstants {
    fn default() -> Self {
        Self {
            minimum_ratings: Some(DEFAULT_MINIMUM_RATINGS),
            bayesian_prior: Some(DEFAULT_BAYESIAN_PRIOR),
            prior_weight: Some(DEFAULT_PRIOR_WEIGHT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = ScoringConstants::default();
        assert_eq!(constants.minimum_ratings, Some(100));
        assert_eq!(constants.bayesian_prior, Some(7.0));
        assert_eq!(constants.prior_weight, Some(500));
    }

    #[test]
    fn test_constants_serde_roundtrip() {
        let constants = ScoringConstants::default();
        let yaml = serde_saphyr::to_string(&constants).unwrap();
        let parsed: ScoringConstants = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(constants, parsed);
    }

    #[test]
    fn test_partial_constants_parse() {
        let yaml = "bayesian_prior: 6.5\n";
        let constants: ScoringConstants = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(constants.bayesian_prior, Some(6.5));
        assert!(constants.minimum_ratings.is_none());
        assert!(constants.prior_weight.is_none());
    }

    #[test]
    fn test_empty_constants_parse() {
        let yaml = "{}";
        let constants: ScoringConstants = serde_saphyr::from_str(yaml).unwrap();
        assert!(constants.minimum_ratings.is_none());
        assert!(constants.bayesian_prior.is_none());
        assert!(constants.prior_weight.is_none());
    }

    #[test]
    fn test_constants_reject_unknown_fields() {
        let yaml = "minimum_ratings: 100\nmax_ratings: 900\n";
        let result: Result<ScoringConstants, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
