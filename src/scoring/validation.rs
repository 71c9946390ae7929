use super::constants::ScoringConstants;
use crate::dataset::TitleStats;

/// Validate scoring constants at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_constants(constants: &ScoringConstants) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(minimum) = constants.minimum_ratings {
        if minimum == 0 {
            errors.push("scoring.minimum_ratings: must be at least 1".to_string());
        }
    }

    if let Some(prior) = constants.bayesian_prior {
        if !(0.0..=10.0).contains(&prior) {
            errors.push(format!(
                "scoring.bayesian_prior: {} out of range 0-10",
                prior
            ));
        }
    }

    if let Some(weight) = constants.prior_weight {
        if weight == 0 {
            errors.push("scoring.prior_weight: must be at least 1".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a dataset before scoring.
///
/// `requires_observed_split` is set when the selected strategy needs the
/// rater / plan-to-watch split (`score_given`). Degenerate records are
/// rejected here so the scoring functions stay pure and infallible.
pub fn validate_dataset(
    titles: &[TitleStats],
    requires_observed_split: bool,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (i, stats) in titles.iter().enumerate() {
        if stats.title.trim().is_empty() {
            errors.push(format!("dataset[{}]: title must not be empty", i));
        }

        if !stats.mean_score.is_finite() || !(0.0..=10.0).contains(&stats.mean_score) {
            errors.push(format!(
                "dataset[{}] '{}': mean_score {} out of range 0-10",
                i, stats.title, stats.mean_score
            ));
        }

        match stats.score_given {
            Some(given) if given > stats.total_ratings => {
                errors.push(format!(
                    "dataset[{}] '{}': score_given {} exceeds total_ratings {}",
                    i, stats.title, given, stats.total_ratings
                ));
            }
            None if requires_observed_split => {
                errors.push(format!(
                    "dataset[{}] '{}': score_given is required by the observed strategy",
                    i, stats.title
                ));
            }
            _ => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(title: &str, total: u64, mean: f64, given: Option<u64>) -> TitleStats {
        TitleStats {
            title: title.to_string(),
            total_ratings: total,
            mean_score: mean,
            score_given: given,
            popularity_rank: 1,
        }
    }

    #[test]
    fn test_valid_constants() {
        assert!(validate_constants(&ScoringConstants::default()).is_ok());
    }

    #[test]
    fn test_empty_constants() {
        let constants = ScoringConstants {
            minimum_ratings: None,
            bayesian_prior: None,
            prior_weight: None,
        };
        assert!(validate_constants(&constants).is_ok());
    }

    #[test]
    fn test_zero_minimum_ratings() {
        let constants = ScoringConstants {
            minimum_ratings: Some(0),
            bayesian_prior: None,
            prior_weight: None,
        };
        let errors = validate_constants(&constants).unwrap_err();
        assert!(errors[0].contains("minimum_ratings"));
    }

    #[test]
    fn test_prior_out_of_range() {
        let constants = ScoringConstants {
            minimum_ratings: None,
            bayesian_prior: Some(11.5),
            prior_weight: None,
        };
        let errors = validate_constants(&constants).unwrap_err();
        assert!(errors[0].contains("bayesian_prior"));
    }

    #[test]
    fn test_constants_collect_all_errors() {
        let constants = ScoringConstants {
            minimum_ratings: Some(0),
            bayesian_prior: Some(-1.0),
            prior_weight: Some(0),
        };
        let errors = validate_constants(&constants).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_valid_dataset() {
        let titles = vec![stats("A", 1000, 8.5, Some(600))];
        assert!(validate_dataset(&titles, true).is_ok());
    }

    #[test]
    fn test_mean_score_out_of_range() {
        let titles = vec![stats("A", 1000, 12.0, Some(600))];
        let errors = validate_dataset(&titles, false).unwrap_err();
        assert!(errors[0].contains("mean_score"));
    }

    #[test]
    fn test_mean_score_nan_rejected() {
        let titles = vec![stats("A", 1000, f64::NAN, Some(600))];
        assert!(validate_dataset(&titles, false).is_err());
    }

    #[test]
    fn test_score_given_exceeds_total() {
        let titles = vec![stats("A", 100, 8.0, Some(150))];
        let errors = validate_dataset(&titles, true).unwrap_err();
        assert!(errors[0].contains("exceeds total_ratings"));
    }

    #[test]
    fn test_missing_split_rejected_for_observed() {
        let titles = vec![stats("A", 100, 8.0, None)];
        let errors = validate_dataset(&titles, true).unwrap_err();
        assert!(errors[0].contains("score_given is required"));
    }

    #[test]
    fn test_missing_split_allowed_for_estimate() {
        let titles = vec![stats("A", 100, 8.0, None)];
        assert!(validate_dataset(&titles, false).is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        let titles = vec![stats("  ", 100, 8.0, Some(50))];
        let errors = validate_dataset(&titles, false).unwrap_err();
        assert!(errors[0].contains("title must not be empty"));
    }

    #[test]
    fn test_dataset_collects_all_errors() {
        let titles = vec![
            stats("A", 100, 12.0, Some(50)), // bad mean
            stats("B", 100, 8.0, Some(150)), // bad split
        ];
        let errors = validate_dataset(&titles, true).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("dataset[0]"));
        assert!(errors[1].contains("dataset[1]"));
    }
}
