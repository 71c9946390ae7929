pub mod constants;
pub mod strategy;
pub mod validation;

pub use constants::*;
pub use strategy::{
    EstimateStrategy, FairScore, ObservedStrategy, ScoreMetric, ScoringStrategy,
};
pub use validation::{validate_constants, validate_dataset};
