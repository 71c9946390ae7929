//! fair-rank: popularity-bias-adjusted ranking for rated titles.
//!
//! Raw rating tables overweight titles with huge undecided audiences. This
//! crate re-scores each title with a Bayesian shrinkage estimate blended
//! with popularity/engagement/completion bonuses, then re-ranks and reports
//! how far each title moved.

pub mod config;
pub mod dataset;
pub mod output;
pub mod ranking;
pub mod scoring;
