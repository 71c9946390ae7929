use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConstants;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Scoring constants override. Missing fields keep the shipped defaults.
    #[serde(default)]
    pub scoring: Option<ScoringConstants>,
}
