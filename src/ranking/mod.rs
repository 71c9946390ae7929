use serde::Serialize;

use crate::dataset::TitleStats;
use crate::scoring::FairScore;

/// Absolute rank movement at which a change is called out as significant.
pub const SIGNIFICANT_RANK_CHANGE: i64 = 2;

/// A title with its computed score and its position before and after
/// re-ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RankedTitle {
    #[serde(flatten)]
    pub stats: TitleStats,

    #[serde(flatten)]
    pub score: FairScore,

    /// 1-based position in the input dataset.
    pub old_rank: usize,

    /// 1-based position after sorting by the selected score.
    pub new_rank: usize,
}

impl RankedTitle {
    /// Positive when the title moved up, negative when it moved down.
    pub fn rank_change(&self) -> i64 {
        self.old_rank as i64 - self.new_rank as i64
    }

    pub fn is_significant(&self) -> bool {
        self.rank_change().abs() >= SIGNIFICANT_RANK_CHANGE
    }

    fn ranking_key(&self, weighted: bool) -> f64 {
        if weighted {
            self.score.fair_weighted_score.unwrap_or(self.score.fair_score)
        } else {
            self.score.fair_score
        }
    }
}

/// Re-rank titles by fair score (or fair weighted score when `weighted`).
///
/// Sort is descending and stable: titles with identical scores keep their
/// original dataset order. Input order defines `old_rank`.
pub fn rank_titles(
    titles: Vec<TitleStats>,
    scores: Vec<FairScore>,
    weighted: bool,
) -> Vec<RankedTitle> {
    let mut ranked: Vec<RankedTitle> = titles
        .into_iter()
        .zip(scores)
        .enumerate()
        .map(|(i, (stats, score))| RankedTitle {
            stats,
            score,
            old_rank: i + 1,
            new_rank: 0,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.ranking_key(weighted)
            .partial_cmp(&a.ranking_key(weighted))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (i, title) in ranked.iter_mut().enumerate() {
        title.new_rank = i + 1;
    }

    ranked
}

/// Titles whose rank moved by at least [`SIGNIFICANT_RANK_CHANGE`] positions,
/// in new-rank order.
pub fn significant_changes(ranked: &[RankedTitle]) -> Vec<&RankedTitle> {
    ranked.iter().filter(|t| t.is_significant()).collect()
}
