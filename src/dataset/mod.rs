use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Raw per-title rating aggregates, as reported by a tracking site.
///
/// `total_ratings` counts everyone who expressed interest in the title;
/// `score_given` counts the subset that actually submitted a numeric rating.
/// The remainder is the plan-to-watch pool.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TitleStats {
    pub title: String,

    /// Total audience size: raters plus interested non-raters.
    pub total_ratings: u64,

    /// Arithmetic mean of submitted ratings, 0-10 scale.
    pub mean_score: f64,

    /// Users who actually submitted a rating. Absent in datasets that only
    /// report aggregate interest (the estimate strategy does not need it).
    #[serde(default)]
    pub score_given: Option<u64>,

    /// 1-based rank by raw `total_ratings`, derived after loading.
    /// Not accepted from dataset files.
    #[serde(default, skip_deserializing)]
    pub popularity_rank: usize,
}

impl TitleStats {
    /// Audience members who expressed interest but never rated.
    pub fn plan_to_watch(&self) -> Option<u64> {
        self.score_given
            .map(|given| self.total_ratings.saturating_sub(given))
    }

    /// Fraction of the interested audience that actually rated.
    /// Zero when the split is unknown or the audience is empty.
    pub fn completion_rate(&self) -> f64 {
        match self.score_given {
            Some(given) if self.total_ratings > 0 => given as f64 / self.total_ratings as f64,
            _ => 0.0,
        }
    }
}

/// Fill in `popularity_rank` for every title: 1-based rank by `total_ratings`
/// descending. Ties keep their original input order.
pub fn assign_popularity_ranks(titles: &mut [TitleStats]) {
    let mut order: Vec<usize> = (0..titles.len()).collect();
    order.sort_by(|&a, &b| titles[b].total_ratings.cmp(&titles[a].total_ratings));
    for (rank, &idx) in order.iter().enumerate() {
        titles[idx].popularity_rank = rank + 1;
    }
}

/// Load title records from a YAML or JSON file (dispatched on extension)
/// and assign popularity ranks.
pub fn load_dataset(path: &Path) -> Result<Vec<TitleStats>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file at {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let mut titles: Vec<TitleStats> = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse dataset: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse dataset: invalid YAML in {}", path.display()))?
    };

    assign_popularity_ranks(&mut titles);
    Ok(titles)
}

/// Bundled sample dataset: ten highly-rated seasonal titles with near-identical
/// mean scores but very different rater/plan-to-watch splits.
pub fn sample_dataset() -> Vec<TitleStats> {
    let records = [
        ("Monogatari S1", 61094, 8.91, 31246),
        ("Monogatari S2", 24045, 8.90, 11574),
        ("Monogatari S3", 19626, 8.83, 8321),
        ("Mushoku Tensei", 91393, 8.83, 65658),
        ("Spice and Wolf", 66209, 8.82, 32226),
        ("86", 43586, 8.82, 21175),
        ("COTE p1", 89803, 8.81, 56219),
        ("Re:Zero", 73645, 8.80, 40938),
        ("Honzuki no Gekokujou", 16766, 8.78, 9523),
        ("COTE p2", 38809, 8.78, 24946),
    ];

    let mut titles: Vec<TitleStats> = records
        .into_iter()
        .map(|(title, total_ratings, mean_score, score_given)| TitleStats {
            title: title.to_string(),
            total_ratings,
            mean_score,
            score_given: Some(score_given),
            popularity_rank: 0,
        })
        .collect();

    assign_popularity_ranks(&mut titles);
    titles
}
