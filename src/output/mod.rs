pub mod formatter;

pub use formatter::{
    format_json, format_metrics_detail, format_rank_delta, format_ranking_table,
    format_significant_changes, format_tsv, should_use_colors,
};
