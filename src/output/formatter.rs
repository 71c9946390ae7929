use std::io::IsTerminal;

use anyhow::Result;
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::ranking::{significant_changes, RankedTitle};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a signed rank delta: "=" for no movement, "+N" up, "-N" down.
pub fn format_rank_delta(change: i64) -> String {
    match change {
        0 => "=".to_string(),
        n if n > 0 => format!("+{}", n),
        n => n.to_string(),
    }
}

fn colorize_delta(change: i64) -> String {
    let delta = format_rank_delta(change);
    match change {
        0 => delta.dimmed().to_string(),
        n if n > 0 => delta.green().to_string(),
        _ => delta.red().to_string(),
    }
}

// Fixed column widths. Title width flexes with the terminal.
const OLD_WIDTH: usize = 3;
const RATINGS_WIDTH: usize = 8;
const MEAN_WIDTH: usize = 6;
const PTW_WIDTH: usize = 6;
const FAIR_WIDTH: usize = 6;
const NEW_WIDTH: usize = 9;
const SEPARATOR: &str = "  ";

fn fixed_width(show_weighted: bool) -> usize {
    let columns = if show_weighted { 7 } else { 6 };
    OLD_WIDTH
        + RATINGS_WIDTH
        + MEAN_WIDTH
        + PTW_WIDTH
        + FAIR_WIDTH
        + if show_weighted { FAIR_WIDTH } else { 0 }
        + NEW_WIDTH
        + SEPARATOR.len() * columns
}

fn title_column_width(ranked: &[RankedTitle], show_weighted: bool) -> usize {
    let longest = ranked
        .iter()
        .map(|t| t.stats.title.chars().count())
        .max()
        .unwrap_or(0)
        .max("Title".len());

    match get_terminal_width() {
        Some(width) if width > fixed_width(show_weighted) + 10 => {
            longest.min(width - fixed_width(show_weighted))
        }
        Some(_) => 20, // very narrow terminal
        None => longest, // pipe: don't truncate
    }
}

/// Format titles as a ranked table in new-rank order.
///
/// Columns: old rank, title, total ratings, mean score, PTW share, fair
/// score, optional fair weighted score, and the new rank with a signed
/// delta indicator.
pub fn format_ranking_table(ranked: &[RankedTitle], show_weighted: bool, use_colors: bool) -> String {
    if ranked.is_empty() {
        return "No titles to rank.".to_string();
    }

    let title_width = title_column_width(ranked, show_weighted);
    let mut lines = Vec::with_capacity(ranked.len() + 2);

    let mut header = format!(
        "{:>old$}{sep}{:<title$}{sep}{:>ratings$}{sep}{:>mean$}{sep}{:>ptw$}{sep}{:>fair$}",
        "Old",
        "Title",
        "Ratings",
        "Score",
        "PTW%",
        "Fair",
        old = OLD_WIDTH,
        title = title_width,
        ratings = RATINGS_WIDTH,
        mean = MEAN_WIDTH,
        ptw = PTW_WIDTH,
        fair = FAIR_WIDTH,
        sep = SEPARATOR,
    );
    if show_weighted {
        header.push_str(&format!("{}{:>width$}", SEPARATOR, "FairW", width = FAIR_WIDTH));
    }
    header.push_str(&format!("{}{}", SEPARATOR, "New"));

    let rule_width = fixed_width(show_weighted) + title_width;
    if use_colors {
        lines.push(header.dimmed().to_string());
        lines.push("-".repeat(rule_width).dimmed().to_string());
    } else {
        lines.push(header);
        lines.push("-".repeat(rule_width));
    }

    for title in ranked {
        let truncated = truncate_title(&title.stats.title, title_width);
        let fair = format!("{:>width$.2}", title.score.fair_score, width = FAIR_WIDTH);
        let mut line = format!(
            "{:>old$}{sep}{:<title$}{sep}{:>ratings$}{sep}{:>mean$.2}{sep}{:>ptw_num$.1}%{sep}{}",
            title.old_rank,
            truncated,
            title.stats.total_ratings,
            title.stats.mean_score,
            title.score.ptw_share * 100.0,
            if use_colors { fair.bold().to_string() } else { fair },
            old = OLD_WIDTH,
            title = title_width,
            ratings = RATINGS_WIDTH,
            mean = MEAN_WIDTH,
            ptw_num = PTW_WIDTH - 1,
            sep = SEPARATOR,
        );
        if show_weighted {
            let weighted = title
                .score
                .fair_weighted_score
                .unwrap_or(title.score.fair_score);
            line.push_str(&format!("{}{:>width$.2}", SEPARATOR, weighted, width = FAIR_WIDTH));
        }
        let delta = if use_colors {
            colorize_delta(title.rank_change())
        } else {
            format_rank_delta(title.rank_change())
        };
        line.push_str(&format!("{}{} ({})", SEPARATOR, title.new_rank, delta));
        lines.push(line);
    }

    lines.join("\n")
}

/// Format the significant-changes section, or None when no title moved by
/// the threshold.
pub fn format_significant_changes(ranked: &[RankedTitle], use_colors: bool) -> Option<String> {
    let significant = significant_changes(ranked);
    if significant.is_empty() {
        return None;
    }

    let mut lines = vec!["Most Significant Rank Changes:".to_string()];
    for title in significant {
        let change = title.rank_change();
        let direction = if change > 0 { "up" } else { "down" };
        let name = if use_colors {
            title.stats.title.bold().to_string()
        } else {
            title.stats.title.clone()
        };
        lines.push(format!(
            "  - {} moved {} {} positions",
            name,
            direction,
            change.abs()
        ));
    }
    Some(lines.join("\n"))
}

/// Format one title's diagnostic breakdown (for verbose mode).
pub fn format_metrics_detail(title: &RankedTitle, use_colors: bool) -> String {
    let mut lines = Vec::with_capacity(title.score.metrics.len() + 2);
    if use_colors {
        lines.push(title.stats.title.bold().to_string());
    } else {
        lines.push(title.stats.title.clone());
    }
    lines.push(format!("  Bayesian score: {:.4}", title.score.bayesian_score));
    for metric in &title.score.metrics {
        lines.push(format!("  {}: {:.4}", metric.label, metric.value));
    }
    lines.join("\n")
}

/// Format titles as tab-separated values for scripting
/// Columns: new_rank, old_rank, delta, title, ratings, mean, fair[, weighted]
/// (no headers, no colors)
pub fn format_tsv(ranked: &[RankedTitle], show_weighted: bool) -> String {
    ranked
        .iter()
        .map(|title| {
            let mut fields = vec![
                title.new_rank.to_string(),
                title.old_rank.to_string(),
                format_rank_delta(title.rank_change()),
                title.stats.title.clone(),
                title.stats.total_ratings.to_string(),
                format!("{:.2}", title.stats.mean_score),
                format!("{:.4}", title.score.fair_score),
            ];
            if show_weighted {
                fields.push(format!(
                    "{:.4}",
                    title.score.fair_weighted_score.unwrap_or(title.score.fair_score)
                ));
            }
            fields.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the full ranked records as pretty JSON.
pub fn format_json(ranked: &[RankedTitle]) -> Result<String> {
    Ok(serde_json::to_string_pretty(ranked)?)
}
