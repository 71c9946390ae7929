use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use fair_rank::dataset::{load_dataset, sample_dataset};
use fair_rank::ranking::rank_titles;
use fair_rank::scoring::{
    validate_constants, validate_dataset, EstimateStrategy, FairScore, ObservedStrategy,
    ScoringStrategy,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 1;
const EXIT_DATA: i32 = 2;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum StrategyArg {
    /// Estimate the plan-to-watch pool from the mean score
    Estimate,
    /// Use the observed rater / plan-to-watch split
    Observed,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum FormatArg {
    Table,
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "fair-rank")]
#[command(about = "Re-ranks rated titles by popularity-bias-adjusted fair scores", long_about = None)]
#[command(version)]
struct Cli {
    /// Scoring strategy
    #[arg(short, long, value_enum, default_value_t = StrategyArg::Observed)]
    strategy: StrategyArg,

    /// Path to a YAML or JSON dataset (bundled sample dataset if omitted)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Path to config file (defaults to ~/.config/fair-rank/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Table)]
    format: FormatArg,

    /// Rank by the fair weighted score (observed strategy only)
    #[arg(short, long)]
    weighted: bool,

    /// Print per-title diagnostic metrics
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Load config
    let config = match fair_rank::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring constants at startup
    let constants = config.scoring.unwrap_or_default();
    if let Err(errors) = validate_constants(&constants) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.weighted && cli.strategy == StrategyArg::Estimate {
        eprintln!("--weighted requires the observed strategy (the estimate strategy produces no weighted score)");
        std::process::exit(EXIT_CONFIG);
    }

    // Load dataset (bundled sample when no file given)
    let titles = match &cli.dataset {
        Some(path) => match load_dataset(path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Dataset error: {}", e);
                std::process::exit(EXIT_DATA);
            }
        },
        None => sample_dataset(),
    };

    if cli.verbose {
        match &cli.dataset {
            Some(path) => eprintln!("Loaded {} titles from {}", titles.len(), path.display()),
            None => eprintln!("Using bundled sample dataset ({} titles)", titles.len()),
        }
    }

    let strategy: &dyn ScoringStrategy = match cli.strategy {
        StrategyArg::Estimate => &EstimateStrategy,
        StrategyArg::Observed => &ObservedStrategy,
    };

    if let Err(errors) = validate_dataset(&titles, cli.strategy == StrategyArg::Observed) {
        eprintln!("Dataset errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_DATA);
    }

    // Score every title independently, then re-rank
    let scores: Vec<FairScore> = titles
        .iter()
        .map(|t| strategy.score(t, &constants))
        .collect();
    let ranked = rank_titles(titles, scores, cli.weighted);

    if cli.verbose {
        eprintln!("Scored {} titles with the {} strategy", ranked.len(), strategy.name());
    }

    let show_weighted = cli.strategy == StrategyArg::Observed;
    let use_colors = fair_rank::output::should_use_colors();

    match cli.format {
        FormatArg::Table => {
            println!(
                "{}",
                fair_rank::output::format_ranking_table(&ranked, show_weighted, use_colors)
            );

            if cli.verbose && !ranked.is_empty() {
                println!();
                for title in &ranked {
                    println!("{}", fair_rank::output::format_metrics_detail(title, use_colors));
                    println!();
                }
            }

            if let Some(section) =
                fair_rank::output::format_significant_changes(&ranked, use_colors)
            {
                println!();
                println!("{}", section);
            }
        }
        FormatArg::Tsv => {
            println!("{}", fair_rank::output::format_tsv(&ranked, show_weighted));
        }
        FormatArg::Json => match fair_rank::output::format_json(&ranked) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize results: {}", e);
                std::process::exit(EXIT_DATA);
            }
        },
    }

    std::process::exit(EXIT_SUCCESS);
}
