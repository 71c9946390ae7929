mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/fair-rank/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("fair-rank")
}

/// Get the default config file path (~/.config/fair-rank/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file.
///
/// An explicitly passed path must exist. The default path is optional: the
/// tool runs with built-in defaults when no config file has been created.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_config_path(), false),
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_path_errors() {
        let result = load_config(Some(PathBuf::from("/nonexistent/fair-rank.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_with_scoring() {
        let yaml = r#"
scoring:
  minimum_ratings: 250
  bayesian_prior: 6.8
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let scoring = config.scoring.unwrap();
        assert_eq!(scoring.minimum_ratings, Some(250));
        assert_eq!(scoring.bayesian_prior, Some(6.8));
        assert!(scoring.prior_weight.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert!(config.scoring.is_none());
    }
}
