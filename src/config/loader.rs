use std::fs;
use std::path::{Path, PathBuf};

use super::core::{RoiConfig, RpaInsightsConfig};
use super::similarity::SimilarityWeights;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".rpa-insights.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from TOML string
///
/// Invalid sections fall back to their defaults with a warning rather than
/// failing the whole load. Similarity weights that are individually in range
/// but do not sum to 1.0 are normalized.
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<RpaInsightsConfig, String> {
    let mut config = toml::from_str::<RpaInsightsConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    let weights = &mut config.similarity.weights;
    let in_range = [
        weights.title,
        weights.description,
        weights.tags,
        weights.department,
    ]
    .into_iter()
    .all(SimilarityWeights::is_valid_weight);

    if !in_range || weights.sum() <= 0.0 {
        log::warn!("Invalid similarity weights. Using defaults.");
        *weights = SimilarityWeights::default();
    } else if let Err(e) = weights.validate() {
        log::warn!("{}. Normalizing.", e);
        weights.normalize();
    }

    if let Err(e) = config.roi.validate() {
        log::warn!("Invalid [roi] section: {}. Using defaults.", e);
        config.roi = RoiConfig::default();
    }

    if !(0.0..=1.0).contains(&config.similarity.duplicate_threshold) {
        log::warn!(
            "duplicate_threshold {} is outside [0.0, 1.0]; pairs may never match",
            config.similarity.duplicate_threshold
        );
    }

    Ok(config)
}

/// Load configuration from an explicit path; missing or malformed files are errors
pub fn load_config_from(path: &Path) -> Result<RpaInsightsConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::Configuration(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let config = parse_and_validate_config(&contents).map_err(Error::Configuration)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Pure function to try loading config from a specific path
fn try_load_config_from_path(config_path: &Path) -> Option<RpaInsightsConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search the working directory and its ancestors for a config file
pub fn load_config() -> RpaInsightsConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return RpaInsightsConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            RpaInsightsConfig::default()
        })
}
