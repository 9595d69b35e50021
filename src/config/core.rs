use serde::{Deserialize, Serialize};

use super::similarity::SimilarityConfig;

/// Root configuration structure for rpa-insights
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RpaInsightsConfig {
    /// Financial model parameters
    #[serde(default)]
    pub roi: RoiConfig,

    /// Duplicate detection weights and threshold
    #[serde(default)]
    pub similarity: SimilarityConfig,

    /// Dependency resolution strategy
    #[serde(default)]
    pub dependencies: DependencyConfig,

    /// Rulebook endpoint settings
    #[serde(default)]
    pub rulebook: RulebookConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Parameters of the discounted cash-flow model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiConfig {
    /// Annual discount rate used for NPV (0.10 = 10%)
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,

    /// Number of years of savings in the NPV and IRR cash-flow series
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,

    /// Starting guess for the IRR root-find
    #[serde(default = "default_irr_initial_rate")]
    pub irr_initial_rate: f64,

    #[serde(default = "default_irr_max_iterations")]
    pub irr_max_iterations: usize,

    /// Stop threshold on both |NPV| and |dNPV/dr|
    #[serde(default = "default_irr_tolerance")]
    pub irr_tolerance: f64,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            discount_rate: default_discount_rate(),
            horizon_years: default_horizon_years(),
            irr_initial_rate: default_irr_initial_rate(),
            irr_max_iterations: default_irr_max_iterations(),
            irr_tolerance: default_irr_tolerance(),
        }
    }
}

impl RoiConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.discount_rate.is_finite() || self.discount_rate <= -1.0 {
            return Err(format!(
                "discount_rate must be a finite value greater than -1.0, got {}",
                self.discount_rate
            ));
        }
        if self.horizon_years == 0 {
            return Err("horizon_years must be at least 1".to_string());
        }
        if !(self.irr_tolerance.is_finite() && self.irr_tolerance > 0.0) {
            return Err(format!(
                "irr_tolerance must be positive, got {}",
                self.irr_tolerance
            ));
        }
        Ok(())
    }
}

pub fn default_discount_rate() -> f64 {
    0.10
}
pub fn default_horizon_years() -> u32 {
    5
}
pub fn default_irr_initial_rate() -> f64 {
    0.1
}
pub fn default_irr_max_iterations() -> usize {
    100
}
pub fn default_irr_tolerance() -> f64 {
    0.0001
}

/// How free-text dependency names are resolved to processes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    /// Case-insensitive substring match against title or tags
    #[default]
    Fuzzy,
    /// Exact process id match
    Id,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyConfig {
    #[serde(default)]
    pub matcher: MatcherKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulebookConfig {
    #[serde(default = "default_rulebook_url")]
    pub url: String,

    #[serde(default = "default_rulebook_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RulebookConfig {
    fn default() -> Self {
        Self {
            url: default_rulebook_url(),
            timeout_secs: default_rulebook_timeout_secs(),
        }
    }
}

pub fn default_rulebook_url() -> String {
    "https://santova.onrender.com/rulebook/".to_string()
}
pub fn default_rulebook_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: Option<String>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}
