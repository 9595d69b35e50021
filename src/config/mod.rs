// Sub-modules
mod core;
mod loader;
mod similarity;

pub use self::core::{
    default_discount_rate, default_horizon_years, default_irr_initial_rate,
    default_irr_max_iterations, default_irr_tolerance, default_rulebook_timeout_secs,
    default_rulebook_url, DependencyConfig, MatcherKind, OutputConfig, RoiConfig,
    RpaInsightsConfig, RulebookConfig,
};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
pub use similarity::{
    default_department_weight, default_description_weight, default_duplicate_threshold,
    default_tag_weight, default_title_weight, SimilarityConfig, SimilarityWeights,
};
