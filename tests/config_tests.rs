//! Configuration files loaded from disk

use indoc::indoc;
use pretty_assertions::assert_eq;
use rpa_insights::config::{load_config_from, MatcherKind, SimilarityWeights, CONFIG_FILE_NAME};
use rpa_insights::commands::init::init_config_in;
use rpa_insights::roi::{calculate_roi_metrics, calculate_roi_metrics_with};
use rpa_insights::{sample_roi_calculations, Error};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_full_config_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        indoc! {r#"
            [roi]
            discount_rate = 0.08
            horizon_years = 7

            [similarity]
            duplicate_threshold = 0.45

            [similarity.weights]
            title = 0.25
            description = 0.25
            tags = 0.25
            department = 0.25

            [dependencies]
            matcher = "id"

            [rulebook]
            url = "http://localhost:5000/rulebook/"
            timeout_secs = 5

            [output]
            default_format = "json"
            use_color = false
        "#},
    );

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.roi.discount_rate, 0.08);
    assert_eq!(config.roi.horizon_years, 7);
    assert_eq!(config.similarity.duplicate_threshold, 0.45);
    assert_eq!(config.similarity.weights.title, 0.25);
    assert_eq!(config.dependencies.matcher, MatcherKind::Id);
    assert_eq!(config.rulebook.url, "http://localhost:5000/rulebook/");
    assert_eq!(config.rulebook.timeout_secs, 5);
    assert_eq!(config.output.default_format.as_deref(), Some("json"));
    assert_eq!(config.output.use_color, Some(false));
}

#[test]
fn test_configured_discount_rate_changes_npv() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[roi]\ndiscount_rate = 0.0\n");
    let config = load_config_from(&path).unwrap();

    let calc = &sample_roi_calculations().unwrap()[0];
    let undiscounted = calculate_roi_metrics_with(calc, &config.roi).unwrap();
    let default = calculate_roi_metrics(calc).unwrap();

    // 5 years of savings minus the outlay, no discounting
    assert!((undiscounted.npv - (5.0 * 152_800.0 - 250_000.0)).abs() < 1e-6);
    assert!(undiscounted.npv > default.npv);
}

#[test]
fn test_all_zero_weights_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        indoc! {"
            [similarity.weights]
            title = 0.0
            description = 0.0
            tags = 0.0
            department = 0.0
        "},
    );

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.similarity.weights, SimilarityWeights::default());
    assert!((config.similarity.weights.sum() - 1.0).abs() < 1e-9);
}

#[test]
fn test_missing_file_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let err = load_config_from(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn test_malformed_file_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[dependencies]\nmatcher = \"regex\"\n");
    assert!(matches!(
        load_config_from(&path),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn test_init_writes_loadable_config() {
    let dir = TempDir::new().unwrap();
    let path = init_config_in(dir.path(), false).unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.dependencies.matcher, MatcherKind::Fuzzy);
    assert_eq!(config.roi.horizon_years, 5);
}
