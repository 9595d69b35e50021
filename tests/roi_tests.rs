//! ROI engine behaviour over the bundled portfolio and edge-case records

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rpa_insights::config::RoiConfig;
use rpa_insights::roi::{
    analyze_payback, build_risk_profile, calculate_department_roi, calculate_irr,
    calculate_roi_metrics, calculate_roi_metrics_with, estimate_irr, risk_distribution,
    summarize_payback, OverallRiskLevel, PaybackStatus, RiskLevel, RoiCalculation,
};
use rpa_insights::{sample_roi_calculations, Error, RoiError};

fn sample(id: &str) -> RoiCalculation {
    sample_roi_calculations()
        .unwrap()
        .into_iter()
        .find(|c| c.id == id)
        .unwrap()
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_invoice_sample_metrics() {
    let metrics = calculate_roi_metrics(&sample("roi1")).unwrap();

    assert_close(metrics.annual_cost_savings, 152_800.0, 1e-6);
    assert_close(metrics.implementation_cost, 250_000.0, 1e-9);
    assert_close(metrics.net_roi, -97_200.0, 1e-6);
    assert_close(metrics.roi_percentage, -38.88, 1e-9);
    assert_close(metrics.payback_period, 19.634, 1e-3);
    assert!(metrics.npv > 0.0);
    assert!(metrics.irr > 50.0 && metrics.irr < 60.0);
    assert_eq!(metrics.risk_score, 6);
}

#[test]
fn test_attached_metrics_match_recomputation() {
    for calc in sample_roi_calculations().unwrap() {
        let fresh = calculate_roi_metrics(&calc).unwrap();
        assert_eq!(calc.calculated_metrics, Some(fresh));
    }
}

#[test]
fn test_department_rollup_of_samples() {
    let calcs = sample_roi_calculations().unwrap();
    let departments = calculate_department_roi(&calcs, &RoiConfig::default()).unwrap();

    let names: Vec<_> = departments.iter().map(|d| d.department.as_str()).collect();
    assert_eq!(names, vec!["Finance", "HR", "Operations", "IT", "Procurement"]);

    let hr = &departments[1];
    assert_eq!(hr.process_count, 1);
    assert_close(hr.total_investment, 133_000.0, 1e-9);
    assert_close(hr.total_savings, 57_250.0, 1e-6);
    assert_close(hr.average_payback, 27.878, 1e-3);
    assert_eq!(hr.risk_level, RiskLevel::Medium);

    // Risk score 7 puts IT in the high tier
    assert_eq!(departments[3].risk_level, RiskLevel::High);
}

#[test]
fn test_department_rollup_ignores_stale_snapshot() {
    let mut calc = sample("roi1");
    if let Some(metrics) = calc.calculated_metrics.as_mut() {
        metrics.annual_cost_savings = 1.0;
    }
    let departments = calculate_department_roi(&[calc], &RoiConfig::default()).unwrap();
    assert_close(departments[0].total_savings, 152_800.0, 1e-6);
}

#[test]
fn test_department_rollup_names_failing_process() {
    let mut broken = sample("roi2");
    broken.proposed_state.automation_level = 120.0;

    let err = calculate_department_roi(&[sample("roi1"), broken], &RoiConfig::default())
        .unwrap_err();
    match err {
        Error::Roi { process, source } => {
            assert_eq!(process, "Employee Onboarding System");
            assert!(matches!(
                source,
                RoiError::InvalidInput {
                    field: "proposed_state.automation_level",
                    ..
                }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_zero_error_rate_keeps_record_in_portfolio_views() {
    let config = RoiConfig::default();
    let mut calcs = sample_roi_calculations().unwrap();
    calcs[1].current_state.error_rate = 0.0;

    // Only the relative delta is undefined for this record
    assert!(matches!(
        calculate_roi_metrics(&calcs[1]),
        Err(RoiError::DivisionByZero {
            metric: "error_reduction",
            ..
        })
    ));

    let departments = calculate_department_roi(&calcs, &config).unwrap();
    assert_eq!(departments.len(), 5);
    assert_close(departments[1].total_savings, 57_250.0, 1e-6);

    let profiles: Vec<_> = calcs
        .iter()
        .map(|calc| build_risk_profile(calc, &config).unwrap())
        .collect();
    assert_eq!(risk_distribution(&profiles).high, 5);

    let analyses: Vec<_> = calcs
        .iter()
        .map(|calc| analyze_payback(calc, 60, &config).unwrap())
        .collect();
    assert_eq!(analyses[1].status, PaybackStatus::Fair);
    let summary = summarize_payback(&analyses).unwrap();
    assert_close(summary.total_investment, 1_071_000.0, 1e-6);
}

#[test]
fn test_project_that_never_pays_back_is_poor() {
    let mut calc = sample("roi1");
    calc.proposed_state.licensing_cost = 1_000_000.0;

    let analysis = analyze_payback(&calc, 60, &RoiConfig::default()).unwrap();
    assert!(analysis.annual_savings < 0.0);
    assert_eq!(analysis.break_even_month, None);
    assert_eq!(analysis.status, PaybackStatus::Poor);
}

#[test]
fn test_zero_error_rate_is_reported_not_nan() {
    let mut calc = sample("roi3");
    calc.current_state.error_rate = 0.0;

    let err = calculate_roi_metrics(&calc).unwrap_err();
    assert!(matches!(
        err,
        RoiError::DivisionByZero {
            metric: "error_reduction",
            ..
        }
    ));
}

#[test]
fn test_out_of_range_percentage_is_invalid() {
    let mut calc = sample("roi4");
    calc.proposed_state.automation_level = 120.0;
    assert!(matches!(
        calculate_roi_metrics(&calc),
        Err(RoiError::InvalidInput {
            field: "proposed_state.automation_level",
            ..
        })
    ));
}

#[test]
fn test_irr_of_even_annuity() {
    let cashflows = [-100_000.0, 50_000.0, 50_000.0, 50_000.0, 50_000.0, 50_000.0];
    assert_close(calculate_irr(&cashflows), 41.04, 0.01);

    let estimate = estimate_irr(&cashflows, &RoiConfig::default());
    assert!(estimate.converged);
}

#[test]
fn test_longer_horizon_raises_npv() {
    let calc = sample("roi3");
    let five = calculate_roi_metrics(&calc).unwrap();
    let ten = calculate_roi_metrics_with(
        &calc,
        &RoiConfig {
            horizon_years: 10,
            ..RoiConfig::default()
        },
    )
    .unwrap();
    assert!(ten.npv > five.npv);
    assert_eq!(ten.payback_period, five.payback_period);
}

#[test]
fn test_risk_profiles_and_distribution() {
    let config = RoiConfig::default();
    let profiles: Vec<_> = sample_roi_calculations()
        .unwrap()
        .iter()
        .map(|calc| build_risk_profile(calc, &config).unwrap())
        .collect();

    assert!(profiles.iter().all(|p| p.risk_factors.len() == 4));
    assert_eq!(profiles[3].risk_level, OverallRiskLevel::High);

    let distribution = risk_distribution(&profiles);
    assert_eq!(distribution.high, 5);
    assert_eq!(distribution.low + distribution.medium + distribution.critical, 0);
}

#[test]
fn test_payback_portfolio() {
    let config = RoiConfig::default();
    let analyses: Vec<_> = sample_roi_calculations()
        .unwrap()
        .iter()
        .map(|calc| analyze_payback(calc, 60, &config).unwrap())
        .collect();

    let statuses: Vec<_> = analyses.iter().map(|a| a.status).collect();
    assert_eq!(
        statuses,
        vec![
            PaybackStatus::Good,
            PaybackStatus::Fair,
            PaybackStatus::Good,
            PaybackStatus::Poor,
            PaybackStatus::Fair,
        ]
    );
    assert_eq!(analyses[3].break_even_month, Some(53));

    let summary = summarize_payback(&analyses).unwrap();
    assert_close(summary.total_investment, 1_071_000.0, 1e-6);
}

fn with_automation(level: f64) -> RoiCalculation {
    let mut calc = sample("roi1");
    calc.proposed_state.automation_level = level;
    calc
}

proptest! {
    #[test]
    fn prop_no_automation_saves_no_time(
        volume in 1.0f64..100_000.0,
        minutes in 1.0f64..120.0,
    ) {
        let mut calc = with_automation(0.0);
        calc.current_state.annual_volume = volume;
        calc.current_state.time_per_transaction = minutes;

        let metrics = calculate_roi_metrics(&calc).unwrap();
        prop_assert!(metrics.annual_time_savings.abs() < 1e-6 * volume * minutes);
        prop_assert!(metrics.efficiency_gain.abs() < 1e-9);
    }

    #[test]
    fn prop_risk_score_is_bounded(level in 0.0f64..=100.0) {
        let metrics = calculate_roi_metrics(&with_automation(level)).unwrap();
        prop_assert!((1..=10).contains(&metrics.risk_score));
    }

    #[test]
    fn prop_full_automation_only_pays_automated_time(automated_minutes in 0.0f64..15.0) {
        let mut calc = with_automation(100.0);
        calc.proposed_state.time_per_transaction = automated_minutes;

        let metrics = calculate_roi_metrics(&calc).unwrap();
        let expected_hours = 24_000.0 * (15.0 - automated_minutes) / 60.0;
        prop_assert!((metrics.annual_time_savings - expected_hours).abs() < 1e-6);
    }
}
