use anyhow::Result;

use super::{emit_report, load_calculations, OutputTarget};
use crate::cli::ReportArgs;
use crate::config::RpaInsightsConfig;
use crate::io::output::{Report, ReportBody, RoiEntry};
use crate::roi::{
    analyze_payback, build_risk_profile, calculate_department_roi, calculate_roi_metrics_with,
    risk_distribution, summarize_payback, RoiCalculation, MAX_HORIZON_MONTHS,
};

fn target(args: &ReportArgs, config: &RpaInsightsConfig) -> OutputTarget {
    OutputTarget::resolve(args.format, args.output.clone(), &config.output)
}

/// Per-calculation metrics. Failures are reported alongside the rows
/// instead of aborting the whole run.
pub fn roi_entries(calcs: &[RoiCalculation], config: &RpaInsightsConfig) -> Vec<RoiEntry> {
    calcs
        .iter()
        .map(|calc| {
            let (metrics, error) = match calculate_roi_metrics_with(calc, &config.roi) {
                Ok(metrics) => (Some(metrics), None),
                Err(e) => {
                    log::warn!("ROI calculation '{}' failed: {}", calc.process_name, e);
                    (None, Some(e.to_string()))
                }
            };
            RoiEntry {
                id: calc.id.clone(),
                process_name: calc.process_name.clone(),
                department: calc.department.clone(),
                metrics,
                error,
            }
        })
        .collect()
}

pub fn handle_roi(args: ReportArgs, config: &RpaInsightsConfig) -> Result<()> {
    let calcs = load_calculations(args.input.as_deref(), config)?;
    let report = Report::new("ROI Metrics", ReportBody::Roi(roi_entries(&calcs, config)));
    emit_report(&report, &target(&args, config))
}

pub fn handle_risk(args: ReportArgs, config: &RpaInsightsConfig) -> Result<()> {
    let calcs = load_calculations(args.input.as_deref(), config)?;
    let profiles: Vec<_> = calcs
        .iter()
        .filter_map(|calc| match build_risk_profile(calc, &config.roi) {
            Ok(profile) => Some(profile),
            Err(e) => {
                log::warn!("Skipping risk profile for '{}': {}", calc.process_name, e);
                None
            }
        })
        .collect();
    let distribution = risk_distribution(&profiles);

    let report = Report::new(
        "Risk Assessment",
        ReportBody::Risk {
            profiles,
            distribution,
        },
    );
    emit_report(&report, &target(&args, config))
}

pub fn handle_departments(args: ReportArgs, config: &RpaInsightsConfig) -> Result<()> {
    let calcs = load_calculations(args.input.as_deref(), config)?;
    let departments = calculate_department_roi(&calcs, &config.roi)?;
    let report = Report::new("Department ROI", ReportBody::Departments(departments));
    emit_report(&report, &target(&args, config))
}

pub fn handle_payback(
    args: ReportArgs,
    months: Option<u32>,
    config: &RpaInsightsConfig,
) -> Result<()> {
    let calcs = load_calculations(args.input.as_deref(), config)?;
    let horizon = months.unwrap_or(config.roi.horizon_years.saturating_mul(12));
    if horizon > MAX_HORIZON_MONTHS {
        anyhow::bail!(
            "Payback horizon of {horizon} months exceeds the {MAX_HORIZON_MONTHS} month limit"
        );
    }

    let analyses: Vec<_> = calcs
        .iter()
        .filter_map(|calc| match analyze_payback(calc, horizon, &config.roi) {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                log::warn!("Skipping payback for '{}': {}", calc.process_name, e);
                None
            }
        })
        .collect();
    let summary = summarize_payback(&analyses);

    let report = Report::new("Payback Analysis", ReportBody::Payback { analyses, summary });
    emit_report(&report, &target(&args, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::test_support::invoice_calculation;

    #[test]
    fn test_failed_calculation_becomes_error_entry() {
        let mut broken = invoice_calculation();
        broken.id = "roi9".into();
        broken.current_state.annual_volume = 0.0;

        let entries = roi_entries(&[invoice_calculation(), broken], &RpaInsightsConfig::default());
        assert!(entries[0].metrics.is_some());
        assert!(entries[1].metrics.is_none());
        assert!(entries[1]
            .error
            .as_deref()
            .is_some_and(|e| e.contains("annual_volume")));
    }
}
