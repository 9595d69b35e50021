use serde::{Deserialize, Serialize};

use super::financial::{estimate_irr, net_present_value, payback_months, savings_series};
use super::risk::risk_score;
use super::RoiCalculation;
use crate::config::RoiConfig;
use crate::errors::RoiError;

/// Derived financial snapshot of one [`RoiCalculation`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiMetrics {
    /// Hours saved per year
    pub annual_time_savings: f64,
    pub annual_cost_savings: f64,
    pub implementation_cost: f64,
    /// First-year savings minus implementation cost
    pub net_roi: f64,
    pub roi_percentage: f64,
    /// Months
    pub payback_period: f64,
    pub npv: f64,
    /// Percentage
    pub irr: f64,
    pub efficiency_gain: f64,
    pub error_reduction: f64,
    pub throughput_improvement: f64,
    /// 1-10
    pub risk_score: u8,
}

/// Intermediate hours and costs for the current and proposed operating models
#[derive(Debug, Clone, Copy, PartialEq)]
struct OperatingModel {
    current_annual_hours: f64,
    current_annual_cost: f64,
    proposed_annual_hours: f64,
    proposed_annual_cost: f64,
}

fn operating_model(calc: &RoiCalculation) -> OperatingModel {
    let current = &calc.current_state;
    let proposed = &calc.proposed_state;

    let current_annual_hours = current.annual_volume * current.time_per_transaction / 60.0;
    let current_annual_cost =
        current_annual_hours * current.resource_cost + current.annual_operating_cost;

    let automation_share = proposed.automation_level / 100.0;
    let automated_volume = current.annual_volume * automation_share;
    let manual_volume = current.annual_volume * (1.0 - automation_share);

    // Manual share is still billed at the current per-transaction time
    let proposed_annual_hours = (automated_volume * proposed.time_per_transaction
        + manual_volume * current.time_per_transaction)
        / 60.0;
    let proposed_annual_cost = proposed_annual_hours * current.resource_cost
        + proposed.maintenance_cost
        + proposed.licensing_cost;

    OperatingModel {
        current_annual_hours,
        current_annual_cost,
        proposed_annual_hours,
        proposed_annual_cost,
    }
}

/// Relative change from `base` to `new`, as a percentage of `base`
fn relative_reduction(
    base: f64,
    new: f64,
    metric: &'static str,
    base_name: &'static str,
) -> Result<f64, RoiError> {
    if base == 0.0 {
        return Err(RoiError::DivisionByZero {
            metric,
            base: base_name,
        });
    }
    Ok((base - new) / base * 100.0)
}

fn check_baseline(calc: &RoiCalculation) -> Result<(), RoiError> {
    if calc.current_state.annual_volume == 0.0 {
        return Err(RoiError::MissingBaseline {
            field: "current_state.annual_volume",
        });
    }
    if calc.current_state.time_per_transaction == 0.0 {
        return Err(RoiError::MissingBaseline {
            field: "current_state.time_per_transaction",
        });
    }
    Ok(())
}

/// Savings, cost and cash-flow figures of one [`RoiCalculation`].
///
/// Unlike [`RoiMetrics`] these need no relative baseline, so a record with a
/// zero error rate or zero transaction time still has them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    pub annual_time_savings: f64,
    pub annual_cost_savings: f64,
    pub implementation_cost: f64,
    pub net_roi: f64,
    pub roi_percentage: f64,
    /// Months; 0 when savings never cover the cost
    pub payback_period: f64,
    pub npv: f64,
    pub irr: f64,
    pub risk_score: u8,
}

fn financial_with_model(
    calc: &RoiCalculation,
    config: &RoiConfig,
) -> Result<(FinancialMetrics, OperatingModel), RoiError> {
    calc.validate()?;

    let model = operating_model(calc);
    let annual_time_savings = model.current_annual_hours - model.proposed_annual_hours;
    let annual_cost_savings = model.current_annual_cost - model.proposed_annual_cost;

    let implementation_cost = calc.total_implementation_cost();
    let net_roi = annual_cost_savings - implementation_cost;
    let roi_percentage = if implementation_cost > 0.0 {
        net_roi / implementation_cost * 100.0
    } else {
        0.0
    };
    let payback_period = payback_months(implementation_cost, annual_cost_savings);

    let series = savings_series(implementation_cost, annual_cost_savings, config.horizon_years);
    let npv = net_present_value(&series, config.discount_rate);
    let irr = estimate_irr(&series, config).rate_percent;

    let risk_score = risk_score(
        implementation_cost,
        calc.proposed_state.automation_level,
        payback_period,
    );

    let financial = FinancialMetrics {
        annual_time_savings,
        annual_cost_savings,
        implementation_cost,
        net_roi,
        roi_percentage,
        payback_period,
        npv,
        irr,
        risk_score,
    };
    Ok((financial, model))
}

/// Financial figures only. Fails on invalid input, never on a zero baseline.
pub fn calculate_financial_metrics(
    calc: &RoiCalculation,
    config: &RoiConfig,
) -> Result<FinancialMetrics, RoiError> {
    financial_with_model(calc, config).map(|(financial, _)| financial)
}

/// Compute metrics with the default 10%/5-year model
pub fn calculate_roi_metrics(calc: &RoiCalculation) -> Result<RoiMetrics, RoiError> {
    calculate_roi_metrics_with(calc, &RoiConfig::default())
}

pub fn calculate_roi_metrics_with(
    calc: &RoiCalculation,
    config: &RoiConfig,
) -> Result<RoiMetrics, RoiError> {
    let (financial, model) = financial_with_model(calc, config)?;
    check_baseline(calc)?;

    let current = &calc.current_state;
    let proposed = &calc.proposed_state;

    let efficiency_gain = relative_reduction(
        model.current_annual_hours,
        model.proposed_annual_hours,
        "efficiency_gain",
        "current annual hours",
    )?;
    let error_reduction = relative_reduction(
        current.error_rate,
        proposed.error_rate,
        "error_reduction",
        "current error rate",
    )?;
    let throughput_improvement = proposed.automation_level / 100.0
        * relative_reduction(
            current.time_per_transaction,
            proposed.time_per_transaction,
            "throughput_improvement",
            "current time per transaction",
        )?;

    Ok(RoiMetrics {
        annual_time_savings: financial.annual_time_savings,
        annual_cost_savings: financial.annual_cost_savings,
        implementation_cost: financial.implementation_cost,
        net_roi: financial.net_roi,
        roi_percentage: financial.roi_percentage,
        payback_period: financial.payback_period,
        npv: financial.npv,
        irr: financial.irr,
        efficiency_gain,
        error_reduction,
        throughput_improvement,
        risk_score: financial.risk_score,
    })
}

/// Attach a metrics snapshot to every calculation that can produce one.
///
/// Calculations whose metrics fail keep `calculated_metrics == None`; the
/// failure is logged.
pub fn attach_metrics(calcs: &mut [RoiCalculation], config: &RoiConfig) {
    for calc in calcs.iter_mut() {
        match calculate_roi_metrics_with(calc, config) {
            Ok(metrics) => calc.calculated_metrics = Some(metrics),
            Err(e) => {
                log::warn!("Skipping metrics for '{}': {}", calc.process_name, e);
                calc.calculated_metrics = None;
            }
        }
    }
}
