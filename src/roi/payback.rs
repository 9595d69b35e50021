//! Break-even timelines for automation candidates.

use serde::{Deserialize, Serialize};

use super::metrics::calculate_financial_metrics;
use super::RoiCalculation;
use crate::config::RoiConfig;
use crate::errors::RoiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaybackStatus {
    Excellent, // <= 12 months
    Good,      // <= 24 months
    Fair,      // <= 36 months
    Poor,
}

/// Longest timeline `analyze_payback` will build (50 years)
pub const MAX_HORIZON_MONTHS: u32 = 600;

impl PaybackStatus {
    /// Tier for a project with positive savings. A zero or negative saving
    /// never breaks even, so it is always `Poor`.
    pub fn classify(months: f64, annual_savings: f64) -> Self {
        if annual_savings <= 0.0 {
            PaybackStatus::Poor
        } else {
            Self::from_months(months)
        }
    }

    pub fn from_months(months: f64) -> Self {
        if months <= 12.0 {
            PaybackStatus::Excellent
        } else if months <= 24.0 {
            PaybackStatus::Good
        } else if months <= 36.0 {
            PaybackStatus::Fair
        } else {
            PaybackStatus::Poor
        }
    }
}

impl std::fmt::Display for PaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaybackStatus::Excellent => "Excellent",
            PaybackStatus::Good => "Good",
            PaybackStatus::Fair => "Fair",
            PaybackStatus::Poor => "Poor",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashflowPoint {
    pub month: u32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaybackAnalysis {
    pub id: String,
    pub process_name: String,
    pub department: String,
    pub investment_cost: f64,
    pub annual_savings: f64,
    pub payback_period: f64,
    pub npv: f64,
    pub irr: f64,
    pub status: PaybackStatus,
    /// First month whose cumulative position is non-negative, if within the horizon
    pub break_even_month: Option<u32>,
    /// Month 0 is the initial outlay; each later month adds a twelfth of annual savings
    pub cumulative_savings: Vec<CashflowPoint>,
}

pub fn analyze_payback(
    calc: &RoiCalculation,
    horizon_months: u32,
    config: &RoiConfig,
) -> Result<PaybackAnalysis, RoiError> {
    if horizon_months > MAX_HORIZON_MONTHS {
        return Err(RoiError::InvalidInput {
            field: "horizon_months",
            value: f64::from(horizon_months),
            reason: "must be at most 600 months",
        });
    }

    let metrics = calculate_financial_metrics(calc, config)?;
    let investment_cost = calc.total_implementation_cost();
    let monthly_savings = metrics.annual_cost_savings / 12.0;

    let cumulative_savings: Vec<CashflowPoint> = (0..=horizon_months)
        .scan(-investment_cost, |cumulative, month| {
            if month > 0 {
                *cumulative += monthly_savings;
            }
            Some(CashflowPoint {
                month,
                value: *cumulative,
            })
        })
        .collect();

    let break_even_month = cumulative_savings
        .iter()
        .find(|point| point.value >= 0.0)
        .map(|point| point.month);

    Ok(PaybackAnalysis {
        id: calc.id.clone(),
        process_name: calc.process_name.clone(),
        department: calc.department.clone(),
        investment_cost,
        annual_savings: metrics.annual_cost_savings,
        payback_period: metrics.payback_period,
        npv: metrics.npv,
        irr: metrics.irr,
        status: PaybackStatus::classify(metrics.payback_period, metrics.annual_cost_savings),
        break_even_month,
        cumulative_savings,
    })
}

/// Portfolio-level averages and totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaybackSummary {
    pub average_payback: f64,
    pub total_investment: f64,
    pub total_annual_savings: f64,
    pub average_npv: f64,
    pub average_irr: f64,
}

/// Returns `None` for an empty portfolio instead of dividing by zero
pub fn summarize_payback(analyses: &[PaybackAnalysis]) -> Option<PaybackSummary> {
    if analyses.is_empty() {
        return None;
    }
    let count = analyses.len() as f64;
    let mean = |f: fn(&PaybackAnalysis) -> f64| analyses.iter().map(f).sum::<f64>() / count;

    Some(PaybackSummary {
        average_payback: mean(|a| a.payback_period),
        total_investment: analyses.iter().map(|a| a.investment_cost).sum(),
        total_annual_savings: analyses.iter().map(|a| a.annual_savings).sum(),
        average_npv: mean(|a| a.npv),
        average_irr: mean(|a| a.irr),
    })
}
