use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::metrics::{calculate_financial_metrics, FinancialMetrics};
use super::risk::RiskLevel;
use super::RoiCalculation;
use crate::config::RoiConfig;
use crate::errors::{Error, Result};

/// Per-department roll-up of investment, savings and risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRoi {
    pub department: String,
    pub total_investment: f64,
    pub total_savings: f64,
    /// (savings - investment) / investment, as a percentage
    pub roi: f64,
    pub process_count: usize,
    /// Months
    pub average_payback: f64,
    pub risk_level: RiskLevel,
}

fn risk_level_from_mean(mean_score: f64) -> RiskLevel {
    if mean_score < 4.0 {
        RiskLevel::Low
    } else if mean_score < 7.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Group calculations by department in first-seen order and aggregate them.
///
/// Financial metrics are recomputed from each calculation; any attached
/// `calculated_metrics` snapshot is ignored. Only invalid input fails the
/// roll-up; a zero baseline for the relative deltas does not.
pub fn calculate_department_roi(
    calcs: &[RoiCalculation],
    config: &RoiConfig,
) -> Result<Vec<DepartmentRoi>> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<(&RoiCalculation, FinancialMetrics)>> = HashMap::new();

    for calc in calcs {
        let metrics = calculate_financial_metrics(calc, config)
            .map_err(|e| Error::roi(calc.process_name.clone(), e))?;
        let department = calc.department.as_str();
        if !groups.contains_key(department) {
            order.push(department);
        }
        groups.entry(department).or_default().push((calc, metrics));
    }

    let departments = order
        .into_iter()
        .map(|department| {
            let members = &groups[department];
            let count = members.len() as f64;

            let total_investment: f64 = members
                .iter()
                .map(|(calc, _)| calc.total_implementation_cost())
                .sum();
            let total_savings: f64 = members.iter().map(|(_, m)| m.annual_cost_savings).sum();
            let roi = if total_investment > 0.0 {
                (total_savings - total_investment) / total_investment * 100.0
            } else {
                0.0
            };
            let average_payback =
                members.iter().map(|(_, m)| m.payback_period).sum::<f64>() / count;
            let average_risk = members
                .iter()
                .map(|(_, m)| f64::from(m.risk_score))
                .sum::<f64>()
                / count;

            DepartmentRoi {
                department: department.to_string(),
                total_investment,
                total_savings,
                roi,
                process_count: members.len(),
                average_payback,
                risk_level: risk_level_from_mean(average_risk),
            }
        })
        .collect();

    Ok(departments)
}
