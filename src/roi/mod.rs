//! ROI engine for automation candidates
//!
//! Converts a process's current and proposed operating parameters plus its
//! one-off implementation costs into financial metrics: savings, ROI,
//! payback, NPV, IRR and a bucketed risk score. Every function here is pure
//! and synchronous over caller-owned records.

pub mod department;
pub mod financial;
pub mod metrics;
pub mod payback;
pub mod risk;

use serde::{Deserialize, Serialize};

use crate::errors::RoiError;

pub use department::{calculate_department_roi, DepartmentRoi};
pub use financial::{calculate_irr, estimate_irr, net_present_value, payback_months, IrrEstimate};
pub use metrics::{
    attach_metrics, calculate_financial_metrics, calculate_roi_metrics, calculate_roi_metrics_with,
    FinancialMetrics, RoiMetrics,
};
pub use payback::{
    analyze_payback, summarize_payback, CashflowPoint, PaybackAnalysis, PaybackStatus,
    PaybackSummary, MAX_HORIZON_MONTHS,
};
pub use risk::{
    assess_risk, build_risk_profile, risk_distribution, risk_score, OverallRiskLevel,
    RiskDistribution, RiskFactor, RiskLevel, RiskProfile,
};

/// A single automation candidate with its before/after operating model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiCalculation {
    pub id: String,
    pub process_name: String,
    pub department: String,
    pub current_state: CurrentState,
    pub proposed_state: ProposedState,
    pub implementation_costs: ImplementationCosts,
    /// Snapshot attached once at load time; readers recompute rather than trust it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated_metrics: Option<RoiMetrics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentState {
    pub annual_volume: f64,
    /// Minutes per transaction
    pub time_per_transaction: f64,
    /// Percentage, 0-100
    pub error_rate: f64,
    /// Hourly rate of the people doing the work
    pub resource_cost: f64,
    pub annual_operating_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedState {
    /// Share of volume handled by the automation, 0-100
    pub automation_level: f64,
    /// Minutes per automated transaction
    pub time_per_transaction: f64,
    pub error_rate: f64,
    pub maintenance_cost: f64,
    pub licensing_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationCosts {
    pub development: f64,
    pub training: f64,
    pub infrastructure: f64,
    pub testing: f64,
    pub deployment: f64,
}

impl ImplementationCosts {
    /// Total capital outlay across the five buckets
    pub fn total(&self) -> f64 {
        self.development + self.training + self.infrastructure + self.testing + self.deployment
    }
}

impl RoiCalculation {
    pub fn total_implementation_cost(&self) -> f64 {
        self.implementation_costs.total()
    }

    /// Check the record invariants: rates in [0, 100], volumes and costs
    /// non-negative, everything finite.
    pub fn validate(&self) -> Result<(), RoiError> {
        let current = &self.current_state;
        let proposed = &self.proposed_state;
        let costs = &self.implementation_costs;

        let percentages = [
            ("current_state.error_rate", current.error_rate),
            ("proposed_state.automation_level", proposed.automation_level),
            ("proposed_state.error_rate", proposed.error_rate),
        ];
        let non_negative = [
            ("current_state.annual_volume", current.annual_volume),
            ("current_state.time_per_transaction", current.time_per_transaction),
            ("current_state.resource_cost", current.resource_cost),
            ("current_state.annual_operating_cost", current.annual_operating_cost),
            ("proposed_state.time_per_transaction", proposed.time_per_transaction),
            ("proposed_state.maintenance_cost", proposed.maintenance_cost),
            ("proposed_state.licensing_cost", proposed.licensing_cost),
            ("implementation_costs.development", costs.development),
            ("implementation_costs.training", costs.training),
            ("implementation_costs.infrastructure", costs.infrastructure),
            ("implementation_costs.testing", costs.testing),
            ("implementation_costs.deployment", costs.deployment),
        ];

        for &(field, value) in percentages.iter().chain(non_negative.iter()) {
            if !value.is_finite() {
                return Err(RoiError::InvalidInput {
                    field,
                    value,
                    reason: "must be a finite number",
                });
            }
        }

        if let Some(&(field, value)) = percentages
            .iter()
            .find(|(_, value)| !(0.0..=100.0).contains(value))
        {
            return Err(RoiError::InvalidInput {
                field,
                value,
                reason: "percentage must be between 0 and 100",
            });
        }

        if let Some(&(field, value)) = non_negative.iter().find(|(_, value)| *value < 0.0) {
            return Err(RoiError::InvalidInput {
                field,
                value,
                reason: "must not be negative",
            });
        }

        Ok(())
    }
}
