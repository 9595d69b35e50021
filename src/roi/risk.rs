use serde::{Deserialize, Serialize};

use super::metrics::calculate_financial_metrics;
use super::RoiCalculation;
use crate::config::RoiConfig;
use crate::errors::RoiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub category: String,
    pub factor: String,
    pub impact: RiskLevel,
    pub probability: RiskLevel,
    pub mitigation: String,
    pub score: u8,
}

impl RiskFactor {
    fn new(
        category: &str,
        factor: &str,
        impact: RiskLevel,
        probability: RiskLevel,
        mitigation: &str,
        score: u8,
    ) -> Self {
        Self {
            category: category.to_string(),
            factor: factor.to_string(),
            impact,
            probability,
            mitigation: mitigation.to_string(),
            score,
        }
    }
}

fn cost_tier(total_cost: f64) -> RiskLevel {
    if total_cost > 500_000.0 {
        RiskLevel::High
    } else if total_cost > 100_000.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn automation_tier(automation_level: f64) -> RiskLevel {
    if automation_level > 80.0 {
        RiskLevel::High
    } else if automation_level > 50.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Bucketed risk score: cost tier (1-3) + automation tier (1-3) + payback
/// tier (0-2), capped at 10.
pub fn risk_score(implementation_cost: f64, automation_level: f64, payback_months: f64) -> u8 {
    let tier_points = |level: RiskLevel| match level {
        RiskLevel::Low => 1,
        RiskLevel::Medium => 2,
        RiskLevel::High => 3,
    };
    let payback_points = if payback_months > 24.0 {
        2
    } else if payback_months > 12.0 {
        1
    } else {
        0
    };

    let score = tier_points(cost_tier(implementation_cost))
        + tier_points(automation_tier(automation_level))
        + payback_points;
    score.min(10)
}

/// Fixed four-category risk register for one calculation
pub fn assess_risk(calc: &RoiCalculation) -> Vec<RiskFactor> {
    let total_cost = calc.total_implementation_cost();
    let automation_level = calc.proposed_state.automation_level;

    let technical_score = match cost_tier(total_cost) {
        RiskLevel::High => 8,
        RiskLevel::Medium => 5,
        RiskLevel::Low => 3,
    };
    let change_heavy = automation_level > 70.0;
    let budget_heavy = total_cost > 300_000.0;

    vec![
        RiskFactor::new(
            "Technical",
            "Implementation Complexity",
            cost_tier(total_cost),
            automation_tier(automation_level),
            "Phased implementation approach with pilot testing",
            technical_score,
        ),
        RiskFactor::new(
            "Operational",
            "Change Management",
            if change_heavy {
                RiskLevel::High
            } else {
                RiskLevel::Medium
            },
            RiskLevel::Medium,
            "Comprehensive training and communication plan",
            if change_heavy { 6 } else { 4 },
        ),
        RiskFactor::new(
            "Financial",
            "Cost Overrun Risk",
            if budget_heavy {
                RiskLevel::High
            } else {
                RiskLevel::Medium
            },
            RiskLevel::Medium,
            "Detailed project planning with contingency budget",
            if budget_heavy { 7 } else { 4 },
        ),
        RiskFactor::new(
            "Strategic",
            "Technology Obsolescence",
            RiskLevel::Medium,
            RiskLevel::Low,
            "Regular technology roadmap reviews and updates",
            3,
        ),
    ]
}

/// Four-tier rating of the overall risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallRiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl OverallRiskLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            8..=u8::MAX => OverallRiskLevel::Critical,
            6..=7 => OverallRiskLevel::High,
            4..=5 => OverallRiskLevel::Medium,
            _ => OverallRiskLevel::Low,
        }
    }
}

impl std::fmt::Display for OverallRiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OverallRiskLevel::Low => "low",
            OverallRiskLevel::Medium => "medium",
            OverallRiskLevel::High => "high",
            OverallRiskLevel::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Risk factors plus an overall rating and recommended governance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub id: String,
    pub process_name: String,
    pub department: String,
    pub overall_risk_score: u8,
    pub risk_level: OverallRiskLevel,
    pub risk_factors: Vec<RiskFactor>,
    /// 30, 60 or 90 depending on the size of the investment
    pub complexity: u8,
    pub investment_size: f64,
    pub automation_level: f64,
    pub recommendations: Vec<String>,
}

pub fn build_risk_profile(
    calc: &RoiCalculation,
    config: &RoiConfig,
) -> Result<RiskProfile, RoiError> {
    let metrics = calculate_financial_metrics(calc, config)?;
    let investment_size = calc.total_implementation_cost();
    let automation_level = calc.proposed_state.automation_level;
    let risk_factors = assess_risk(calc);
    let overall_risk_score = metrics.risk_score;

    let complexity = match cost_tier(investment_size) {
        RiskLevel::High => 90,
        RiskLevel::Medium => 60,
        RiskLevel::Low => 30,
    };

    let recommendations = vec![
        pick(
            overall_risk_score > 7,
            "Consider phased implementation approach",
            "Standard implementation recommended",
        ),
        pick(
            automation_level > 80.0,
            "Implement comprehensive change management program",
            "Standard training sufficient",
        ),
        pick(
            investment_size > 300_000.0,
            "Establish detailed project monitoring and contingency planning",
            "Regular project reviews adequate",
        ),
        pick(
            risk_factors.iter().any(|r| r.impact == RiskLevel::High),
            "Engage senior stakeholder oversight",
            "Standard governance applies",
        ),
    ];

    Ok(RiskProfile {
        id: calc.id.clone(),
        process_name: calc.process_name.clone(),
        department: calc.department.clone(),
        overall_risk_score,
        risk_level: OverallRiskLevel::from_score(overall_risk_score),
        risk_factors,
        complexity,
        investment_size,
        automation_level,
        recommendations,
    })
}

fn pick(condition: bool, yes: &str, no: &str) -> String {
    let chosen = if condition { yes } else { no };
    chosen.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

pub fn risk_distribution(profiles: &[RiskProfile]) -> RiskDistribution {
    profiles
        .iter()
        .fold(RiskDistribution::default(), |mut dist, profile| {
            match profile.risk_level {
                OverallRiskLevel::Low => dist.low += 1,
                OverallRiskLevel::Medium => dist.medium += 1,
                OverallRiskLevel::High => dist.high += 1,
                OverallRiskLevel::Critical => dist.critical += 1,
            }
            dist
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::test_support::invoice_calculation;

    #[test]
    fn test_risk_score_tiers() {
        assert_eq!(risk_score(50_000.0, 40.0, 6.0), 2);
        assert_eq!(risk_score(250_000.0, 85.0, 19.6), 6);
        assert_eq!(risk_score(600_000.0, 95.0, 30.0), 8);
    }

    #[test]
    fn test_risk_score_boundaries_are_exclusive() {
        // Exactly on the thresholds stays in the lower tier
        assert_eq!(risk_score(100_000.0, 50.0, 12.0), 2);
        assert_eq!(risk_score(500_000.0, 80.0, 24.0), 5);
    }

    #[test]
    fn test_assess_risk_invoice() {
        let factors = assess_risk(&invoice_calculation());
        assert_eq!(factors.len(), 4);

        let technical = &factors[0];
        assert_eq!(technical.category, "Technical");
        assert_eq!(technical.impact, RiskLevel::Medium);
        assert_eq!(technical.probability, RiskLevel::High);
        assert_eq!(technical.score, 5);

        let operational = &factors[1];
        assert_eq!(operational.impact, RiskLevel::High);
        assert_eq!(operational.score, 6);

        let financial = &factors[2];
        assert_eq!(financial.impact, RiskLevel::Medium);
        assert_eq!(financial.score, 4);

        let strategic = &factors[3];
        assert_eq!(strategic.probability, RiskLevel::Low);
        assert_eq!(strategic.score, 3);
    }

    #[test]
    fn test_overall_level_from_score() {
        assert_eq!(OverallRiskLevel::from_score(3), OverallRiskLevel::Low);
        assert_eq!(OverallRiskLevel::from_score(4), OverallRiskLevel::Medium);
        assert_eq!(OverallRiskLevel::from_score(6), OverallRiskLevel::High);
        assert_eq!(OverallRiskLevel::from_score(8), OverallRiskLevel::Critical);
    }

    #[test]
    fn test_risk_profile_invoice() {
        let profile = build_risk_profile(&invoice_calculation(), &RoiConfig::default()).unwrap();
        assert_eq!(profile.overall_risk_score, 6);
        assert_eq!(profile.risk_level, OverallRiskLevel::High);
        assert_eq!(profile.complexity, 60);
        assert_eq!(
            profile.recommendations,
            vec![
                "Standard implementation recommended",
                "Implement comprehensive change management program",
                "Regular project reviews adequate",
                "Engage senior stakeholder oversight",
            ]
        );
    }

    #[test]
    fn test_distribution_counts_levels() {
        let config = RoiConfig::default();
        let mut cheap = invoice_calculation();
        cheap.implementation_costs.development = 10_000.0;
        cheap.implementation_costs.infrastructure = 0.0;
        cheap.proposed_state.automation_level = 40.0;

        let profiles = vec![
            build_risk_profile(&invoice_calculation(), &config).unwrap(),
            build_risk_profile(&cheap, &config).unwrap(),
        ];
        let dist = risk_distribution(&profiles);
        assert_eq!(dist.high, 1);
        assert_eq!(dist.low, 1);
        assert_eq!(dist.medium + dist.critical, 0);
    }
}
