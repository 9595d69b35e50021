use serde::Serialize;

use super::matcher::DependencyMatcher;
use super::Process;
use crate::errors::{Error, Result};

/// Transitive dependencies are not walked; the variant says so explicitly
/// rather than returning an empty list that reads as "none".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndirectDependencies {
    NotComputed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImpactAnalysis<'a> {
    pub process: &'a Process,
    /// One entry per resolved dependency name, in declaration order
    pub direct_dependencies: Vec<&'a Process>,
    pub indirect_dependencies: IndirectDependencies,
    pub dependents: Vec<&'a Process>,
    pub impact_score: f64,
}

/// Direct dependencies weigh 10, dependents 15, plus expected ROI / 10,000.
/// Unnormalized, so scores only compare within one portfolio.
pub fn impact_score(direct: usize, dependents: usize, expected_roi: f64) -> f64 {
    direct as f64 * 10.0 + dependents as f64 * 15.0 + expected_roi / 10_000.0
}

pub fn analyze_dependency_impact<'a>(
    process_id: &str,
    processes: &'a [Process],
    matcher: &dyn DependencyMatcher,
) -> Result<ImpactAnalysis<'a>> {
    let target = processes
        .iter()
        .find(|p| p.id == process_id)
        .ok_or_else(|| Error::ProcessNotFound(process_id.to_string()))?;

    let direct_dependencies: Vec<&Process> = target
        .dependencies
        .iter()
        .filter_map(|name| matcher.resolve(name, processes))
        .collect();

    let dependents: Vec<&Process> = processes
        .iter()
        .filter(|p| p.dependencies.iter().any(|name| matcher.matches(name, target)))
        .collect();

    let impact_score = impact_score(
        direct_dependencies.len(),
        dependents.len(),
        target.expected_roi,
    );

    log::debug!(
        "{}: {} direct dependencies, {} dependents, impact {:.2}",
        target.id,
        direct_dependencies.len(),
        dependents.len(),
        impact_score
    );

    Ok(ImpactAnalysis {
        process: target,
        direct_dependencies,
        indirect_dependencies: IndirectDependencies::NotComputed,
        dependents,
        impact_score,
    })
}
