//! Analytics behind an RPA Center of Excellence dashboard.
//!
//! - [`roi`]: financial metrics, risk assessment, department roll-ups and
//!   payback timelines for automation candidates
//! - [`analytics`]: duplicate detection and dependency analysis over the
//!   process pipeline
//! - [`rulebook`]: client for the published business rules endpoint
//!
//! Everything except the rulebook fetch is pure and synchronous.

pub mod analytics;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod io;
pub mod roi;
pub mod rulebook;
pub mod samples;

pub use crate::analytics::{
    analyze_dependency_impact, build_dependency_graph, calculate_process_similarity,
    detect_circular_dependencies, find_duplicates, CycleStatus, DependencyCycle, DependencyGraph,
    DependencyMatcher, DependencyNode, DuplicateDetector, DuplicateMatch, FuzzyNameMatcher,
    IdMatcher, ImpactAnalysis, IndirectDependencies, Process, ProcessStatus,
};
pub use crate::config::{MatcherKind, RpaInsightsConfig};
pub use crate::errors::{Error, Result, RoiError};
pub use crate::roi::{
    analyze_payback, assess_risk, build_risk_profile, calculate_department_roi, calculate_irr,
    calculate_roi_metrics, DepartmentRoi, RiskFactor, RiskLevel, RoiCalculation, RoiMetrics,
};
pub use crate::rulebook::{parse_rulebook_payload, Rule, RuleFilter, RulebookClient};
pub use crate::samples::{sample_processes, sample_roi_calculations};
