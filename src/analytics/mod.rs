//! Process analytics: duplicate detection and dependency analysis over the
//! automation pipeline.
//!
//! Declared dependencies are free-text names, not ids. They are resolved to
//! processes through a [`DependencyMatcher`], so the same graph algorithms
//! work with the fuzzy title/tag heuristic or with exact id references.

pub mod graph;
pub mod impact;
pub mod matcher;
pub mod similarity;

use serde::{Deserialize, Serialize};

pub use graph::{
    build_dependency_graph, detect_circular_dependencies, CycleStatus, DependencyCycle,
    DependencyEdge, DependencyGraph, DependencyNode,
};
pub use impact::{analyze_dependency_impact, ImpactAnalysis, IndirectDependencies};
pub use matcher::{matcher_for, DependencyMatcher, FuzzyNameMatcher, IdMatcher};
pub use similarity::{
    calculate_process_similarity, find_duplicates, tag_similarity, text_similarity,
    DuplicateDetector, DuplicateMatch, DuplicateReason,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessStatus {
    Submitted,
    #[serde(rename = "Under Review")]
    UnderReview,
    #[serde(rename = "In Development")]
    InDevelopment,
    Deployed,
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProcessStatus::Submitted => "Submitted",
            ProcessStatus::UnderReview => "Under Review",
            ProcessStatus::InDevelopment => "In Development",
            ProcessStatus::Deployed => "Deployed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// An automation request in the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: String,
    pub title: String,
    pub description: String,
    pub department: String,
    pub priority: Priority,
    #[serde(rename = "expectedROI")]
    pub expected_roi: f64,
    pub status: ProcessStatus,
    pub submitted_by: String,
    pub submitted_date: String,
    pub estimated_savings: f64,
    pub complexity: Complexity,
    /// Free-text names of the systems or processes this one relies on
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}
