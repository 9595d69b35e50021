use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

use crate::analytics::{DependencyCycle, DependencyGraph, DuplicateMatch, ImpactAnalysis};
use crate::roi::{
    DepartmentRoi, PaybackAnalysis, PaybackSummary, RiskDistribution, RiskProfile, RoiMetrics,
};
use crate::rulebook::Rule;

pub use super::writers::JsonWriter;
use super::writers::{MarkdownWriter, TerminalWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "terminal" => Ok(OutputFormat::Terminal),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// Metrics for one calculation, or the reason they could not be derived
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiEntry {
    pub id: String,
    pub process_name: String,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<RoiMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ReportBody<'a> {
    Roi(Vec<RoiEntry>),
    Risk {
        profiles: Vec<RiskProfile>,
        distribution: RiskDistribution,
    },
    Departments(Vec<DepartmentRoi>),
    Payback {
        analyses: Vec<PaybackAnalysis>,
        summary: Option<PaybackSummary>,
    },
    Duplicates {
        threshold: f64,
        matches: Vec<DuplicateMatch<'a>>,
    },
    Graph(DependencyGraph),
    Cycles(Vec<DependencyCycle>),
    Impact(ImpactAnalysis<'a>),
    Rules(Vec<&'a Rule>),
}

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: ReportBody<'a>,
}

impl<'a> Report<'a> {
    pub fn new(title: impl Into<String>, body: ReportBody<'a>) -> Self {
        Self {
            title: title.into(),
            generated_at: Utc::now(),
            body,
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &Report<'_>) -> anyhow::Result<()>;
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
