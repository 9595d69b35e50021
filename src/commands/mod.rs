//! CLI command implementations.
//!
//! Each handler loads its records (from `--input` or the bundled samples),
//! runs the library operation and hands a [`Report`] to the writer chosen by
//! `--format`.
//!
//! Available commands:
//! - **roi**, **risk**, **departments**, **payback**: ROI engine views
//! - **duplicates**, **graph**, **cycles**, **impact**: process analytics
//! - **rules**: rulebook fetch and filter
//! - **init**: write a default configuration file

pub mod analytics;
pub mod init;
pub mod roi;
pub mod rules;

pub use analytics::{handle_cycles, handle_duplicates, handle_graph, handle_impact};
pub use init::init_config;
pub use roi::{handle_departments, handle_payback, handle_risk, handle_roi};
pub use rules::{handle_rules, RulesOptions};

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::analytics::Process;
use crate::config::{OutputConfig, RpaInsightsConfig};
use crate::io::output::{create_writer, OutputFormat, Report};
use crate::roi::RoiCalculation;
use crate::{cli, io, samples};

/// Where and how a report is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub format: OutputFormat,
    pub path: Option<PathBuf>,
}

impl OutputTarget {
    /// CLI flag wins, then the configured default, then terminal
    pub fn resolve(
        format: Option<cli::OutputFormat>,
        path: Option<PathBuf>,
        config: &OutputConfig,
    ) -> Self {
        let format = format.map(OutputFormat::from).unwrap_or_else(|| {
            config
                .default_format
                .as_deref()
                .and_then(|name| match name.parse::<OutputFormat>() {
                    Ok(format) => Some(format),
                    Err(e) => {
                        log::warn!("Ignoring output.default_format: {}", e);
                        None
                    }
                })
                .unwrap_or(OutputFormat::Terminal)
        });
        Self { format, path }
    }
}

pub fn emit_report(report: &Report<'_>, target: &OutputTarget) -> Result<()> {
    let sink: Box<dyn Write> = match &target.path {
        Some(path) => {
            colored::control::set_override(false);
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(std::io::stdout()),
    };

    let mut writer = create_writer(target.format, sink);
    writer.write_report(report)?;

    if let Some(path) = &target.path {
        log::info!("Wrote {} report to {}", report.title, path.display());
    }
    Ok(())
}

pub fn load_calculations(
    input: Option<&Path>,
    config: &RpaInsightsConfig,
) -> Result<Vec<RoiCalculation>> {
    match input {
        Some(path) => Ok(io::load_json_records(path)?),
        None => {
            log::info!("No --input given, using the bundled ROI calculations");
            Ok(samples::sample_roi_calculations_with(&config.roi)?)
        }
    }
}

pub fn load_processes(input: Option<&Path>) -> Result<Vec<Process>> {
    match input {
        Some(path) => Ok(io::load_json_records(path)?),
        None => {
            log::info!("No --input given, using the bundled process pipeline");
            Ok(samples::sample_processes()?)
        }
    }
}
