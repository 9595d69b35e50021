use anyhow::{Context, Result};
use std::path::PathBuf;

use super::{emit_report, OutputTarget};
use crate::cli::OutputFormat;
use crate::config::RpaInsightsConfig;
use crate::io::output::{Report, ReportBody};
use crate::rulebook::{RuleFilter, RulebookClient};

#[derive(Debug, Clone, Default)]
pub struct RulesOptions {
    pub url: Option<String>,
    pub filter: RuleFilter,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
}

/// Fetch the rulebook on a single-threaded runtime and print the rules
/// that pass the filter
pub fn handle_rules(options: RulesOptions, config: &RpaInsightsConfig) -> Result<()> {
    let mut rulebook = config.rulebook.clone();
    if let Some(url) = options.url {
        rulebook.url = url;
    }
    let client = RulebookClient::new(&rulebook)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let rules = runtime
        .block_on(client.fetch_rules())
        .with_context(|| format!("Could not load rules from {}", client.url()))?;

    let selected = options.filter.apply(&rules);
    log::info!("{} of {} rules match the filter", selected.len(), rules.len());

    let report = Report::new("Rulebook", ReportBody::Rules(selected));
    let target = OutputTarget::resolve(options.format, options.output, &config.output);
    emit_report(&report, &target)
}
