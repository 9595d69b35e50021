use anyhow::{Context, Result};

use super::{emit_report, load_processes, OutputTarget};
use crate::analytics::{
    analyze_dependency_impact, build_dependency_graph, detect_circular_dependencies, matcher_for,
    DependencyMatcher, DuplicateDetector,
};
use crate::cli::{Matcher, ReportArgs};
use crate::config::RpaInsightsConfig;
use crate::io::output::{Report, ReportBody};

fn target(args: &ReportArgs, config: &RpaInsightsConfig) -> OutputTarget {
    OutputTarget::resolve(args.format, args.output.clone(), &config.output)
}

fn select_matcher(flag: Option<Matcher>, config: &RpaInsightsConfig) -> Box<dyn DependencyMatcher> {
    let kind = flag.map(Into::into).unwrap_or(config.dependencies.matcher);
    let matcher = matcher_for(kind);
    log::debug!("Resolving dependencies with the {} matcher", matcher.name());
    matcher
}

pub fn handle_duplicates(
    args: ReportArgs,
    threshold: Option<f64>,
    config: &RpaInsightsConfig,
) -> Result<()> {
    let threshold = threshold.unwrap_or(config.similarity.duplicate_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        anyhow::bail!("Threshold must be between 0.0 and 1.0, got {threshold}");
    }

    let processes = load_processes(args.input.as_deref())?;
    let matches = DuplicateDetector::new(&config.similarity)
        .with_threshold(threshold)
        .find(&processes);

    let report = Report::new(
        "Duplicate Detection",
        ReportBody::Duplicates { threshold, matches },
    );
    emit_report(&report, &target(&args, config))
}

pub fn handle_graph(
    args: ReportArgs,
    matcher: Option<Matcher>,
    config: &RpaInsightsConfig,
) -> Result<()> {
    let processes = load_processes(args.input.as_deref())?;
    let matcher = select_matcher(matcher, config);
    let graph = build_dependency_graph(&processes, matcher.as_ref());

    if graph.has_cycles() {
        log::warn!("Dependency graph contains cycles; run `cycles` for the paths");
    }

    let report = Report::new("Dependency Graph", ReportBody::Graph(graph));
    emit_report(&report, &target(&args, config))
}

pub fn handle_cycles(
    args: ReportArgs,
    matcher: Option<Matcher>,
    config: &RpaInsightsConfig,
) -> Result<()> {
    let processes = load_processes(args.input.as_deref())?;
    let matcher = select_matcher(matcher, config);
    let cycles = detect_circular_dependencies(&processes, matcher.as_ref());

    let report = Report::new("Circular Dependencies", ReportBody::Cycles(cycles));
    emit_report(&report, &target(&args, config))
}

pub fn handle_impact(
    process_id: &str,
    args: ReportArgs,
    matcher: Option<Matcher>,
    config: &RpaInsightsConfig,
) -> Result<()> {
    let processes = load_processes(args.input.as_deref())?;
    let matcher = select_matcher(matcher, config);
    let impact = analyze_dependency_impact(process_id, &processes, matcher.as_ref())
        .context("Impact analysis failed")?;

    let report = Report::new("Dependency Impact", ReportBody::Impact(impact));
    emit_report(&report, &target(&args, config))
}
