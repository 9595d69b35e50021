//! Format-neutral tables for each report kind.
//!
//! Markdown and terminal writers render the same sections; only the
//! decoration differs.

use super::format_currency;
use crate::analytics::{CycleStatus, DuplicateMatch, ImpactAnalysis, IndirectDependencies};
use crate::io::output::{ReportBody, RoiEntry};
use crate::roi::{OverallRiskLevel, PaybackStatus, RiskLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tone {
    Plain,
    Good,
    Warn,
    Bad,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Plain,
        }
    }

    fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Section {
    pub heading: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
    /// Free-text lines printed after the table
    pub notes: Vec<String>,
}

impl Section {
    fn new(heading: impl Into<String>, headers: Vec<&'static str>) -> Self {
        Self {
            heading: heading.into(),
            headers,
            ..Self::default()
        }
    }

    fn notes(heading: impl Into<String>, notes: Vec<String>) -> Self {
        Self {
            heading: heading.into(),
            notes,
            ..Self::default()
        }
    }
}

fn risk_tone(level: RiskLevel) -> Tone {
    match level {
        RiskLevel::Low => Tone::Good,
        RiskLevel::Medium => Tone::Warn,
        RiskLevel::High => Tone::Bad,
    }
}

fn overall_tone(level: OverallRiskLevel) -> Tone {
    match level {
        OverallRiskLevel::Low => Tone::Good,
        OverallRiskLevel::Medium => Tone::Warn,
        OverallRiskLevel::High | OverallRiskLevel::Critical => Tone::Bad,
    }
}

fn signed_tone(value: f64) -> Tone {
    if value >= 0.0 {
        Tone::Good
    } else {
        Tone::Bad
    }
}

fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

pub(crate) fn sections(body: &ReportBody<'_>) -> Vec<Section> {
    match body {
        ReportBody::Roi(entries) => vec![roi_section(entries)],
        ReportBody::Risk {
            profiles,
            distribution,
        } => {
            let mut table = Section::new(
                "Risk Profiles",
                vec!["Process", "Department", "Score", "Level", "Complexity", "Investment"],
            );
            table.rows = profiles
                .iter()
                .map(|p| {
                    vec![
                        Cell::plain(&p.process_name),
                        Cell::plain(&p.department),
                        Cell::plain(p.overall_risk_score.to_string()),
                        Cell::toned(p.risk_level.to_string(), overall_tone(p.risk_level)),
                        Cell::plain(p.complexity.to_string()),
                        Cell::plain(format_currency(p.investment_size)),
                    ]
                })
                .collect();
            table.notes.push(format!(
                "Distribution: {} low, {} medium, {} high, {} critical",
                distribution.low, distribution.medium, distribution.high, distribution.critical
            ));

            let mut factors = Section::new(
                "Risk Factors",
                vec!["Process", "Category", "Impact", "Probability", "Score", "Mitigation"],
            );
            factors.rows = profiles
                .iter()
                .flat_map(|p| {
                    p.risk_factors.iter().map(move |f| {
                        vec![
                            Cell::plain(&p.process_name),
                            Cell::plain(&f.category),
                            Cell::toned(f.impact.to_string(), risk_tone(f.impact)),
                            Cell::toned(f.probability.to_string(), risk_tone(f.probability)),
                            Cell::plain(f.score.to_string()),
                            Cell::plain(&f.mitigation),
                        ]
                    })
                })
                .collect();

            let recommendations = Section::notes(
                "Recommendations",
                profiles
                    .iter()
                    .flat_map(|p| {
                        p.recommendations
                            .iter()
                            .map(move |r| format!("{}: {}", p.process_name, r))
                    })
                    .collect(),
            );

            vec![table, factors, recommendations]
        }
        ReportBody::Departments(departments) => {
            let mut table = Section::new(
                "Department ROI",
                vec![
                    "Department",
                    "Processes",
                    "Investment",
                    "Annual Savings",
                    "ROI",
                    "Avg Payback (months)",
                    "Risk",
                ],
            );
            table.rows = departments
                .iter()
                .map(|d| {
                    vec![
                        Cell::plain(&d.department),
                        Cell::plain(d.process_count.to_string()),
                        Cell::plain(format_currency(d.total_investment)),
                        Cell::plain(format_currency(d.total_savings)),
                        Cell::toned(percent(d.roi), signed_tone(d.roi)),
                        Cell::plain(format!("{:.1}", d.average_payback)),
                        Cell::toned(d.risk_level.to_string(), risk_tone(d.risk_level)),
                    ]
                })
                .collect();
            vec![table]
        }
        ReportBody::Payback { analyses, summary } => {
            let mut table = Section::new(
                "Payback Analysis",
                vec![
                    "Process",
                    "Investment",
                    "Annual Savings",
                    "Payback (months)",
                    "Break-even Month",
                    "NPV",
                    "IRR",
                    "Status",
                ],
            );
            table.rows = analyses
                .iter()
                .map(|a| {
                    let tone = match a.status {
                        PaybackStatus::Excellent | PaybackStatus::Good => Tone::Good,
                        PaybackStatus::Fair => Tone::Warn,
                        PaybackStatus::Poor => Tone::Bad,
                    };
                    vec![
                        Cell::plain(&a.process_name),
                        Cell::plain(format_currency(a.investment_cost)),
                        Cell::plain(format_currency(a.annual_savings)),
                        Cell::plain(format!("{:.1}", a.payback_period)),
                        Cell::plain(
                            a.break_even_month
                                .map_or_else(|| "beyond horizon".to_string(), |m| m.to_string()),
                        ),
                        Cell::toned(format_currency(a.npv), signed_tone(a.npv)),
                        Cell::plain(percent(a.irr)),
                        Cell::toned(a.status.to_string(), tone),
                    ]
                })
                .collect();
            if let Some(s) = summary {
                table.notes = vec![
                    format!("Average payback: {:.1} months", s.average_payback),
                    format!("Total investment: {}", format_currency(s.total_investment)),
                    format!(
                        "Total annual savings: {}",
                        format_currency(s.total_annual_savings)
                    ),
                    format!("Average NPV: {}", format_currency(s.average_npv)),
                    format!("Average IRR: {}", percent(s.average_irr)),
                ];
            }
            vec![table]
        }
        ReportBody::Duplicates { threshold, matches } => vec![duplicates_section(*threshold, matches)],
        ReportBody::Graph(graph) => {
            let mut table = Section::new(
                "Dependency Graph",
                vec!["Level", "Process", "Title", "Status", "Depends On", "Dependents", "Cycle"],
            );
            table.rows = graph
                .nodes
                .iter()
                .map(|n| {
                    let cycle = match n.cycle_status {
                        CycleStatus::Acyclic => Cell::plain("-"),
                        CycleStatus::InCycle => Cell::toned("in cycle", Tone::Bad),
                        CycleStatus::DependsOnCycle => Cell::toned("downstream", Tone::Warn),
                    };
                    vec![
                        Cell::plain(n.level.to_string()),
                        Cell::plain(&n.id),
                        Cell::plain(&n.title),
                        Cell::plain(n.status.to_string()),
                        Cell::plain(n.dependencies.join(", ")),
                        Cell::plain(n.dependents.join(", ")),
                        cycle,
                    ]
                })
                .collect();
            table.notes.push(format!(
                "{} processes, {} edges, {} levels",
                graph.nodes.len(),
                graph.edges.len(),
                graph.max_level()
            ));
            vec![table]
        }
        ReportBody::Cycles(cycles) => {
            let notes = if cycles.is_empty() {
                vec!["No circular dependencies found".to_string()]
            } else {
                cycles.iter().map(|c| c.cycle.join(" -> ")).collect()
            };
            vec![Section::notes("Circular Dependencies", notes)]
        }
        ReportBody::Impact(impact) => impact_sections(impact),
        ReportBody::Rules(rules) => {
            let mut table = Section::new(
                "Rules",
                vec!["ID", "Version", "Status", "Stage", "Process", "Subject", "Rule"],
            );
            table.rows = rules
                .iter()
                .map(|r| {
                    let tone = if r.rule_status.eq_ignore_ascii_case("active") {
                        Tone::Good
                    } else {
                        Tone::Plain
                    };
                    vec![
                        Cell::plain(&r.rule_id),
                        Cell::plain(&r.rule_version),
                        Cell::toned(&r.rule_status, tone),
                        Cell::plain(&r.rule_stage),
                        Cell::plain(&r.rule_process_name),
                        Cell::plain(&r.rule_subject),
                        Cell::plain(&r.rule),
                    ]
                })
                .collect();
            table.notes.push(format!("{} rules", rules.len()));
            vec![table]
        }
    }
}

fn roi_section(entries: &[RoiEntry]) -> Section {
    let mut table = Section::new(
        "ROI Metrics",
        vec![
            "Process",
            "Department",
            "Annual Savings",
            "Investment",
            "ROI",
            "Payback (months)",
            "NPV",
            "IRR",
            "Risk",
        ],
    );
    for entry in entries {
        match (&entry.metrics, &entry.error) {
            (Some(m), _) => table.rows.push(vec![
                Cell::plain(&entry.process_name),
                Cell::plain(&entry.department),
                Cell::plain(format_currency(m.annual_cost_savings)),
                Cell::plain(format_currency(m.implementation_cost)),
                Cell::toned(percent(m.roi_percentage), signed_tone(m.roi_percentage)),
                Cell::plain(format!("{:.1}", m.payback_period)),
                Cell::toned(format_currency(m.npv), signed_tone(m.npv)),
                Cell::plain(percent(m.irr)),
                Cell::plain(format!("{}/10", m.risk_score)),
            ]),
            (None, error) => table.notes.push(format!(
                "{} ({}): {}",
                entry.process_name,
                entry.id,
                error.as_deref().unwrap_or("metrics unavailable")
            )),
        }
    }
    table
}

fn duplicates_section(threshold: f64, matches: &[DuplicateMatch<'_>]) -> Section {
    let mut table = Section::new(
        format!("Potential Duplicates (threshold {threshold:.2})"),
        vec!["Process 1", "Process 2", "Similarity", "Reasons"],
    );
    table.rows = matches
        .iter()
        .map(|m| {
            let reasons: Vec<String> = m.reasons.iter().map(|r| r.to_string()).collect();
            vec![
                Cell::plain(format!("{} {}", m.process1.id, m.process1.title)),
                Cell::plain(format!("{} {}", m.process2.id, m.process2.title)),
                Cell::toned(format!("{:.0}%", m.similarity * 100.0), Tone::Warn),
                Cell::plain(reasons.join(", ")),
            ]
        })
        .collect();
    if matches.is_empty() {
        table.notes.push("No duplicates found".to_string());
    }
    table
}

fn impact_sections(impact: &ImpactAnalysis<'_>) -> Vec<Section> {
    let listed = |processes: &[&crate::analytics::Process]| -> Vec<String> {
        if processes.is_empty() {
            vec!["(none)".to_string()]
        } else {
            processes
                .iter()
                .map(|p| format!("{} {}", p.id, p.title))
                .collect()
        }
    };
    let indirect = match impact.indirect_dependencies {
        IndirectDependencies::NotComputed => "not computed",
    };

    vec![
        Section::notes(
            format!("Impact of {} {}", impact.process.id, impact.process.title),
            vec![
                format!("Impact score: {:.2}", impact.impact_score),
                format!("Indirect dependencies: {indirect}"),
            ],
        ),
        Section::notes("Direct Dependencies", listed(impact.direct_dependencies.as_slice())),
        Section::notes("Dependents", listed(impact.dependents.as_slice())),
    ]
}
