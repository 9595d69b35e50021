use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rpa-insights")]
#[command(
    about = "ROI, risk and dependency analytics for an automation portfolio",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Configuration file (defaults to the nearest .rpa-insights.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input and output options shared by every analysis command
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// JSON array of records (defaults to the bundled sample portfolio)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output format (defaults to the configured format, then terminal)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Financial metrics for every ROI calculation
    Roi {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Risk factors and risk profiles
    Risk {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Investment, savings and ROI rolled up per department
    Departments {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Payback timelines and portfolio summary
    Payback {
        #[command(flatten)]
        report: ReportArgs,

        /// Timeline length in months, 1 to 600 (defaults to the configured horizon)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=600))]
        months: Option<u32>,
    },

    /// Pairs of processes that look like duplicate requests
    Duplicates {
        #[command(flatten)]
        report: ReportArgs,

        /// Minimum similarity, 0.0 to 1.0 (defaults to the configured threshold)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Dependency graph with levels and layout
    Graph {
        #[command(flatten)]
        report: ReportArgs,

        /// How dependency names are resolved to processes
        #[arg(long, value_enum)]
        matcher: Option<Matcher>,
    },

    /// Circular dependencies between processes
    Cycles {
        #[command(flatten)]
        report: ReportArgs,

        #[arg(long, value_enum)]
        matcher: Option<Matcher>,
    },

    /// Dependencies, dependents and impact score of one process
    Impact {
        /// Process id, e.g. P001
        process_id: String,

        #[command(flatten)]
        report: ReportArgs,

        #[arg(long, value_enum)]
        matcher: Option<Matcher>,
    },

    /// Fetch and filter the published rulebook
    Rules {
        /// Rulebook endpoint (defaults to the configured URL)
        #[arg(long)]
        url: Option<String>,

        /// Case-insensitive search over rule text and process name
        #[arg(short, long)]
        query: Option<String>,

        #[arg(long)]
        stage: Option<String>,

        #[arg(long)]
        status: Option<String>,

        /// Exact process name
        #[arg(long = "process")]
        process_name: Option<String>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a default .rpa-insights.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Matcher {
    /// Substring of a process title or tag
    Fuzzy,
    /// Exact process id
    Id,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

impl From<Matcher> for crate::config::MatcherKind {
    fn from(m: Matcher) -> Self {
        match m {
            Matcher::Fuzzy => crate::config::MatcherKind::Fuzzy,
            Matcher::Id => crate::config::MatcherKind::Id,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
