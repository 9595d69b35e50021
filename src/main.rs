use anyhow::Result;
use rpa_insights::cli::{self, Cli, Commands};
use rpa_insights::commands::{self, RulesOptions};
use rpa_insights::config::{load_config, load_config_from, RpaInsightsConfig};
use rpa_insights::rulebook::RuleFilter;

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<RpaInsightsConfig> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };
    if config.output.use_color == Some(false) {
        colored::control::set_override(false);
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = cli::parse_args();
    init_logging(cli.verbosity);
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Roi { report } => commands::handle_roi(report, &config),
        Commands::Risk { report } => commands::handle_risk(report, &config),
        Commands::Departments { report } => commands::handle_departments(report, &config),
        Commands::Payback { report, months } => commands::handle_payback(report, months, &config),
        Commands::Duplicates { report, threshold } => {
            commands::handle_duplicates(report, threshold, &config)
        }
        Commands::Graph { report, matcher } => commands::handle_graph(report, matcher, &config),
        Commands::Cycles { report, matcher } => commands::handle_cycles(report, matcher, &config),
        Commands::Impact {
            process_id,
            report,
            matcher,
        } => commands::handle_impact(&process_id, report, matcher, &config),
        Commands::Rules {
            url,
            query,
            stage,
            status,
            process_name,
            format,
            output,
        } => {
            let options = RulesOptions {
                url,
                filter: RuleFilter {
                    query,
                    stage,
                    status,
                    process_name,
                },
                format,
                output,
            };
            commands::handle_rules(options, &config)
        }
        Commands::Init { force } => commands::init_config(force),
    }
}
