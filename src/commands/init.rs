use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# rpa-insights configuration

[roi]
# Annual discount rate for NPV
discount_rate = 0.10
# Years of savings in the NPV and IRR cash flows
horizon_years = 5
# Newton-Raphson settings for IRR
irr_initial_rate = 0.1
irr_max_iterations = 100
irr_tolerance = 0.0001

[similarity]
duplicate_threshold = 0.6

[similarity.weights]
# Must sum to 1.0; normalized with a warning otherwise
title = 0.4
description = 0.3
tags = 0.2
department = 0.1

[dependencies]
# "fuzzy" matches names against titles and tags, "id" expects process ids
matcher = "fuzzy"

[rulebook]
url = "https://santova.onrender.com/rulebook/"
timeout_secs = 30

[output]
default_format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force).map(|_| ())
}

/// Write the default configuration into `dir`, returning the file path
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");

    Ok(config_path)
}
