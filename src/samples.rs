//! Bundled portfolio used when no input file is given

use crate::analytics::Process;
use crate::config::RoiConfig;
use crate::errors::{Result, ResultExt};
use crate::roi::{attach_metrics, RoiCalculation};

const SAMPLE_ROI_CALCULATIONS: &str = include_str!("../data/sample_roi_calculations.json");
const SAMPLE_PROCESSES: &str = include_str!("../data/sample_processes.json");

/// The five bundled ROI calculations with metrics attached under `config`
pub fn sample_roi_calculations_with(config: &RoiConfig) -> Result<Vec<RoiCalculation>> {
    let mut calculations: Vec<RoiCalculation> = serde_json::from_str(SAMPLE_ROI_CALCULATIONS)
        .map_err(crate::errors::Error::from)
        .context("bundled ROI calculations")?;
    attach_metrics(&mut calculations, config);
    Ok(calculations)
}

pub fn sample_roi_calculations() -> Result<Vec<RoiCalculation>> {
    sample_roi_calculations_with(&RoiConfig::default())
}

/// The Center of Excellence pipeline, P001 to P006
pub fn sample_processes() -> Result<Vec<Process>> {
    serde_json::from_str(SAMPLE_PROCESSES)
        .map_err(crate::errors::Error::from)
        .context("bundled processes")
}
