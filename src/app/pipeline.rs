//! Shared load pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! acquire -> decode -> normalize -> compute metrics
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).
//! The compute step runs only after the full dataset is available; every
//! load recomputes from scratch.

use crate::data::DataClient;
use crate::domain::{LoadConfig, MetricsReport, Record};
use crate::error::AppError;
use crate::io::{decode_csv, decode_path, normalize_rows};
use crate::metrics::compute_metrics;

/// All computed outputs of a single dataset load.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub records: Vec<Record>,
    pub report: MetricsReport,
    /// Where the dataset came from (path or URL), for status lines.
    pub source: String,
    pub rows: usize,
}

/// Acquire and normalize a dataset per the config.
///
/// A manual file goes through extension-based format dispatch; the default
/// source is always CSV text.
pub fn load_records(
    config: &LoadConfig,
    client: &DataClient,
) -> Result<(Vec<Record>, String), AppError> {
    let (raw, source) = match &config.file {
        Some(path) => (
            decode_path(path, config.format)?,
            path.display().to_string(),
        ),
        None => {
            let fetched = client.fetch_default()?;
            (decode_csv(&fetched.text)?, fetched.source)
        }
    };

    Ok((normalize_rows(&raw), source))
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_load(config: &LoadConfig, client: &DataClient) -> Result<RunOutput, AppError> {
    let (records, source) = load_records(config, client)?;
    let report = compute_metrics(&records);

    Ok(RunOutput {
        rows: records.len(),
        records,
        report,
        source,
    })
}
