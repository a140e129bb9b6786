//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the metrics engine
//! - exported to JSON for downstream consumers
//! - rendered by either the CLI or the TUI front-end

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Input file format for a manually supplied dataset.
///
/// `Auto` means: resolve from the file extension (`.csv`, `.xlsx`/`.xls`,
/// `.json`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FormatArg {
    Auto,
    Csv,
    Sheet,
    Json,
}

/// Concrete format actually used after resolving `FormatArg::Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    Sheet,
    Json,
}

impl FormatArg {
    pub fn to_format(self) -> Option<SourceFormat> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Csv => Some(SourceFormat::Csv),
            FormatArg::Sheet => Some(SourceFormat::Sheet),
            FormatArg::Json => Some(SourceFormat::Json),
        }
    }
}

impl SourceFormat {
    /// Resolve a format from a file extension, if recognized.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(SourceFormat::Csv),
            "xlsx" | "xls" => Some(SourceFormat::Sheet),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Sheet => "sheet",
            SourceFormat::Json => "json",
        }
    }
}

/// A raw decoded field value, before normalization.
///
/// The three decoders produce different shapes (CSV yields text, workbooks
/// yield typed cells, JSON yields either), so the normalizer accepts all of
/// them through this one type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Empty,
}

/// One decoded row: field name (normalized header) to value.
pub type RawRow = HashMap<String, FieldValue>;

/// One canonical reporting-period row.
///
/// Every financial field defaults to 0 when the raw value is missing or
/// non-numeric; normalization never drops a row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub year: i32,
    pub month: u32,
    pub gains: f64,
    pub losses: f64,
    pub plan: f64,
}

/// A reporting period `(year, month)` ordered year-first.
///
/// `(0, 0)` is the sentinel for "no data" (the scan over an empty dataset
/// never advances past the initial value) and must not be read as a real
/// period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn is_empty(self) -> bool {
        self.year == 0 && self.month == 0
    }

    /// `YYYY-MM` label for headers and status lines.
    pub fn label(self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// Sums over one filtered window of the dataset.
///
/// An empty window sums to zero on every field; there is no "missing"
/// state to propagate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowTotals {
    pub gains: f64,
    pub losses: f64,
    pub plan: f64,
}

/// The computed gains/losses/plan/net/variance bundle for one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricGroup {
    pub gains: f64,
    pub losses: f64,
    pub plan: f64,
    pub net: f64,
    pub vs_plan: f64,
    pub vs_plan_pct: f64,
    pub vs_prior: f64,
    pub vs_prior_pct: f64,
}

impl MetricGroup {
    pub const ZERO: MetricGroup = MetricGroup {
        gains: 0.0,
        losses: 0.0,
        plan: 0.0,
        net: 0.0,
        vs_plan: 0.0,
        vs_plan_pct: 0.0,
        vs_prior: 0.0,
        vs_prior_pct: 0.0,
    };
}

/// Full output of one metrics-engine invocation.
///
/// The Overview presentation is the pairing of `ytd` and `monthly`; it is
/// deliberately not a third computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub latest: Period,
    pub ytd: MetricGroup,
    pub monthly: MetricGroup,
}

/// A full run's input configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Manually supplied dataset file. `None` means "use the default source".
    pub file: Option<PathBuf>,
    /// Explicit format override; `None` resolves from the extension.
    pub format: Option<SourceFormat>,
}

impl LoadConfig {
    pub fn default_source() -> Self {
        Self {
            file: None,
            format: None,
        }
    }

    pub fn for_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
            format: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("data/dashboard_data.csv")),
            Some(SourceFormat::Csv)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("book.XLSX")),
            Some(SourceFormat::Sheet)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("old.xls")),
            Some(SourceFormat::Sheet)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("rows.json")),
            Some(SourceFormat::Json)
        );
        assert_eq!(SourceFormat::from_path(Path::new("notes.txt")), None);
        assert_eq!(SourceFormat::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn period_ordering_is_year_first() {
        assert!(Period::new(2024, 1) > Period::new(2023, 12));
        assert!(Period::new(2023, 12) > Period::new(2023, 11));
        assert!(Period::new(0, 0).is_empty());
        assert!(!Period::new(2023, 1).is_empty());
    }

    #[test]
    fn period_label_pads_month() {
        assert_eq!(Period::new(2024, 3).label(), "2024-03");
        assert_eq!(Period::new(2023, 12).label(), "2023-12");
    }
}
