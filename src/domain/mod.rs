//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - canonical reporting-period records (`Record`, `Period`)
//! - computed metric outputs (`MetricGroup`, `MetricsReport`)
//! - input configuration (`SourceFormat`, `LoadConfig`)

pub mod types;

pub use types::*;
