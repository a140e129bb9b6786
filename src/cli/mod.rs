//! Command-line parsing for the gains dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the decoding/metrics code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::FormatArg;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gdash", version, about = "Portfolio gains dashboard (plan vs. actual vs. prior year)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a dataset, print the Overview/Monthly/YTD sections.
    Show(ShowArgs),
    /// Launch the interactive dashboard TUI.
    ///
    /// This uses the same load pipeline as `gdash show`, but renders the
    /// sections as tabs in a terminal UI using Ratatui.
    Tui(LoadArgs),
    /// Write a seeded demo dataset CSV in the shape of the real feed.
    Sample(SampleArgs),
}

/// Common dataset-loading options.
#[derive(Debug, Parser, Clone)]
pub struct LoadArgs {
    /// Dataset file (.csv, .xlsx/.xls, .json). Without it the default
    /// source is auto-loaded (data/dashboard_data.csv, or
    /// DASHBOARD_DATA_URL when set).
    pub file: Option<PathBuf>,

    /// Input format (auto resolves from the file extension).
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,
}

/// Options for `gdash show`.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Print the computed report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Options for `gdash sample`.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output path for the generated CSV.
    #[arg(long, default_value = "data/dashboard_data.csv")]
    pub out: PathBuf,

    /// Number of months to generate, ending at the current month.
    #[arg(long, default_value_t = 24, value_parser = clap::value_parser!(u32).range(1..=120))]
    pub months: u32,

    /// Random seed (same seed, same dataset).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}
