//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - acquires and decodes the dataset
//! - runs normalization + the metrics engine
//! - prints reports or hands off to the TUI
//! - writes demo datasets on request

use clap::Parser;

use crate::cli::{Command, LoadArgs, SampleArgs, ShowArgs};
use crate::data::DataClient;
use crate::domain::LoadConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `gdash` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `gdash` and `gdash somefile.csv` to behave like
    // `gdash tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the dashboard-first UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Tui(args) => handle_tui(args),
        Command::Sample(args) => handle_sample(args),
    }
}

pub fn load_config_from_args(args: &LoadArgs) -> LoadConfig {
    LoadConfig {
        file: args.file.clone(),
        format: args.format.to_format(),
    }
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let client = DataClient::from_env()?;
    let config = load_config_from_args(&args.load);
    let run = pipeline::run_load(&config, &client)?;

    if args.json {
        let json = serde_json::to_string_pretty(&run.report)
            .map_err(|e| AppError::runtime(format!("Failed to serialize report: {e}")))?;
        println!("{json}");
    } else {
        println!(
            "{}",
            crate::report::format_report(&run.report, &run.source, run.rows)
        );
    }

    Ok(())
}

fn handle_tui(args: LoadArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let anchor = crate::data::current_period();
    let rows = crate::data::write_sample_csv(&args.out, anchor, args.months, args.seed)?;
    println!(
        "Wrote {rows} rows ending at {} to '{}'.",
        anchor.label(),
        args.out.display()
    );
    Ok(())
}

/// Rewrite argv so `gdash` defaults to `gdash tui`.
///
/// Rules:
/// - `gdash`                     -> `gdash tui`
/// - `gdash data.csv ...`        -> `gdash tui data.csv ...`
/// - `gdash --format csv ...`    -> `gdash tui --format csv ...`
/// - `gdash --help/--version`    -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "tui" | "sample");
    if is_subcommand {
        return argv;
    }

    // A flag or a dataset path: treat the rest as TUI arguments.
    argv.insert(1, "tui".to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(args(&["gdash"])), args(&["gdash", "tui"]));
    }

    #[test]
    fn dataset_path_routes_to_tui() {
        assert_eq!(
            rewrite_args(args(&["gdash", "data.csv"])),
            args(&["gdash", "tui", "data.csv"])
        );
        assert_eq!(
            rewrite_args(args(&["gdash", "--format", "csv", "rows.dat"])),
            args(&["gdash", "tui", "--format", "csv", "rows.dat"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args(&["gdash", "show", "data.csv"])),
            args(&["gdash", "show", "data.csv"])
        );
        assert_eq!(rewrite_args(args(&["gdash", "--help"])), args(&["gdash", "--help"]));
        assert_eq!(
            rewrite_args(args(&["gdash", "sample", "--months", "12"])),
            args(&["gdash", "sample", "--months", "12"])
        );
    }
}
