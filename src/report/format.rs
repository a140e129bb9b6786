//! Formatted text output for the three metric sections.
//!
//! Formatting here is presentation policy, not core output: grouping
//! separators for amounts, one decimal place for percentages. The sign of
//! a variance decides its styling in the TUI; the text renderer prints the
//! number as-is.

use crate::domain::{MetricGroup, MetricsReport};

/// Format an amount with digit grouping.
///
/// Values are rounded to two decimals; the fractional part is shown only
/// when it is non-zero after rounding.
pub fn format_amount(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let int_part = abs.trunc() as i64;
    let cents = ((abs - int_part as f64) * 100.0).round() as i64;

    let mut out = group_digits(int_part);
    if cents > 0 {
        out.push_str(&format!(".{cents:02}"));
    }
    if negative {
        out.insert(0, '-');
    }
    out
}

/// Format a percentage to one decimal place.
pub fn format_percent(v: f64) -> String {
    format!("{v:.1}%")
}

fn group_digits(mut v: i64) -> String {
    if v == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while v > 0 {
        groups.push((v % 1000) as u16);
        v /= 1000;
    }
    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(g) = groups.pop() {
        out.push_str(&format!(",{g:03}"));
    }
    out
}

/// "Total Gains: x | Total Plan: y | Net Gains: z" (year windows).
pub fn totals_line_ytd(g: &MetricGroup) -> String {
    format!(
        "Total Gains: {} | Total Plan: {} | Net Gains: {}",
        format_amount(g.gains),
        format_amount(g.plan),
        format_amount(g.net),
    )
}

/// "Gains: x | Plan: y | Losses: z | Net: w" (single-month windows).
pub fn totals_line_month(g: &MetricGroup) -> String {
    format!(
        "Gains: {} | Plan: {} | Losses: {} | Net: {}",
        format_amount(g.gains),
        format_amount(g.plan),
        format_amount(g.losses),
        format_amount(g.net),
    )
}

/// "x (y%)" for the plan variance.
pub fn variance_vs_plan(g: &MetricGroup) -> String {
    format!(
        "{} ({})",
        format_amount(g.vs_plan),
        format_percent(g.vs_plan_pct)
    )
}

/// "x (y%)" for the prior-year variance.
pub fn variance_vs_prior(g: &MetricGroup) -> String {
    format!(
        "{} ({})",
        format_amount(g.vs_prior),
        format_percent(g.vs_prior_pct)
    )
}

fn push_group(out: &mut String, g: &MetricGroup, totals_line: String) {
    out.push_str(&totals_line);
    out.push('\n');
    out.push_str(&format!("vs Plan: {}\n", variance_vs_plan(g)));
    out.push_str(&format!("vs Prior Year: {}\n", variance_vs_prior(g)));
}

/// The Overview section: the YTD and Monthly groups side by side.
///
/// This is a pairing of the two already-computed groups; nothing is
/// recomputed here.
pub fn format_overview(report: &MetricsReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Year-to-Date ({})\n", report.latest.year));
    push_group(&mut out, &report.ytd, totals_line_ytd(&report.ytd));
    out.push('\n');
    out.push_str(&format!("Current Month ({})\n", report.latest.label()));
    push_group(&mut out, &report.monthly, totals_line_month(&report.monthly));
    out
}

/// The Monthly section: latest-month details.
pub fn format_monthly(report: &MetricsReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Performance for {}\n", report.latest.label()));
    push_group(&mut out, &report.monthly, totals_line_month(&report.monthly));
    out
}

/// The Year-to-Date section: latest-year aggregates.
pub fn format_ytd(report: &MetricsReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Year {} Performance\n", report.latest.year));
    push_group(&mut out, &report.ytd, totals_line_ytd(&report.ytd));
    out
}

/// Full plain-text report for `gdash show`.
pub fn format_report(report: &MetricsReport, source: &str, rows: usize) -> String {
    let mut out = String::new();
    out.push_str("=== gdash - Portfolio Gains Dashboard ===\n");
    out.push_str(&format!("Source: {source} ({rows} rows)\n"));
    if report.latest.is_empty() {
        out.push_str("No periods present in the dataset.\n");
        return out;
    }
    out.push_str(&format!("Latest period: {}\n\n", report.latest.label()));

    out.push_str("--- Overview ---\n");
    out.push_str(&format_overview(report));
    out.push('\n');
    out.push_str("--- Monthly ---\n");
    out.push_str(&format_monthly(report));
    out.push('\n');
    out.push_str("--- Year-to-Date ---\n");
    out.push_str(&format_ytd(report));
    out
}
