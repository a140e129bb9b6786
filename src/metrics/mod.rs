//! The metrics engine: pure derivation of the dashboard's metric groups.
//!
//! Everything here is a stateless transform over a borrowed record slice:
//! same input, same output, no I/O, no error path. The guarantees the rest
//! of the app leans on:
//!
//! - an empty dataset yields the `(0, 0)` period and all-zero groups
//! - an empty window sums to zero, never to NaN
//! - percentage variances degrade to 0 when their denominator is 0

use crate::domain::{MetricGroup, MetricsReport, Period, Record, WindowTotals};

/// Find the maximum `(year, month)` present in the dataset.
///
/// The scan replaces the running maximum only on a strictly greater period,
/// so the first record achieving the maximum determines ties. An empty
/// dataset stays at `(0, 0)`.
pub fn latest_period(records: &[Record]) -> Period {
    let mut latest = Period::default();
    for r in records {
        if r.year > latest.year || (r.year == latest.year && r.month > latest.month) {
            latest = Period::new(r.year, r.month);
        }
    }
    latest
}

/// Sum `gains`, `losses`, and `plan` over the records matching `filter`.
fn window_totals(records: &[Record], filter: impl Fn(&Record) -> bool) -> WindowTotals {
    let mut totals = WindowTotals::default();
    for r in records.iter().filter(|r| filter(r)) {
        totals.gains += r.gains;
        totals.losses += r.losses;
        totals.plan += r.plan;
    }
    totals
}

/// Sum only `gains` over the comparison window.
fn prior_gains(records: &[Record], filter: impl Fn(&Record) -> bool) -> f64 {
    records
        .iter()
        .filter(|r| filter(r))
        .map(|r| r.gains)
        .sum()
}

/// Derive the full metric bundle from a window's totals and its
/// comparison-period gains.
fn derive_group(totals: WindowTotals, prior: f64) -> MetricGroup {
    let net = totals.gains - totals.losses;
    let vs_plan = totals.gains - totals.plan;
    let vs_plan_pct = if totals.plan != 0.0 {
        vs_plan / totals.plan * 100.0
    } else {
        0.0
    };
    let vs_prior = totals.gains - prior;
    let vs_prior_pct = if prior != 0.0 {
        vs_prior / prior * 100.0
    } else {
        0.0
    };

    MetricGroup {
        gains: totals.gains,
        losses: totals.losses,
        plan: totals.plan,
        net,
        vs_plan,
        vs_plan_pct,
        vs_prior,
        vs_prior_pct,
    }
}

/// Aggregate one window pair (current + comparison) into a metric group.
///
/// The four windows of the report are all instances of this one routine;
/// each call is an independent full scan of the dataset.
fn window_group(
    records: &[Record],
    current: impl Fn(&Record) -> bool,
    comparison: impl Fn(&Record) -> bool,
) -> MetricGroup {
    derive_group(
        window_totals(records, current),
        prior_gains(records, comparison),
    )
}

/// Compute the full report: latest period plus the YTD and Monthly groups.
///
/// The Overview presentation pairs the two groups as-is; no third
/// computation exists.
pub fn compute_metrics(records: &[Record]) -> MetricsReport {
    let latest = latest_period(records);
    let (year, month) = (latest.year, latest.month);

    let ytd = window_group(
        records,
        |r| r.year == year,
        |r| r.year == year - 1,
    );
    let monthly = window_group(
        records,
        |r| r.year == year && r.month == month,
        |r| r.year == year - 1 && r.month == month,
    );

    MetricsReport {
        latest,
        ytd,
        monthly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: i32, month: u32, gains: f64, losses: f64, plan: f64) -> Record {
        Record {
            year,
            month,
            gains,
            losses,
            plan,
        }
    }

    #[test]
    fn latest_period_is_maximum_under_year_then_month() {
        let records = vec![
            rec(2023, 5, 0.0, 0.0, 0.0),
            rec(2024, 1, 0.0, 0.0, 0.0),
            rec(2023, 12, 0.0, 0.0, 0.0),
            rec(2024, 1, 0.0, 0.0, 0.0),
        ];
        assert_eq!(latest_period(&records), Period::new(2024, 1));
    }

    #[test]
    fn latest_period_of_empty_dataset_is_sentinel() {
        assert_eq!(latest_period(&[]), Period::new(0, 0));
        assert!(latest_period(&[]).is_empty());
    }

    #[test]
    fn latest_period_ignores_equal_later_records() {
        // Non-strict comparison means the first maximum wins; unobservable
        // in the output, but pinned here so the scan order never drifts.
        let records = vec![rec(2024, 6, 1.0, 0.0, 0.0), rec(2024, 6, 2.0, 0.0, 0.0)];
        assert_eq!(latest_period(&records), Period::new(2024, 6));
    }

    #[test]
    fn empty_dataset_yields_all_zero_groups() {
        let report = compute_metrics(&[]);
        assert!(report.latest.is_empty());
        assert_eq!(report.ytd, MetricGroup::ZERO);
        assert_eq!(report.monthly, MetricGroup::ZERO);
    }

    #[test]
    fn single_row_dataset_scenario() {
        // One 2023-12 row: no prior year anywhere, so vs_prior carries the
        // full gains and the prior percentage degrades to 0.
        let records = vec![rec(2023, 12, 100.0, 20.0, 90.0)];
        let report = compute_metrics(&records);

        assert_eq!(report.latest, Period::new(2023, 12));
        let ytd = report.ytd;
        assert_eq!(ytd.gains, 100.0);
        assert_eq!(ytd.losses, 20.0);
        assert_eq!(ytd.plan, 90.0);
        assert_eq!(ytd.net, 80.0);
        assert_eq!(ytd.vs_plan, 10.0);
        assert!((ytd.vs_plan_pct - 100.0 / 9.0).abs() < 1e-9); // 11.1%
        assert_eq!(ytd.vs_prior, 100.0);
        assert_eq!(ytd.vs_prior_pct, 0.0);

        // With a single row the monthly window equals the YTD window.
        assert_eq!(report.monthly, report.ytd);
    }

    #[test]
    fn two_year_january_pair_scenario() {
        let records = vec![
            rec(2024, 1, 50.0, 10.0, 40.0),
            rec(2023, 1, 30.0, 5.0, 25.0),
        ];
        let report = compute_metrics(&records);

        assert_eq!(report.latest, Period::new(2024, 1));
        let monthly = report.monthly;
        assert_eq!(monthly.gains, 50.0);
        assert_eq!(monthly.plan, 40.0);
        assert_eq!(monthly.vs_plan, 10.0);
        assert!((monthly.vs_plan_pct - 25.0).abs() < 1e-9);
        assert_eq!(monthly.vs_prior, 20.0);
        assert!((monthly.vs_prior_pct - 2000.0 / 30.0).abs() < 1e-9); // 66.7%
    }

    #[test]
    fn ytd_sums_all_months_of_latest_year_only() {
        let records = vec![
            rec(2024, 1, 10.0, 1.0, 12.0),
            rec(2024, 2, 20.0, 2.0, 18.0),
            rec(2024, 2, 5.0, 0.5, 5.0), // second segment row for the same month
            rec(2023, 2, 8.0, 1.0, 9.0),
            rec(2022, 2, 100.0, 0.0, 0.0), // two years back: outside both windows
        ];
        let report = compute_metrics(&records);

        assert_eq!(report.latest, Period::new(2024, 2));
        assert_eq!(report.ytd.gains, 35.0);
        assert_eq!(report.ytd.losses, 3.5);
        assert_eq!(report.ytd.plan, 35.0);
        // YTD-prior is the whole of 2023, not just matched months.
        assert_eq!(report.ytd.vs_prior, 35.0 - 8.0);

        // Monthly window is 2024-02 only; its prior is 2023-02 only.
        assert_eq!(report.monthly.gains, 25.0);
        assert_eq!(report.monthly.vs_prior, 25.0 - 8.0);
    }

    #[test]
    fn zero_denominators_never_divide() {
        let records = vec![rec(2024, 3, 50.0, 10.0, 0.0)];
        let report = compute_metrics(&records);

        assert_eq!(report.ytd.vs_plan, 50.0);
        assert_eq!(report.ytd.vs_plan_pct, 0.0);
        assert_eq!(report.ytd.vs_prior_pct, 0.0);
        assert!(report.ytd.vs_plan_pct.is_finite());
    }

    #[test]
    fn exact_identities_hold() {
        let records = vec![
            rec(2024, 1, 123.45, 67.89, 100.0),
            rec(2024, 2, 10.0, 3.25, 11.5),
            rec(2023, 1, 77.0, 11.0, 70.0),
        ];
        let report = compute_metrics(&records);

        for group in [report.ytd, report.monthly] {
            assert_eq!(group.net, group.gains - group.losses);
            assert_eq!(group.vs_plan, group.gains - group.plan);
        }
    }

    #[test]
    fn recomputation_is_bit_identical() {
        let records = vec![
            rec(2024, 1, 50.0, 10.0, 40.0),
            rec(2023, 1, 30.0, 5.0, 25.0),
            rec(2023, 7, 12.5, 2.5, 10.0),
        ];
        let a = compute_metrics(&records);
        let b = compute_metrics(&records);
        assert_eq!(a, b);
    }

    #[test]
    fn record_order_does_not_matter() {
        let mut records = vec![
            rec(2024, 1, 50.0, 10.0, 40.0),
            rec(2023, 1, 30.0, 5.0, 25.0),
            rec(2023, 7, 12.5, 2.5, 10.0),
        ];
        let forward = compute_metrics(&records);
        records.reverse();
        let reversed = compute_metrics(&records);
        assert_eq!(forward, reversed);
    }
}
