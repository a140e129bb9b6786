//! Row normalization: raw decoded rows → canonical records.
//!
//! Normalization is total and side-effect-free: every input row produces
//! exactly one `Record`, in order, and every missing or non-numeric field
//! coerces to 0. Bad data can only ever contribute zero to an aggregate;
//! it can never drop a row or raise.

use crate::domain::{FieldValue, RawRow, Record};

/// Convert decoded rows into canonical records, same length and order.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<Record> {
    rows.iter().map(normalize_row).collect()
}

fn normalize_row(row: &RawRow) -> Record {
    Record {
        year: numeric_field(row, "year") as i32,
        month: numeric_field(row, "month") as u32,
        gains: numeric_field(row, "gains"),
        losses: numeric_field(row, "losses"),
        plan: numeric_field(row, "plan"),
    }
}

/// Coerce one field to a finite number, defaulting to 0.
fn numeric_field(row: &RawRow, name: &str) -> f64 {
    let value = match row.get(name) {
        Some(v) => v,
        None => return 0.0,
    };

    let parsed = match value {
        FieldValue::Number(v) => Some(*v),
        FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
        FieldValue::Empty => None,
    };

    // Non-finite values (a literal "NaN"/"inf" in the input) would poison
    // every sum they touch; they coerce to 0 like any other invalid field.
    match parsed {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[(&str, FieldValue)]) -> RawRow {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn normalizes_text_and_numeric_values() {
        let rows = vec![row(&[
            ("year", FieldValue::Text("2024".to_string())),
            ("month", FieldValue::Number(2.0)),
            ("gains", FieldValue::Text(" 50.5 ".to_string())),
            ("losses", FieldValue::Number(10.0)),
            ("plan", FieldValue::Text("40".to_string())),
        ])];

        let records = normalize_rows(&rows);
        assert_eq!(records.len(), 1);
        let r = records[0];
        assert_eq!(r.year, 2024);
        assert_eq!(r.month, 2);
        assert_eq!(r.gains, 50.5);
        assert_eq!(r.losses, 10.0);
        assert_eq!(r.plan, 40.0);
    }

    #[test]
    fn non_numeric_gains_coerce_to_zero_without_dropping_the_row() {
        let rows = vec![
            row(&[
                ("year", FieldValue::Text("2024".to_string())),
                ("month", FieldValue::Text("1".to_string())),
                ("gains", FieldValue::Text("N/A".to_string())),
            ]),
            row(&[
                ("year", FieldValue::Text("2024".to_string())),
                ("month", FieldValue::Text("2".to_string())),
                ("gains", FieldValue::Text("7".to_string())),
            ]),
        ];

        let records = normalize_rows(&rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].gains, 0.0);
        assert_eq!(records[1].gains, 7.0);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let records = normalize_rows(&[row(&[("gains", FieldValue::Number(12.0))])]);
        let r = records[0];
        assert_eq!(r.year, 0);
        assert_eq!(r.month, 0);
        assert_eq!(r.losses, 0.0);
        assert_eq!(r.plan, 0.0);
        assert_eq!(r.gains, 12.0);
    }

    #[test]
    fn non_finite_text_coerces_to_zero() {
        let records = normalize_rows(&[row(&[
            ("gains", FieldValue::Text("NaN".to_string())),
            ("losses", FieldValue::Text("inf".to_string())),
        ])]);
        assert_eq!(records[0].gains, 0.0);
        assert_eq!(records[0].losses, 0.0);
    }

    #[test]
    fn order_is_preserved() {
        let rows: Vec<RawRow> = (1..=4)
            .map(|m| row(&[("month", FieldValue::Number(m as f64))]))
            .collect();
        let records = normalize_rows(&rows);
        let months: Vec<u32> = records.iter().map(|r| r.month).collect();
        assert_eq!(months, vec![1, 2, 3, 4]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(normalize_rows(&[]).is_empty());
    }
}
