//! Format-specific decoding.
//!
//! This module turns raw dataset content into an ordered sequence of
//! `RawRow` mappings (the one shape the normalizer accepts) from any of
//! the three supported formats:
//!
//! - delimited text (CSV, first line is the header)
//! - spreadsheet (first sheet only, first row is the header)
//! - structured document (a JSON array of row objects)
//!
//! Design goals:
//! - **Uniform output shape** so the normalizer stays format-agnostic
//! - **Decode errors stop at this boundary** (exit code 2); nothing past
//!   decoding can fail
//! - **Unknown columns pass through** untouched and are ignored downstream

use std::fs;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use csv::StringRecord;

use crate::domain::{FieldValue, RawRow, SourceFormat};
use crate::error::AppError;

/// Decode a dataset file, resolving the format from the extension unless
/// an explicit override is given.
pub fn decode_path(path: &Path, format: Option<SourceFormat>) -> Result<Vec<RawRow>, AppError> {
    let format = match format.or_else(|| SourceFormat::from_path(path)) {
        Some(f) => f,
        None => {
            return Err(AppError::decode(format!(
                "Unrecognized file format for '{}'. Expected .csv, .xlsx/.xls, or .json.",
                path.display()
            )));
        }
    };

    match format {
        SourceFormat::Csv => {
            let text = read_text(path)?;
            decode_csv(&text)
        }
        SourceFormat::Json => {
            let text = read_text(path)?;
            decode_json(&text)
        }
        SourceFormat::Sheet => decode_sheet(path),
    }
}

fn read_text(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path)
        .map_err(|e| AppError::decode(format!("Failed to read '{}': {e}", path.display())))
}

/// Decode delimited text: first line is the header, each following line is
/// positionally mapped to the header names.
///
/// A header with zero data lines is a valid, empty dataset, not an error.
pub fn decode_csv(text: &str) -> Result<Vec<RawRow>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::decode(format!("Failed to read CSV header: {e}")))?
        .iter()
        .map(normalize_header_name)
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header and CSV lines are 1-based.
        let line = idx + 2;
        let record = result
            .map_err(|e| AppError::decode(format!("Malformed CSV on line {line}: {e}")))?;
        rows.push(csv_row(&headers, &record));
    }

    Ok(rows)
}

fn csv_row(headers: &[String], record: &StringRecord) -> RawRow {
    let mut row = RawRow::with_capacity(headers.len());
    for (idx, name) in headers.iter().enumerate() {
        let value = match record.get(idx).map(str::trim) {
            Some(s) if !s.is_empty() => FieldValue::Text(s.to_string()),
            _ => FieldValue::Empty,
        };
        row.insert(name.clone(), value);
    }
    row
}

/// Decode a structured document: a JSON array of row objects.
pub fn decode_json(text: &str) -> Result<Vec<RawRow>, AppError> {
    let parsed: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(text)
        .map_err(|e| AppError::decode(format!("Invalid JSON dataset: {e}")))?;

    let rows = parsed
        .into_iter()
        .map(|obj| {
            obj.into_iter()
                .map(|(key, value)| (normalize_header_name(&key), json_value(value)))
                .collect()
        })
        .collect();

    Ok(rows)
}

fn json_value(value: serde_json::Value) -> FieldValue {
    match value {
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(v) => FieldValue::Number(v),
            None => FieldValue::Empty,
        },
        serde_json::Value::String(s) => FieldValue::Text(s),
        serde_json::Value::Bool(b) => FieldValue::Text(b.to_string()),
        _ => FieldValue::Empty,
    }
}

/// Decode the first sheet of a workbook, using the sheet's own header row.
pub fn decode_sheet(path: &Path) -> Result<Vec<RawRow>, AppError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AppError::decode(format!("Failed to open workbook '{}': {e}", path.display())))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::decode("Workbook has no sheets."))?
        .map_err(|e| AppError::decode(format!("Failed to read first sheet: {e}")))?;

    let mut iter = range.rows();
    let Some(header_row) = iter.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| normalize_header_name(&cell.to_string()))
        .collect();

    let mut rows = Vec::new();
    for cells in iter {
        // Trailing blank rows are a fixture of exported sheets; skip them.
        if cells.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        let mut row = RawRow::with_capacity(headers.len());
        for (idx, name) in headers.iter().enumerate() {
            let value = cells.get(idx).map(cell_value).unwrap_or(FieldValue::Empty);
            row.insert(name.clone(), value);
        }
        rows.push(row);
    }

    Ok(rows)
}

fn cell_value(cell: &Data) -> FieldValue {
    match cell {
        Data::Int(v) => FieldValue::Number(*v as f64),
        Data::Float(v) => FieldValue::Number(*v),
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                FieldValue::Empty
            } else {
                FieldValue::Text(s.to_string())
            }
        }
        Data::Bool(b) => FieldValue::Text(b.to_string()),
        Data::DateTime(dt) => FieldValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => FieldValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => FieldValue::Empty,
    }
}

/// Normalize a header name for field lookup.
///
/// Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
/// first header (e.g. "﻿year"). If we don't strip it, the normalizer would
/// miss the column and default the whole field to zero.
fn normalize_header_name(name: &str) -> String {
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}
