//! MPE table CSV ingest.
//!
//! Turns a `mass_g` + per-class CSV into an [`MpeTable`] that is safe to
//! query.
//!
//! Design goals:
//! - **Strict schema**: a `mass_g` column plus recognized class headers only
//!   (clear errors + exit code 1)
//! - **Absent stays absent**: a blank cell is omitted from the row, never
//!   coerced to zero
//! - **Fail fast**: a malformed cell aborts the run; an offline deterministic
//!   tool has nothing sensible to do with a partially-read table

use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{MpeRow, MpeTable, WeightClass};
use crate::error::{AppError, EXIT_TABLE_FORMAT};

/// Header column expected to carry the nominal mass in grams.
const MASS_COLUMN: &str = "mass_g";

/// Column layout resolved from the CSV header.
struct HeaderLayout {
    mass_idx: usize,
    /// `(column index, class)` for every class column present.
    class_cols: Vec<(usize, WeightClass)>,
}

/// Load an MPE table from a CSV file.
pub fn load_mpe_csv(path: &Path) -> Result<MpeTable, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            EXIT_TABLE_FORMAT,
            format!("Failed to open MPE table '{}': {e}", path.display()),
        )
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(EXIT_TABLE_FORMAT, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let layout = resolve_header_layout(&headers)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header line, and CSV lines are 1-based.
        let line = idx + 2;
        let record = result.map_err(|e| {
            AppError::new(EXIT_TABLE_FORMAT, format!("CSV parse error at line {line}: {e}"))
        })?;
        rows.push(parse_row(&record, &layout, line)?);
    }

    if rows.is_empty() {
        return Err(AppError::new(EXIT_TABLE_FORMAT, "MPE table has no data rows."));
    }

    Ok(MpeTable::from_rows(rows))
}

fn resolve_header_layout(headers: &StringRecord) -> Result<HeaderLayout, AppError> {
    let mut mass_idx = None;
    let mut class_cols = Vec::new();

    for (idx, raw) in headers.iter().enumerate() {
        let name = normalize_header_name(raw);
        if name.eq_ignore_ascii_case(MASS_COLUMN) {
            mass_idx = Some(idx);
        } else if let Some(class) = WeightClass::from_label(&name) {
            class_cols.push((idx, class));
        } else {
            return Err(AppError::new(
                EXIT_TABLE_FORMAT,
                format!("Unrecognized MPE table column '{name}' (expected '{MASS_COLUMN}' or a class label)."),
            ));
        }
    }

    let Some(mass_idx) = mass_idx else {
        return Err(AppError::new(
            EXIT_TABLE_FORMAT,
            format!("MPE table is missing the '{MASS_COLUMN}' column."),
        ));
    };
    if class_cols.is_empty() {
        return Err(AppError::new(
            EXIT_TABLE_FORMAT,
            "MPE table has no class columns.",
        ));
    }

    Ok(HeaderLayout { mass_idx, class_cols })
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿mass_g"). If we don't strip it, schema validation
    // will incorrectly report a missing mass column.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn parse_row(record: &StringRecord, layout: &HeaderLayout, line: usize) -> Result<MpeRow, AppError> {
    let raw_mass = record.get(layout.mass_idx).unwrap_or("");
    let mass_g: f64 = raw_mass.parse().map_err(|_| {
        AppError::new(
            EXIT_TABLE_FORMAT,
            format!("Non-numeric mass '{raw_mass}' at line {line}."),
        )
    })?;
    if !(mass_g.is_finite() && mass_g > 0.0) {
        return Err(AppError::new(
            EXIT_TABLE_FORMAT,
            format!("Nominal mass must be positive, got '{raw_mass}' at line {line}."),
        ));
    }

    let mut row = MpeRow::new(mass_g);
    for &(idx, class) in &layout.class_cols {
        let cell = record.get(idx).unwrap_or("");
        if cell.is_empty() {
            // Class not applicable at this mass.
            continue;
        }
        let mpe_mg: f64 = cell.parse().map_err(|_| {
            AppError::new(
                EXIT_TABLE_FORMAT,
                format!("Non-numeric {class} value '{cell}' at line {line}."),
            )
        })?;
        if !(mpe_mg.is_finite() && mpe_mg > 0.0) {
            return Err(AppError::new(
                EXIT_TABLE_FORMAT,
                format!("{class} MPE must be positive, got '{cell}' at line {line}."),
            ));
        }
        row.set(class, mpe_mg);
    }

    Ok(row)
}
