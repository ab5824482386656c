//! Annotated CSV export
//!
//! Original logger columns first, then the derived columns, one line per
//! evaluated sample. Dropped rows do not appear.

use std::io::{self, Write};

use crate::logic::analysis::Analysis;
use crate::logic::debounce::AnnotatedSample;

/// Derived columns appended after the logger's own
pub const DERIVED_COLUMNS: [&str; 11] = [
    "mixture_ratio",
    "throttle_active",
    "mixture_ok",
    "fuel_ok",
    "intake_ok",
    "coolant_ok",
    "raw_violation",
    "dt",
    "accumulated",
    "sustained_violation",
    "qualified",
];

/// Write the annotated table. Returns the number of data lines written.
pub fn write_annotated<W: Write>(out: &mut W, analysis: &Analysis) -> io::Result<usize> {
    let header: Vec<String> = analysis
        .columns()
        .iter()
        .map(|c| escape_field(c))
        .chain(DERIVED_COLUMNS.iter().map(|c| c.to_string()))
        .collect();
    writeln!(out, "{}", header.join(","))?;

    for row in &analysis.evaluation.rows {
        let mut fields: Vec<String> = analysis
            .table
            .rows
            .get(row.sample.row_index)
            .map(|cells| cells.iter().map(|c| escape_field(c)).collect())
            .unwrap_or_default();
        fields.extend(derived_cells(row));
        writeln!(out, "{}", fields.join(","))?;
    }

    out.flush()?;
    Ok(analysis.evaluation.rows.len())
}

pub fn to_csv_bytes(analysis: &Analysis) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_annotated(&mut buf, analysis)?;
    Ok(buf)
}

/// Derived values for one row, in [`DERIVED_COLUMNS`] order
pub fn derived_cells(row: &AnnotatedSample) -> Vec<String> {
    vec![
        format!("{:.4}", row.sample.mixture_ratio),
        row.flags.throttle_active.to_string(),
        row.flags.mixture_ok.to_string(),
        row.flags.fuel_ok.to_string(),
        row.flags.intake_ok.to_string(),
        row.flags.coolant_ok.to_string(),
        row.raw_violation.to_string(),
        format!("{:.3}", row.dt),
        format!("{:.3}", row.accumulated),
        row.sustained_violation.to_string(),
        row.qualified.to_string(),
    ]
}

/// Quote a field if it holds a delimiter, quote or line break
fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
