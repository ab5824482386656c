//! Sample Normalizer
//!
//! Input: [`RawTable`] + [`ColumnSchema`]
//! Output: one [`RowOutcome`] per raw row, in order
//!
//! Missing columns abort the whole run. A bad cell only drops its row.

use serde::Serialize;

use super::reader::RawTable;
use super::record::{DropReason, DroppedRow, RowOutcome, Sample};
use super::schema::ColumnSchema;
use crate::error::{AnalyzerResult, SchemaError};

/// Normalized run: evaluable samples plus the audit trail of dropped rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedRun {
    pub samples: Vec<Sample>,
    pub dropped: Vec<DroppedRow>,
    /// Data rows read from the table
    pub total_rows: usize,
    /// Names of the columns averaged into the mixture ratio
    pub mixture_columns: Vec<String>,
}

impl NormalizedRun {
    pub fn from_outcomes(outcomes: Vec<RowOutcome>, mixture_columns: Vec<String>) -> Self {
        let total_rows = outcomes.len();
        let mut samples = Vec::with_capacity(total_rows);
        let mut dropped = Vec::new();

        for outcome in outcomes {
            match outcome {
                RowOutcome::Valid(s) => samples.push(s),
                RowOutcome::Dropped(d) => dropped.push(d),
            }
        }

        Self {
            samples,
            dropped,
            total_rows,
            mixture_columns,
        }
    }
}

/// Normalize every row of `table` against `schema`
pub fn normalize(table: &RawTable, schema: &ColumnSchema) -> AnalyzerResult<NormalizedRun> {
    let required = resolve_required(table, schema)?;
    let mixture = resolve_mixture(table, schema)?;

    let mixture_columns: Vec<String> = mixture
        .iter()
        .map(|&i| table.headers[i].clone())
        .collect();

    let outcomes: Vec<RowOutcome> = table
        .rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| normalize_row(row_index, row, &required, &mixture, schema))
        .collect();

    let run = NormalizedRun::from_outcomes(outcomes, mixture_columns);

    if !run.dropped.is_empty() {
        log::debug!(
            "Dropped {} of {} row(s) during normalization",
            run.dropped.len(),
            run.total_rows
        );
    }

    Ok(run)
}

/// Column indices for the five required fields, in `ColumnSchema::required` order
fn resolve_required(table: &RawTable, schema: &ColumnSchema) -> AnalyzerResult<[usize; 5]> {
    let mut indices = [0usize; 5];
    let mut missing = Vec::new();

    for (slot, name) in schema.required().iter().enumerate() {
        match table.column_index(name) {
            Some(idx) => indices[slot] = idx,
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        log::warn!("Schema check failed, missing: {:?}", missing);
        return Err(SchemaError::MissingColumns(missing).into());
    }

    Ok(indices)
}

fn resolve_mixture(table: &RawTable, schema: &ColumnSchema) -> AnalyzerResult<Vec<usize>> {
    let re = schema.mixture_regex()?;
    let columns: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| re.is_match(h))
        .map(|(i, _)| i)
        .collect();

    if columns.is_empty() {
        return Err(SchemaError::NoMixtureColumn {
            pattern: schema.mixture_pattern.clone(),
        }
        .into());
    }

    Ok(columns)
}

fn normalize_row(
    row_index: usize,
    row: &[String],
    required: &[usize; 5],
    mixture: &[usize],
    schema: &ColumnSchema,
) -> RowOutcome {
    let names = schema.required();
    let mut values = [0.0f64; 5];

    for (slot, &col) in required.iter().enumerate() {
        let raw = row.get(col).map(String::as_str).unwrap_or("");
        match coerce(raw) {
            Some(v) => values[slot] = v,
            None => {
                return RowOutcome::Dropped(DroppedRow {
                    row_index,
                    reason: DropReason::Unparseable {
                        column: names[slot].to_string(),
                        value: raw.to_string(),
                    },
                })
            }
        }
    }

    let readings: Vec<f64> = mixture
        .iter()
        .filter_map(|&col| row.get(col).and_then(|raw| coerce(raw)))
        .collect();

    if readings.is_empty() {
        return RowOutcome::Dropped(DroppedRow {
            row_index,
            reason: DropReason::NoMixtureReading,
        });
    }

    let [throttle_position, fuel_pressure, intake_air_temp, coolant_temp, elapsed_time] = values;

    RowOutcome::Valid(Sample {
        row_index,
        elapsed_time,
        throttle_position,
        mixture_ratio: readings.iter().sum::<f64>() / readings.len() as f64,
        fuel_pressure,
        intake_air_temp,
        coolant_temp,
    })
}

/// Strict numeric coercion: finite reals only, surrounding whitespace allowed
pub fn coerce(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
