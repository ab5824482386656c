//! Analysis Pipeline
//!
//! CSV bytes -> RawTable -> NormalizedRun -> RunEvaluation -> Analysis
//!
//! Every step is pure except logging; an [`Analysis`] is never mutated after
//! it is built.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::AnalyzerResult;
use crate::logic::dataset::{normalize, read_csv, ColumnSchema, DroppedRow, RawTable};
use crate::logic::debounce::{evaluate, RunEvaluation, RunStats, RunVerdict};
use crate::logic::envelope::EnvelopeConfig;
use crate::logic::run::RunMetadata;

/// Complete result of analysing one run
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub metadata: RunMetadata,
    /// Hex SHA-256 of the uploaded bytes, when analysed from raw input
    pub input_sha256: Option<String>,
    pub mixture_columns: Vec<String>,
    pub dropped: Vec<DroppedRow>,
    pub evaluation: RunEvaluation,
    pub config: EnvelopeConfig,
    /// Source table, kept to export original cells alongside derived columns
    #[serde(skip)]
    pub table: RawTable,
}

impl Analysis {
    pub fn verdict(&self) -> &RunVerdict {
        &self.evaluation.verdict
    }

    pub fn stats(&self) -> &RunStats {
        &self.evaluation.stats
    }

    pub fn columns(&self) -> &[String] {
        &self.table.headers
    }
}

/// Analyse an already-parsed table
pub fn analyze(
    table: RawTable,
    metadata: RunMetadata,
    schema: &ColumnSchema,
    config: &EnvelopeConfig,
) -> AnalyzerResult<Analysis> {
    config.validate()?;
    metadata.validate()?;

    let normalized = normalize(&table, schema)?;
    let mut evaluation = evaluate(&normalized.samples, metadata.ambient_temp, config)?;
    evaluation.stats.rows_read = normalized.total_rows;
    evaluation.stats.rows_dropped = normalized.dropped.len();

    let analysis = Analysis {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        metadata,
        input_sha256: None,
        mixture_columns: normalized.mixture_columns,
        dropped: normalized.dropped,
        evaluation,
        config: config.clone(),
        table,
    };

    log::info!(
        "Analysis {} vessel={} verdict={} evaluated={}/{} dropped={} raw={} confirmed={}",
        analysis.id,
        analysis.metadata.vessel_id,
        analysis.verdict(),
        analysis.stats().samples_evaluated,
        analysis.stats().rows_read,
        analysis.stats().rows_dropped,
        analysis.stats().raw_violations,
        analysis.stats().confirmed_violations,
    );

    Ok(analysis)
}

/// Read logger CSV bytes and analyse them
pub fn analyze_csv(
    bytes: &[u8],
    preamble_lines: usize,
    metadata: RunMetadata,
    schema: &ColumnSchema,
    config: &EnvelopeConfig,
) -> AnalyzerResult<Analysis> {
    let digest = hex::encode(Sha256::digest(bytes));
    let text = String::from_utf8_lossy(bytes);
    let table = read_csv(&text, preamble_lines)?;

    let mut analysis = analyze(table, metadata, schema, config)?;
    analysis.input_sha256 = Some(digest);
    Ok(analysis)
}

// ============================================================================
// TESTS
// ============================================================================
