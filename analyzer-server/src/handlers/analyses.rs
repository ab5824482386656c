//! Analysis handlers (JSON API + CSV download)

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use boat_analyzer_core::logic::dataset::DroppedRow;
use boat_analyzer_core::{analyze_csv, Analysis, RunMetadata, RunStats};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::form::UploadForm;
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct AnalysisSummary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub metadata: RunMetadata,
    pub file_name: Option<String>,
    pub input_sha256: Option<String>,
    pub verdict: &'static str,
    pub headline: String,
    pub first_violation_time: Option<f64>,
    pub stats: RunStats,
    pub mixture_columns: Vec<String>,
    pub dropped: Vec<DroppedRow>,
    pub download_url: String,
}

impl AnalysisSummary {
    pub fn new(analysis: &Analysis, file_name: Option<String>) -> Self {
        Self {
            id: analysis.id,
            created_at: analysis.created_at,
            metadata: analysis.metadata.clone(),
            file_name,
            input_sha256: analysis.input_sha256.clone(),
            verdict: analysis.verdict().as_str(),
            headline: analysis.verdict().headline(),
            first_violation_time: analysis.verdict().first_violation_time(),
            stats: *analysis.stats(),
            mixture_columns: analysis.mixture_columns.clone(),
            dropped: analysis.dropped.clone(),
            download_url: download_url(analysis.id),
        }
    }
}

pub fn download_url(id: Uuid) -> String {
    format!("/api/v1/analyses/{}/download", id)
}

/// Evaluate an uploaded run off the async runtime and persist its export
pub async fn run_analysis(state: &AppState, form: &UploadForm) -> AppResult<Analysis> {
    let metadata = form.metadata()?;
    let config = state.config.clone();
    let store = state.store.clone();
    let bytes = form.file.clone();

    let analysis = tokio::task::spawn_blocking(move || -> AppResult<Analysis> {
        if let Err(e) = store.prune_older_than(config.export_ttl) {
            tracing::warn!("Export pruning failed: {}", e);
        }

        let analysis = analyze_csv(
            &bytes,
            config.preamble_lines,
            metadata,
            &config.schema,
            &config.envelope,
        )?;
        store.save(&analysis)?;
        Ok(analysis)
    })
    .await??;

    tracing::info!(
        analysis_id = %analysis.id,
        vessel = %analysis.metadata.vessel_id,
        verdict = analysis.verdict().as_str(),
        dropped = analysis.stats().rows_dropped,
        "Run analysed"
    );

    Ok(analysis)
}

/// POST /api/v1/analyses
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<AnalysisSummary>> {
    let form = UploadForm::from_multipart(multipart).await?;
    let analysis = run_analysis(&state, &form).await?;
    Ok(Json(AnalysisSummary::new(&analysis, form.file_name.clone())))
}

/// GET /api/v1/analyses/:id/download
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let bytes = match tokio::fs::read(state.store.path_for(id)).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("Analysis {} not found", id)));
        }
        Err(e) => return Err(e.into()),
    };

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"analysis-{}.csv\"", id),
        ),
    ];

    Ok((headers, bytes).into_response())
}
