//! Browser upload flow (HTML in, HTML out)

use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse, Response},
};

use super::analyses::run_analysis;
use super::form::UploadForm;
use crate::{pages, AppResult, AppState};

/// GET /
pub async fn index() -> Html<String> {
    Html(pages::index())
}

/// POST /upload
pub async fn upload(State(state): State<AppState>, multipart: Multipart) -> Response {
    match analyse(&state, multipart).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::warn!("Upload rejected: {}", err);
            (err.status(), Html(pages::error(err.public_message()))).into_response()
        }
    }
}

async fn analyse(state: &AppState, multipart: Multipart) -> AppResult<String> {
    let form = UploadForm::from_multipart(multipart).await?;
    let analysis = run_analysis(state, &form).await?;
    Ok(pages::result(&analysis, state.config.preview_rows))
}
