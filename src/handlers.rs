use axum::extract::{Multipart, State};
use axum::response::Html;
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::transcription::transcribe_file;
use crate::upload::UploadedFile;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.renderer.render(None))
}

/// Validate the upload, store it for the duration of the request, and render the outcome.
///
/// Validation failures become HTTP 400. Recognition failures are rendered into the page.
pub async fn transcribe(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("transcribe", %request_id);

    handle_upload(state, multipart).instrument(span).await
}

async fn handle_upload(state: AppState, multipart: Multipart) -> Result<Html<String>, AppError> {
    let upload = UploadedFile::from_multipart(multipart).await?;
    info!("Accepted {} upload {}", upload.format, upload.filename);

    let stored = state.uploads.store(&upload).await?;
    // Recognition errors end up in the page, not in the status code
    let result = transcribe_file(state.recognizer.as_ref(), stored.path()).await;
    stored.close();

    Ok(Html(state.renderer.render(Some(&result.display_text()))))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
