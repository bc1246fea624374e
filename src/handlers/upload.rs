use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use tracing::info;

use super::ErrorResponse;
use crate::controller::{PageHandles, UploadController};
use crate::models::{UploadForm, UploadedFile, DEFAULT_FILE_FIELD};
use crate::state::AppState;
use crate::templates::page::{self, PageState};
use crate::view::{AlertLog, PageView};

/// Keeps the status multer reports, so an oversized body is a 413 and not a 400.
fn form_error(context: &str, e: MultipartError) -> (StatusCode, Json<ErrorResponse>) {
    let status = e.status();
    let hint = if status == StatusCode::PAYLOAD_TOO_LARGE {
        "Upload a smaller image"
    } else {
        "Submit the upload form as multipart/form-data"
    };
    (
        status,
        Json(ErrorResponse {
            error: format!("{}: {}", context, e.body_text()),
            hint: Some(hint.to_string()),
        }),
    )
}

/// Reads the submitted form. An empty file input (no name, no bytes) counts
/// as no file selected.
pub async fn read_form(
    multipart: &mut Multipart,
) -> Result<UploadForm, (StatusCode, Json<ErrorResponse>)> {
    let mut form = UploadForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(form_error("Malformed form data", e)),
        };

        let name = field.name().unwrap_or("").to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) if name == DEFAULT_FILE_FIELD => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| form_error("Failed to read file", e))?;
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.file = Some(UploadedFile::new(file_name, mime_type, bytes.to_vec()));
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| form_error(&format!("Failed to read field {}", name), e))?;
                form.fields.push((name, value));
            }
        }
    }

    Ok(form)
}

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, (StatusCode, Json<ErrorResponse>)> {
    let form = read_form(&mut multipart).await?;

    let controller = UploadController::setup(
        PageHandles::new(PageView::default(), AlertLog::new()),
        state.predictor.clone(),
        state.previews.clone(),
    );
    controller.on_file_change(form.file.as_ref());
    let outcome = controller.on_submit(&form).await;
    info!("[freshcheck] Upload finished: {:?}", outcome);

    let (view, alerts) = controller.into_handles();
    let alerts = alerts.messages();
    Ok(Html(page::render(&PageState {
        result: &view,
        alerts: &alerts,
    })))
}
