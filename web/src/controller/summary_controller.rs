//! Controller for transcript summarization.

use crate::params::summary::SummarizeForm;
use crate::response::{ErrorResponse, SummaryResponse};
use crate::{AppState, Error};

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use domain::error::{Error as DomainError, InputErrorKind};
use domain::prompt::INSTRUCTION_FIELD;
use domain::summary as SummaryApi;
use domain::upload::{IncomingFile, UploadMetadata, FILE_FIELD};
use log::*;

/// POST /api/summarize
///
/// Summarize an uploaded plain-text transcript following the given instruction.
#[utoipa::path(
    post,
    path = "/api/summarize",
    request_body(content = SummarizeForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Summary generated", body = SummaryResponse),
        (status = 400, description = "Missing or invalid transcript file or prompt", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse),
        (status = 500, description = "Completion provider failure", body = ErrorResponse),
    )
)]
pub async fn summarize(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    let mut file: Option<IncomingFile> = None;
    let mut instruction: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let metadata = UploadMetadata {
                    file_name: field.file_name().map(str::to_string),
                    content_type: field.content_type().map(str::to_string),
                };
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some(IncomingFile {
                    metadata,
                    bytes: bytes.to_vec(),
                });
            }
            Some(INSTRUCTION_FIELD) => {
                instruction = Some(field.text().await.map_err(multipart_error)?);
            }
            other => debug!("Ignoring unexpected multipart field: {other:?}"),
        }
    }

    debug!(
        "POST summarize (file: {}, prompt: {})",
        file.is_some(),
        instruction.is_some()
    );

    let result = SummaryApi::summarize(
        &app_state.completion_client,
        instruction.as_deref(),
        file.as_ref(),
        app_state.config.upload_dir(),
    )
    .await?;

    Ok(Json(SummaryResponse {
        summary: result.summary_text,
    }))
}

fn multipart_error(err: MultipartError) -> Error {
    warn!("Failed to read multipart body: {}", err.body_text());
    let kind = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        InputErrorKind::PayloadTooLarge
    } else {
        InputErrorKind::MalformedRequest(err.body_text())
    };
    Error::from(DomainError {
        source: Some(Box::new(err)),
        error_kind: domain::error::DomainErrorKind::Input(kind),
    })
}
