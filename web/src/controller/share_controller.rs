//! Controller for emailing summaries.

use crate::params::share::ShareParams;
use crate::response::{ErrorResponse, ShareResponse};
use crate::{AppState, Error};

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use domain::error::{Error as DomainError, InputErrorKind};
use domain::share as ShareApi;
use log::*;

/// POST /api/share
///
/// Email a summary to a list of recipients.
#[utoipa::path(
    post,
    path = "/api/share",
    request_body = ShareParams,
    responses(
        (status = 200, description = "Email sent", body = ShareResponse),
        (status = 400, description = "Missing summary or recipients, or malformed body", body = ErrorResponse),
        (status = 500, description = "Mail provider failure", body = ErrorResponse),
    )
)]
pub async fn share(
    State(app_state): State<AppState>,
    payload: Result<Json<ShareParams>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(params) = payload.map_err(|rejection| {
        warn!("Rejected share body: {}", rejection.body_text());
        Error::from(DomainError::input(InputErrorKind::MalformedRequest(
            rejection.body_text(),
        )))
    })?;

    debug!(
        "POST share to {} recipient(s)",
        params.recipients.as_ref().map_or(0, Vec::len)
    );

    ShareApi::share(
        &app_state.mail_dispatcher,
        params.summary.as_deref(),
        params.recipients.as_deref(),
    )
    .await?;

    Ok(Json(ShareResponse {
        message: "Email sent successfully!".to_string(),
    }))
}
