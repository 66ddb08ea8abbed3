use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use domain::error::{DomainErrorKind, Error as DomainError, InputErrorKind};
use log::*;

use crate::response::ErrorResponse;

const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0.error_kind {
            DomainErrorKind::Input(input_error_kind) => client_error(input_error_kind),
            DomainErrorKind::Internal(_) | DomainErrorKind::External(_) => {
                log_server_error(&self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_SERVER_ERROR.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

fn client_error(kind: &InputErrorKind) -> (StatusCode, String) {
    match kind {
        InputErrorKind::MissingField(field) => (
            StatusCode::BAD_REQUEST,
            format!("Missing required field: {field}"),
        ),
        InputErrorKind::InvalidField(field) => (
            StatusCode::BAD_REQUEST,
            format!("Invalid value for field: {field}"),
        ),
        InputErrorKind::UnsupportedMediaType(content_type) => (
            StatusCode::BAD_REQUEST,
            format!("Only .txt files are allowed! Received content type '{content_type}'"),
        ),
        InputErrorKind::InvalidEncoding(field) => (
            StatusCode::BAD_REQUEST,
            format!("Field {field} must be UTF-8 encoded text"),
        ),
        InputErrorKind::MalformedRequest(detail) => (
            StatusCode::BAD_REQUEST,
            format!("Malformed request: {detail}"),
        ),
        InputErrorKind::PayloadTooLarge => (
            StatusCode::PAYLOAD_TOO_LARGE,
            "Upload exceeds the maximum allowed size".to_string(),
        ),
    }
}

// Operators get the whole cause chain; the client only ever sees the generic message.
fn log_server_error(err: &DomainError) {
    error!("Request failed: {:?}", err.error_kind);
    let mut source = err.source();
    while let Some(cause) = source {
        error!("  caused by: {cause}");
        source = cause.source();
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
