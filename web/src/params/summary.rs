use serde::Deserialize;
use utoipa::ToSchema;

/// OpenAPI description of the multipart form accepted by `POST /api/summarize`.
///
/// The form itself is read field by field from `axum::extract::Multipart`; this type
/// only documents it.
#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct SummarizeForm {
    /// Plain-text (`text/plain`) transcript file
    #[serde(rename = "transcriptFile")]
    #[schema(value_type = String, format = Binary)]
    pub transcript_file: Vec<u8>,
    /// Instruction telling the model what kind of summary to write
    #[schema(example = "one sentence summary")]
    pub prompt: String,
}
