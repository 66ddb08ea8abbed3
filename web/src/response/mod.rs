//! Response bodies. Field names match what the browser client reads.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryResponse {
    #[schema(example = "Ship Friday.")]
    pub summary: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShareResponse {
    #[schema(example = "Email sent successfully!")]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Missing required field: prompt")]
    pub error: String,
}
