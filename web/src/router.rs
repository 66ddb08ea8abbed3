use crate::controller::{health_check_controller, share_controller, summary_controller};
use crate::{params, response, AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// Global definition of the OpenAPI document. To be rendered, a path and
// schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Meeting Summarizer API"
        ),
        paths(
            health_check_controller::health_check,
            share_controller::share,
            summary_controller::summarize,
        ),
        components(
            schemas(
                params::share::ShareParams,
                params::summary::SummarizeForm,
                response::ErrorResponse,
                response::ShareResponse,
                response::SummaryResponse,
            )
        ),
        tags(
            (name = "meeting_summarizer", description = "Transcript summarization and sharing API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(summary_routes(app_state.clone()))
        .merge(share_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn summary_routes(app_state: AppState) -> Router {
    let max_upload_bytes = app_state.config.max_upload_bytes;
    Router::new()
        .route("/api/summarize", post(summary_controller::summarize))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(app_state)
}

fn share_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/share", post(share_controller::share))
        .with_state(app_state)
}
