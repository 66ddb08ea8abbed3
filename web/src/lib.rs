use axum::http::{header, HeaderValue, Method};
use domain::completion::CompletionClient;
use domain::mail::MailDispatcher;
use log::*;
use service::config::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub use self::error::Error;

mod controller;
mod error;
mod params;
mod response;
pub mod router;

/// Shared, cloneable state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub completion_client: CompletionClient,
    pub mail_dispatcher: MailDispatcher,
}

impl AppState {
    pub fn new(
        config: Config,
        completion_client: CompletionClient,
        mail_dispatcher: MailDispatcher,
    ) -> Self {
        Self {
            config: Arc::new(config),
            completion_client,
            mail_dispatcher,
        }
    }
}

/// Build the CORS policy from the configured origin list. Only listed origins
/// receive CORS headers; credentials are allowed for them.
pub fn cors_layer(
    allowed_origins: &[String],
) -> core::result::Result<CorsLayer, header::InvalidHeaderValue> {
    let origins = allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .map(HeaderValue::from_str)
        .collect::<core::result::Result<Vec<HeaderValue>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

pub async fn init_server(app_state: AppState) -> core::result::Result<(), Box<dyn std::error::Error>> {
    let interface = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let server_url = format!("{}:{}", interface, app_state.config.port);

    let cors = cors_layer(&app_state.config.allowed_origins).map_err(|e| {
        error!("Invalid entry in ALLOWED_ORIGINS: {e}");
        e
    })?;
    info!("CORS allowed origins: {:?}", app_state.config.allowed_origins);

    let listener = TcpListener::bind(&server_url).await?;
    info!("Server listening on http://{server_url}");

    axum::serve(listener, router::define_routes(app_state).layer(cors)).await?;

    Ok(())
}
