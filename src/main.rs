use domain::completion::CompletionClient;
use domain::gateway::{groq::GroqClient, mailersend::MailerSendClient};
use domain::mail::MailDispatcher;
use log::*;
use service::{config::Config, logging::Logger};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to initialize logger: {e}");
    }

    info!("Starting up meeting summarizer ({})...", config.runtime_env());

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        process::exit(1);
    }

    let groq_client = match GroqClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create Groq client: {e}");
            process::exit(1);
        }
    };

    let mail_client = match MailerSendClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create mail client: {e}");
            process::exit(1);
        }
    };

    let completion_client = CompletionClient::new(Arc::new(groq_client), config.completion_model());
    let mail_dispatcher = MailDispatcher::new(
        Arc::new(mail_client),
        config.email_host_user().unwrap_or_default(),
    );

    let app_state = web::AppState::new(config, completion_client, mail_dispatcher);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server exited with error: {e}");
        process::exit(1);
    }
}
