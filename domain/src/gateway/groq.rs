//! Groq API client for chat completions.
//!
//! Groq exposes an OpenAI-compatible `/chat/completions` endpoint authenticated
//! with a bearer API key.

use crate::completion::{CompletionProvider, CompletionRequest, CompletionResponse};
use crate::error::Error;
use async_trait::async_trait;
use log::*;
use secrecy::{ExposeSecret, SecretString};
use service::config::Config;
use std::time::Duration;

pub struct GroqClient {
    client: reqwest::Client,
    base_url: String,
}

impl GroqClient {
    /// Create a Groq client from the process configuration.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let api_key = config.groq_api_key().ok_or_else(|| {
            warn!("Failed to get Groq API key from config");
            Error::config()
        })?;

        Self::with_api_key(
            &SecretString::new(api_key),
            config.groq_base_url(),
            Duration::from_secs(config.completion_timeout_secs),
        )
    }

    pub fn with_api_key(
        api_key: &SecretString,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth_header =
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
                .map_err(|e| {
                    warn!("Failed to create Groq authorization header: {e:?}");
                    Error::config()
                })?;
        auth_header.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                warn!("Failed to build Groq HTTP client: {e:?}");
                Error {
                    source: Some(Box::new(e)),
                    ..Error::config()
                }
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CompletionProvider for GroqClient {
    async fn create_chat_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, Error> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!("Calling Groq chat completion with model: {}", request.model);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!("Groq chat completion timed out: {e:?}");
                } else {
                    warn!("Failed to send Groq chat completion request: {e:?}");
                }
                Error::completion(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Groq API returned {status}: {error_text}");
            return Err(Error::completion(format!(
                "Groq API returned {status}"
            )));
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Groq completion response: {e:?}");
            Error::completion(e)
        })?;

        info!(
            "Groq completion returned {} choice(s)",
            completion.choices.len()
        );
        Ok(completion)
    }
}
