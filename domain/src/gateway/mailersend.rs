use crate::error::Error;
use crate::mail::{MailMessage, MailTransport};
use async_trait::async_trait;
use log::*;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use service::config::Config;
use std::time::Duration;

/// MailerSend API client for sending transactional emails
pub struct MailerSendClient {
    client: reqwest::Client,
    base_url: String,
}

/// Email address with an optional display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAddressee {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Request payload for sending an email via MailerSend
#[derive(Debug, Serialize)]
pub struct SendEmailRequest {
    pub from: EmailAddressee,
    pub to: Vec<EmailAddressee>,
    pub subject: String,
    pub html: String,
}

impl From<&MailMessage> for SendEmailRequest {
    fn from(message: &MailMessage) -> Self {
        Self {
            from: EmailAddressee {
                email: message.from.clone(),
                name: None,
            },
            to: message
                .recipients
                .iter()
                .map(|email| EmailAddressee {
                    email: email.clone(),
                    name: None,
                })
                .collect(),
            subject: message.subject.clone(),
            html: message.html_body.clone(),
        }
    }
}

impl MailerSendClient {
    /// Create a new MailerSend client from the mail credentials in the process configuration.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let api_token = config.email_host_pass().ok_or_else(|| {
            warn!("Failed to get mail account secret from config");
            Error::config()
        })?;
        let base_url = config.mail_base_url()?;

        Self::with_token(
            &SecretString::new(api_token),
            &base_url,
            Duration::from_secs(config.mail_timeout_secs),
        )
    }

    pub fn with_token(
        api_token: &SecretString,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let client = build_client(api_token, timeout)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MailTransport for MailerSendClient {
    async fn deliver(&self, message: &MailMessage) -> Result<(), Error> {
        let request = SendEmailRequest::from(message);
        let url = format!("{}/email", self.base_url);

        debug!("Email subject: {}", request.subject);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to send email request: {e:?}");
                Error::mail(e)
            })?;

        let status = response.status();
        if status.is_success() {
            let message_id = response
                .headers()
                .get("x-message-id")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());

            info!("Email sent successfully, message_id: {:?}", message_id);
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Failed to send email: {} - {}", status, error_text);
            Err(Error::mail(format!("mail provider returned {status}")))
        }
    }
}

/// Build HTTP client with MailerSend authentication
fn build_client(api_token: &SecretString, timeout: Duration) -> Result<reqwest::Client, Error> {
    let mut headers = reqwest::header::HeaderMap::new();
    let auth_value = format!("Bearer {}", api_token.expose_secret());
    let mut auth_header = reqwest::header::HeaderValue::from_str(&auth_value).map_err(|err| {
        warn!("Failed to create authorization header value: {err:?}");
        Error::config()
    })?;
    auth_header.set_sensitive(true);
    headers.insert(reqwest::header::AUTHORIZATION, auth_header);

    reqwest::Client::builder()
        .use_rustls_tls()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|e| Error {
            source: Some(Box::new(e)),
            ..Error::config()
        })
}
