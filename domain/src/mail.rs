//! Summary delivery by email.

use crate::error::Error;
use async_trait::async_trait;
use email_address::EmailAddress;
use log::*;
use std::sync::Arc;

pub const SUMMARY_SUBJECT: &str = "Meeting Summary";

pub const SUMMARY_FIELD: &str = "summary";
pub const RECIPIENTS_FIELD: &str = "recipients";

/// One outgoing summary email. `to` is the comma-joined form of `recipients`, kept for
/// logging; providers address the message from `recipients`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub recipients: Vec<String>,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl MailMessage {
    pub fn summary(from: &str, summary_text: &str, recipients: &[String]) -> Self {
        Self {
            from: from.to_string(),
            recipients: recipients.to_vec(),
            to: recipients.join(","),
            subject: SUMMARY_SUBJECT.to_string(),
            html_body: format!(
                "<h3>{SUMMARY_SUBJECT}</h3><p>{}</p>",
                escape_html(summary_text)
            ),
        }
    }
}

/// Abstraction over the external transactional mail service.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, message: &MailMessage) -> Result<(), Error>;
}

/// Validates share requests and hands one message per request to a [`MailTransport`].
#[derive(Clone)]
pub struct MailDispatcher {
    transport: Arc<dyn MailTransport>,
    sender: String,
}

impl MailDispatcher {
    pub fn new(transport: Arc<dyn MailTransport>, sender: impl Into<String>) -> Self {
        Self {
            transport,
            sender: sender.into(),
        }
    }

    /// Emails `summary_text` to every recipient in a single message.
    ///
    /// Recipient entries are trimmed and blank ones dropped. Nothing is sent unless the
    /// summary is non-blank and every remaining recipient is a valid address.
    pub async fn send(&self, summary_text: &str, recipients: &[String]) -> Result<(), Error> {
        if summary_text.trim().is_empty() {
            return Err(Error::missing_field(SUMMARY_FIELD));
        }

        let recipients = normalize_recipients(recipients)?;
        let message = MailMessage::summary(&self.sender, summary_text, &recipients);

        info!("Sending summary email to {}", message.to);

        self.transport.deliver(&message).await.map_err(|e| {
            error!("Mail provider failed to deliver summary: {e}");
            Error::mail(e)
        })
    }
}

fn normalize_recipients(recipients: &[String]) -> Result<Vec<String>, Error> {
    let recipients: Vec<String> = recipients
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();

    if recipients.is_empty() {
        return Err(Error::missing_field(RECIPIENTS_FIELD));
    }

    if let Some(invalid) = recipients.iter().find(|r| !is_valid_email(r)) {
        warn!("Invalid recipient email: {invalid}");
        return Err(Error::invalid_field(RECIPIENTS_FIELD));
    }

    Ok(recipients)
}

/// Validate email address format using email_address crate
pub fn is_valid_email(email: &str) -> bool {
    EmailAddress::is_valid(email)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, ExternalErrorKind, InputErrorKind};
    use mockall::mock;

    mock! {
        pub Transport {}

        #[async_trait]
        impl MailTransport for Transport {
            async fn deliver(&self, message: &MailMessage) -> Result<(), Error>;
        }
    }

    fn recipients(list: &[&str]) -> Vec<String> {
        list.iter().map(|r| r.to_string()).collect()
    }

    #[tokio::test]
    async fn test_send_delivers_one_message_to_joined_recipients() {
        let mut transport = MockTransport::new();
        transport
            .expect_deliver()
            .withf(|message: &MailMessage| {
                message.to == "a@x.com,b@x.com"
                    && message.subject == "Meeting Summary"
                    && message.from == "notes@example.com"
                    && message.html_body == "<h3>Meeting Summary</h3><p>Ship Friday.</p>"
            })
            .times(1)
            .returning(|_| Ok(()));

        let dispatcher = MailDispatcher::new(Arc::new(transport), "notes@example.com");
        dispatcher
            .send("Ship Friday.", &recipients(&["a@x.com", "b@x.com"]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_send_trims_entries_and_keeps_duplicates_in_order() {
        let mut transport = MockTransport::new();
        transport
            .expect_deliver()
            .withf(|message: &MailMessage| message.to == "b@x.com,a@x.com,b@x.com")
            .times(1)
            .returning(|_| Ok(()));

        let dispatcher = MailDispatcher::new(Arc::new(transport), "notes@example.com");
        dispatcher
            .send("summary", &recipients(&["b@x.com", " a@x.com", "", "b@x.com "]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_recipients_never_reach_transport() {
        let mut transport = MockTransport::new();
        transport.expect_deliver().times(0);
        let dispatcher = MailDispatcher::new(Arc::new(transport), "notes@example.com");

        for list in [recipients(&[]), recipients(&["", "  "])] {
            let err = dispatcher.send("Ship Friday.", &list).await.unwrap_err();
            assert_eq!(
                err.error_kind,
                DomainErrorKind::Input(InputErrorKind::MissingField(
                    RECIPIENTS_FIELD.to_string()
                ))
            );
        }
    }

    #[tokio::test]
    async fn test_empty_summary_never_reaches_transport() {
        let mut transport = MockTransport::new();
        transport.expect_deliver().times(0);
        let dispatcher = MailDispatcher::new(Arc::new(transport), "notes@example.com");

        let err = dispatcher
            .send(" ", &recipients(&["a@x.com"]))
            .await
            .unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Input(InputErrorKind::MissingField(SUMMARY_FIELD.to_string()))
        );
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_client_error() {
        let mut transport = MockTransport::new();
        transport.expect_deliver().times(0);
        let dispatcher = MailDispatcher::new(Arc::new(transport), "notes@example.com");

        let err = dispatcher
            .send("summary", &recipients(&["a@x.com", "not-an-address"]))
            .await
            .unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Input(InputErrorKind::InvalidField(RECIPIENTS_FIELD.to_string()))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_mail_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_deliver()
            .times(1)
            .returning(|_| Err(Error::config()));
        let dispatcher = MailDispatcher::new(Arc::new(transport), "notes@example.com");

        let err = dispatcher
            .send("summary", &recipients(&["a@x.com"]))
            .await
            .unwrap_err();
        assert_eq!(err.error_kind, DomainErrorKind::External(ExternalErrorKind::Mail));
    }

    #[test]
    fn test_summary_html_is_escaped() {
        let message = MailMessage::summary(
            "notes@example.com",
            "<script>alert('x')</script> & more",
            &recipients(&["a@x.com"]),
        );
        assert_eq!(
            message.html_body,
            "<h3>Meeting Summary</h3><p>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more</p>"
        );
    }

    #[test]
    fn test_message_keeps_recipients_alongside_joined_field() {
        let message = MailMessage::summary("n@example.com", "s", &recipients(&["a@x.com", "b@x.com"]));
        assert_eq!(message.recipients, recipients(&["a@x.com", "b@x.com"]));
        assert_eq!(message.to, "a@x.com,b@x.com");
    }

    #[test]
    fn test_email_validation() {
        for email in ["", "invalid-email", "@example.com", "test@"] {
            assert!(!is_valid_email(email), "Email '{email}' should be invalid");
        }
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name@domain.co.uk"));
    }

    #[tokio::test]
    async fn test_quoted_comma_address_stays_one_recipient() {
        let mut transport = MockTransport::new();
        transport
            .expect_deliver()
            .withf(|message: &MailMessage| {
                message.recipients == vec!["\"a,b\"@x.com".to_string(), "c@x.com".to_string()]
            })
            .times(1)
            .returning(|_| Ok(()));

        let dispatcher = MailDispatcher::new(Arc::new(transport), "notes@example.com");
        dispatcher
            .send("summary", &recipients(&["\"a,b\"@x.com", "c@x.com"]))
            .await
            .unwrap();
    }
}
