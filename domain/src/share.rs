use crate::error::Error;
use crate::mail::{MailDispatcher, RECIPIENTS_FIELD, SUMMARY_FIELD};

/// Email a summary to the given recipients through the dispatcher.
///
/// Either input being absent is a client error; the dispatcher handles empty values.
pub async fn share(
    dispatcher: &MailDispatcher,
    summary_text: Option<&str>,
    recipients: Option<&[String]>,
) -> Result<(), Error> {
    let summary_text = summary_text.ok_or_else(|| Error::missing_field(SUMMARY_FIELD))?;
    let recipients = recipients.ok_or_else(|| Error::missing_field(RECIPIENTS_FIELD))?;

    dispatcher.send(summary_text, recipients).await
}
