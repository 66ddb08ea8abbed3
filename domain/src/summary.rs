use crate::completion::{CompletionClient, CompletionResult};
use crate::error::Error;
use crate::prompt::{SummaryPrompt, INSTRUCTION_FIELD};
use crate::upload::{self, IncomingFile, FILE_FIELD};
use log::*;
use std::path::Path;

/// Summarize an uploaded transcript according to the user's instruction.
///
/// Presence of both inputs is checked before anything else, and the upload is
/// validated before the provider is called, so client errors never reach the
/// completion provider. The transient upload is held until this returns.
pub async fn summarize(
    client: &CompletionClient,
    instruction: Option<&str>,
    file: Option<&IncomingFile>,
    upload_dir: Option<&Path>,
) -> Result<CompletionResult, Error> {
    let file = file.ok_or_else(|| Error::missing_field(FILE_FIELD))?;
    let instruction = instruction
        .filter(|i| !i.trim().is_empty())
        .ok_or_else(|| Error::missing_field(INSTRUCTION_FIELD))?;

    let upload = upload::validate(&file.metadata, &file.bytes, upload_dir)?;
    info!(
        "Summarizing '{}' ({} chars)",
        upload.source_filename(),
        upload.text().len()
    );

    let prompt = SummaryPrompt::new(instruction, upload.text())?;
    let result = client.complete(&prompt.compose()).await;

    drop(upload);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::tests::{response_with, MockProvider};
    use crate::completion::{CompletionRequest, CompletionResponse, PLACEHOLDER_SUMMARY};
    use crate::error::{DomainErrorKind, ExternalErrorKind, InputErrorKind};
    use crate::upload::UploadMetadata;
    use std::sync::Arc;

    fn transcript(content_type: &str, content: &str) -> IncomingFile {
        IncomingFile {
            metadata: UploadMetadata {
                file_name: Some("transcript.txt".to_string()),
                content_type: Some(content_type.to_string()),
            },
            bytes: content.as_bytes().to_vec(),
        }
    }

    fn client_expecting_no_calls() -> CompletionClient {
        let mut provider = MockProvider::new();
        provider.expect_create_chat_completion().times(0);
        CompletionClient::new(Arc::new(provider), "llama-3.1-8b-instant")
    }

    #[tokio::test]
    async fn test_summarize_returns_provider_content() {
        let mut provider = MockProvider::new();
        provider
            .expect_create_chat_completion()
            .withf(|request: &CompletionRequest| {
                request.messages.len() == 1
                    && request.messages[0].content
                        == "Summarize the following transcript based on this instruction: \"one sentence summary\"\n\nTranscript:\nAlice: let's ship Friday."
            })
            .times(1)
            .returning(|_| Ok(response_with(Some("Ship Friday."))));
        let client = CompletionClient::new(Arc::new(provider), "llama-3.1-8b-instant");

        let file = transcript("text/plain", "Alice: let's ship Friday.");
        let result = summarize(&client, Some("one sentence summary"), Some(&file), None)
            .await
            .unwrap();

        assert_eq!(result.summary_text, "Ship Friday.");
    }

    #[tokio::test]
    async fn test_wrong_content_type_skips_provider() {
        let client = client_expecting_no_calls();
        let file = transcript("application/json", "{}");

        let err = summarize(&client, Some("summarize"), Some(&file), None)
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert!(matches!(
            err.error_kind,
            DomainErrorKind::Input(InputErrorKind::UnsupportedMediaType(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_instruction_skips_provider() {
        let client = client_expecting_no_calls();
        let file = transcript("text/plain", "Alice: hi");

        for instruction in [None, Some(""), Some("   ")] {
            let err = summarize(&client, instruction, Some(&file), None)
                .await
                .unwrap_err();
            assert_eq!(
                err.error_kind,
                DomainErrorKind::Input(InputErrorKind::MissingField("prompt".to_string()))
            );
        }
    }

    #[tokio::test]
    async fn test_missing_file_skips_provider() {
        let client = client_expecting_no_calls();

        let err = summarize(&client, Some("summarize"), None, None)
            .await
            .unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Input(InputErrorKind::MissingField("transcriptFile".to_string()))
        );
    }

    #[tokio::test]
    async fn test_zero_choices_still_succeeds_with_placeholder() {
        let mut provider = MockProvider::new();
        provider
            .expect_create_chat_completion()
            .times(1)
            .returning(|_| Ok(CompletionResponse::default()));
        let client = CompletionClient::new(Arc::new(provider), "model");
        let file = transcript("text/plain", "Alice: hi");

        let result = summarize(&client, Some("summarize"), Some(&file), None)
            .await
            .unwrap();

        assert_eq!(result.summary_text, PLACEHOLDER_SUMMARY);
    }

    #[tokio::test]
    async fn test_provider_failure_returns_no_summary() {
        let mut provider = MockProvider::new();
        provider
            .expect_create_chat_completion()
            .times(1)
            .returning(|_| Err(Error::completion("operation timed out")));
        let client = CompletionClient::new(Arc::new(provider), "model");
        let file = transcript("text/plain", "Alice: hi");

        let err = summarize(&client, Some("summarize"), Some(&file), None)
            .await
            .unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Completion)
        );
    }

    #[tokio::test]
    async fn test_upload_is_removed_after_success_and_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = transcript("text/plain", "Alice: hi");

        let mut provider = MockProvider::new();
        let mut calls = 0;
        provider
            .expect_create_chat_completion()
            .times(2)
            .returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Ok(response_with(Some("hi")))
                } else {
                    Err(Error::completion("boom"))
                }
            });
        let client = CompletionClient::new(Arc::new(provider), "model");

        assert!(summarize(&client, Some("summarize"), Some(&file), Some(dir.path()))
            .await
            .is_ok());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        assert!(summarize(&client, Some("summarize"), Some(&file), Some(dir.path()))
            .await
            .is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
