//! Prompt composition for transcript summaries.

use crate::error::Error;

/// Multipart field name the user's instruction arrives under.
pub const INSTRUCTION_FIELD: &str = "prompt";

/// The user's instruction paired with the transcript it applies to.
///
/// Both halves are guaranteed non-blank once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryPrompt {
    instruction: String,
    transcript_text: String,
}

impl SummaryPrompt {
    pub fn new(
        instruction: impl Into<String>,
        transcript_text: impl Into<String>,
    ) -> Result<Self, Error> {
        let instruction = instruction.into();
        let transcript_text = transcript_text.into();

        if instruction.trim().is_empty() {
            return Err(Error::missing_field(INSTRUCTION_FIELD));
        }
        if transcript_text.trim().is_empty() {
            return Err(Error::missing_field(crate::upload::FILE_FIELD));
        }

        Ok(Self {
            instruction,
            transcript_text,
        })
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn compose(&self) -> String {
        compose(&self.instruction, &self.transcript_text)
    }
}

/// Builds the completion prompt. The instruction is quoted verbatim and the full
/// transcript follows under a `Transcript:` label.
pub fn compose(instruction: &str, transcript_text: &str) -> String {
    format!(
        "Summarize the following transcript based on this instruction: \"{instruction}\"\n\nTranscript:\n{transcript_text}"
    )
}
