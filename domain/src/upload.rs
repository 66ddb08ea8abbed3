//! Transcript upload validation and transient storage.
//!
//! An accepted upload is written to a `NamedTempFile` that lives exactly as long as the
//! returned [`TranscriptUpload`]. Dropping the upload removes the file, so a request
//! that holds it until it returns, success or failure, never leaves anything behind.

use crate::error::{DomainErrorKind, Error, InputErrorKind};
use log::*;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// The only content type accepted for transcripts.
pub const PLAIN_TEXT: &str = "text/plain";

/// Multipart field name the transcript file arrives under.
pub const FILE_FIELD: &str = "transcriptFile";

/// What the client declared about the file alongside its bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadMetadata {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

/// A file received with a summarize request, plus its raw bytes.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub metadata: UploadMetadata,
    pub bytes: Vec<u8>,
}

/// A validated transcript, backed by a temporary file removed on drop.
#[derive(Debug)]
pub struct TranscriptUpload {
    file: NamedTempFile,
    source_filename: String,
    mime_type: String,
    text: String,
}

impl TranscriptUpload {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_filename(&self) -> &str {
        &self.source_filename
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Checks the declared content type and encoding, then persists the bytes to transient
/// storage in `upload_dir` (or the system temp directory).
///
/// Nothing is written to disk unless the file is acceptable.
pub fn validate(
    metadata: &UploadMetadata,
    bytes: &[u8],
    upload_dir: Option<&Path>,
) -> Result<TranscriptUpload, Error> {
    let declared = metadata.content_type.as_deref().unwrap_or_default();
    if !is_plain_text(declared) {
        warn!(
            "Rejecting upload {:?} with content type '{declared}'",
            metadata.file_name
        );
        return Err(Error::input(InputErrorKind::UnsupportedMediaType(
            declared.to_string(),
        )));
    }

    if bytes.is_empty() {
        return Err(Error::missing_field(FILE_FIELD));
    }

    let text = String::from_utf8(bytes.to_vec()).map_err(|e| Error {
        source: Some(Box::new(e)),
        error_kind: DomainErrorKind::Input(InputErrorKind::InvalidEncoding(
            FILE_FIELD.to_string(),
        )),
    })?;

    let mut builder = tempfile::Builder::new();
    builder.prefix("transcript-").suffix(".txt");
    let mut file = match upload_dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    file.write_all(bytes)?;
    file.flush()?;

    let source_filename = metadata
        .file_name
        .clone()
        .unwrap_or_else(|| "transcript.txt".to_string());
    debug!(
        "Stored upload '{source_filename}' ({} bytes) at {}",
        bytes.len(),
        file.path().display()
    );

    Ok(TranscriptUpload {
        file,
        source_filename,
        mime_type: PLAIN_TEXT.to_string(),
        text,
    })
}

// Compares the media type essence only, so `text/plain; charset=utf-8` and `Text/Plain`
// are accepted. The Node service matched the header exactly and rejected both.
fn is_plain_text(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|essence| essence.eq_ignore_ascii_case(PLAIN_TEXT))
}
