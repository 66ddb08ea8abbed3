//! Error types for the `domain` layer.
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors are modeled as a tree with `domain::error::Error` at the root, holding an
/// `error_kind` enum that says which stage failed and a `source` holding the original
/// error when there is one. `web` only looks at `error_kind` to pick the status code and
/// the user-facing message; `source` is for the logs.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    /// The caller sent something we can't work with. Always a client error.
    Input(InputErrorKind),
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// What was wrong with the caller's input. The `String` names the offending field.
#[derive(Debug, PartialEq)]
pub enum InputErrorKind {
    MissingField(String),
    InvalidField(String),
    UnsupportedMediaType(String),
    InvalidEncoding(String),
    MalformedRequest(String),
    PayloadTooLarge,
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Config,
    Io,
}

/// Failures of the external providers. Every way a provider call can go wrong
/// collapses into one of these.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Completion,
    Mail,
}

impl Error {
    pub fn input(kind: InputErrorKind) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Input(kind),
        }
    }

    pub fn missing_field(field: &str) -> Self {
        Self::input(InputErrorKind::MissingField(field.to_string()))
    }

    pub fn invalid_field(field: &str) -> Self {
        Self::input(InputErrorKind::InvalidField(field.to_string()))
    }

    pub fn config() -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        }
    }

    /// Wraps any failure as a completion provider error, keeping the cause.
    pub fn completion<E>(source: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Error {
            source: Some(source.into()),
            error_kind: DomainErrorKind::External(ExternalErrorKind::Completion),
        }
    }

    /// Wraps any failure as a mail provider error, keeping the cause.
    pub fn mail<E>(source: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Error {
            source: Some(source.into()),
            error_kind: DomainErrorKind::External(ExternalErrorKind::Mail),
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self.error_kind, DomainErrorKind::Input(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "Domain Error: {:?}: {source}", self.error_kind),
            None => write!(f, "Domain Error: {:?}", self.error_kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Io),
        }
    }
}

impl From<service::config::ConfigError> for Error {
    fn from(err: service::config::ConfigError) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_errors_keep_their_cause() {
        let err = Error::completion("connection reset by peer");
        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Completion)
        );
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("connection reset by peer".to_string())
        );
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_input_errors_are_client_errors() {
        assert!(Error::missing_field("prompt").is_client_error());
        assert!(Error::invalid_field("recipients").is_client_error());
        assert!(!Error::config().is_client_error());
    }
}
