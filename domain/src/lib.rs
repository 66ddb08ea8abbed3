//! Summarization and sharing pipelines, independent of the HTTP layer.
//!
//! `summary::summarize` validates an uploaded transcript, composes the prompt and asks the
//! completion provider for a summary. `share::share` emails a summary to a list of
//! recipients. Both providers sit behind traits (`completion::CompletionProvider`,
//! `mail::MailTransport`) with concrete clients in `gateway`.

pub mod completion;
pub mod error;
pub mod gateway;
pub mod mail;
pub mod prompt;
pub mod share;
pub mod summary;
pub mod upload;
