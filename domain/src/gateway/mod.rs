//! HTTP clients for the external providers behind the completion and mail seams.

pub mod groq;
pub mod mailersend;
