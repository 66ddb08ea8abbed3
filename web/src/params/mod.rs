//! This module holds typed parameters for endpoint inputs.
//!
//! Fields that the client must send are still `Option`s here so that their absence is
//! reported by the domain layer as a missing field, rather than rejected by the
//! extractor with a generic deserialization error.

pub(crate) mod share;
pub(crate) mod summary;
