//! Structural failures raised while loading an OpenAPI document.
//!
//! Per-node problems (an unknown schema type, a dangling `$ref`) are never
//! errors; they degrade inside the IR. Only failures that prevent building a
//! document at all end up here.

use thiserror::Error;

/// A reason the input could not be read as an OpenAPI 3.x document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Input was empty or whitespace only.
    #[error("OpenAPI document is empty")]
    Empty,

    /// Text is not valid JSON/YAML.
    #[error("Failed to parse OpenAPI document: {0}")]
    Syntax(String),

    /// Root node is a scalar or sequence instead of a mapping.
    #[error("OpenAPI document must be a mapping at the top level, found {0}")]
    NotAMapping(&'static str),

    /// A mandatory field is absent.
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// `openapi` is present but is not a 3.x version string.
    #[error("Unsupported OpenAPI version '{0}', expected 3.x")]
    UnsupportedVersion(String),

    /// Fields are present but have the wrong shape.
    #[error("Invalid OpenAPI document structure: {0}")]
    Structure(String),
}

/// Result type for document loading.
pub type DocumentResult<T> = Result<T, Vec<DocumentError>>;
