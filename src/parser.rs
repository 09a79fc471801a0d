//! Entry point: OpenAPI text to IR.
//!
//! The pipeline is:
//! 1. Load: text -> OpenApiDocument (syntax and structural checks)
//! 2. Normalize: OpenApiDocument -> OpenApiIR (all OpenAPI logic resolved)

use serde::Serialize;
use tracing::debug;

use crate::document::load_document;
use crate::ir::{OpenApiIR, normalize_document};

/// Outcome of a translation.
///
/// A malformed document is a `Failure` with at least one error and no IR.
/// A structurally valid document always translates, degrading per node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ParseResult {
    /// The document translated.
    Success {
        /// The translated document.
        ir: OpenApiIR,
    },
    /// The document could not be read as OpenAPI 3.x.
    Failure {
        /// Human-readable diagnostics, never empty.
        errors: Vec<String>,
    },
}

impl ParseResult {
    /// Whether the document translated.
    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success { .. })
    }

    /// Diagnostics of a failure; empty on success.
    pub fn errors(&self) -> &[String] {
        match self {
            ParseResult::Success { .. } => &[],
            ParseResult::Failure { errors } => errors,
        }
    }

    /// The IR of a success.
    pub fn ir(&self) -> Option<&OpenApiIR> {
        match self {
            ParseResult::Success { ir } => Some(ir),
            ParseResult::Failure { .. } => None,
        }
    }

    /// Convert into a `Result`, the IR on success and the diagnostics otherwise.
    pub fn into_result(self) -> Result<OpenApiIR, Vec<String>> {
        match self {
            ParseResult::Success { ir } => Ok(ir),
            ParseResult::Failure { errors } => Err(errors),
        }
    }
}

/// Translate an OpenAPI 3.x document (JSON or YAML) into IR.
pub fn parse_content(spec_text: &str) -> ParseResult {
    let document = match load_document(spec_text) {
        Ok(document) => document,
        Err(errors) => {
            debug!(errors = errors.len(), "Rejected OpenAPI document.");
            return ParseResult::Failure {
                errors: errors.iter().map(ToString::to_string).collect(),
            };
        }
    };

    let ir = normalize_document(&document);
    debug!(
        title = %ir.title,
        interfaces = ir.interfaces.len(),
        operations = ir.operation_count(),
        models = ir.models.len(),
        "Translated OpenAPI document to IR."
    );

    ParseResult::Success { ir }
}
