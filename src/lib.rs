//! OpenAPI 3.x to intermediate representation translator.
//!
//! [`parse_content`] takes an OpenAPI document (JSON or YAML text) and produces
//! an [`OpenApiIR`]: interfaces grouped by tag, their operations, and one model
//! per component schema. The IR carries no target-language decisions and is
//! meant to be walked by a separate source emitter.
//!
//! ```
//! use oasir::{ParseResult, TypeRef, parse_content};
//!
//! let spec = r#"
//! openapi: 3.0.3
//! info: { title: Pets, version: "1.0" }
//! paths:
//!   /pets/{petId}:
//!     delete:
//!       tags: [pets]
//!       responses:
//!         "204": { description: Deleted }
//! "#;
//!
//! let ParseResult::Success { ir } = parse_content(spec) else {
//!     unreachable!();
//! };
//! let op = &ir.interfaces[0].operations[0];
//! assert_eq!(ir.interfaces[0].name, "PetsApi");
//! assert_eq!(op.function_name, "deletePetsPetId");
//! assert_eq!(op.response_type, TypeRef::Unit);
//! ```

#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

mod document;
mod error;
mod ir;
mod parser;
pub mod spec;

pub use error::DocumentError;
pub use ir::utils::{to_camel_case, to_pascal_case};
pub use ir::{
    ApiInterfaceIR, HttpMethod, ModelIR, OpenApiIR, OperationIR, ParameterIR, ParameterLocation,
    PrimitiveType, PropertyIR, TypeRef, map_optional, map_schema,
};
pub use parser::{ParseResult, parse_content};
