//! Intermediate Representation for OpenAPI documents.
//!
//! The IR is language-agnostic: it describes interfaces, operations, and
//! models without committing to any target language.
//!
//! ## Module Structure
//!
//! - `types`: Type descriptors (TypeRef, PrimitiveType)
//! - `api`: API-level IR (OpenApiIR, ApiInterfaceIR, OperationIR, ModelIR, ...)
//! - `mapper`: Schema node -> TypeRef
//! - `normalize`: Document -> IR, operations and interfaces
//! - `models`: Component schemas -> models, composition flattening
//! - `utils`: Naming helpers shared across modules

mod api;
mod mapper;
mod models;
mod normalize;
mod types;
pub mod utils;

pub use api::{
    ApiInterfaceIR, HttpMethod, ModelIR, OpenApiIR, OperationIR, ParameterIR, ParameterLocation,
    PropertyIR,
};
pub use mapper::{map_optional, map_schema};
pub use normalize::normalize_document;
pub use types::{PrimitiveType, TypeRef};
