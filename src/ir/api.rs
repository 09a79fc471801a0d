//! API-level IR produced by the translator.
//!
//! This module defines the intermediate representation handed to code emitters:
//! - OpenApiIR: The whole translated document
//! - ApiInterfaceIR: Operations grouped by their first tag
//! - OperationIR / ParameterIR: Normalized HTTP operations
//! - ModelIR / PropertyIR: Flattened component schemas

use serde::Serialize;

use super::types::TypeRef;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Parameter location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
}

/// Translated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApiIR {
    /// `info.title`
    pub title: String,
    /// `info.version`
    pub version: String,
    /// One interface per distinct first tag; never empty interfaces.
    pub interfaces: Vec<ApiInterfaceIR>,
    /// One model per `components.schemas` entry, in declaration order.
    pub models: Vec<ModelIR>,
}

impl OpenApiIR {
    /// Total number of operations across all interfaces.
    pub fn operation_count(&self) -> usize {
        self.interfaces.iter().map(|i| i.operations.len()).sum()
    }

    /// Find an interface by name.
    pub fn interface(&self, name: &str) -> Option<&ApiInterfaceIR> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    /// Find a model by name.
    pub fn model(&self, name: &str) -> Option<&ModelIR> {
        self.models.iter().find(|m| m.name == name)
    }
}

/// Group of operations sharing a first tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInterfaceIR {
    /// PascalCase tag + "Api", or "DefaultApi"
    pub name: String,
    /// Description of the matching top-level tag, if declared
    pub description: Option<String>,
    pub operations: Vec<OperationIR>,
}

impl ApiInterfaceIR {
    /// Find an operation by function name.
    pub fn operation(&self, function_name: &str) -> Option<&OperationIR> {
        self.operations
            .iter()
            .find(|o| o.function_name == function_name)
    }
}

/// Normalized API operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationIR {
    /// camelCase identifier, unique within its interface (e.g., "listItems")
    pub function_name: String,
    pub http_method: HttpMethod,
    /// URL path (e.g., "/items/{itemId}")
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    /// Path-level parameters first, then operation-level, as declared
    pub parameters: Vec<ParameterIR>,
    /// JSON request body (None = no body)
    pub request_body: Option<TypeRef>,
    /// JSON success response; `Unit` when there is no content
    pub response_type: TypeRef,
}

/// Single parameter definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterIR {
    /// Name as declared in the document
    pub name: String,
    pub location: ParameterLocation,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Always true for path parameters
    pub required: bool,
    pub description: Option<String>,
}

/// Data model built from one component schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelIR {
    /// Schema key exactly as declared
    pub name: String,
    pub properties: Vec<PropertyIR>,
    pub description: Option<String>,
    /// `enum` literals rendered as plain strings
    pub enum_values: Vec<String>,
}

impl ModelIR {
    /// Find a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyIR> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Model property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyIR {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub required: bool,
    /// `default` literal rendered as a plain string
    pub default_value: Option<String>,
    pub description: Option<String>,
}
