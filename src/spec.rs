//! OpenAPI document structs for serde deserialization.
//!
//! This module defines the subset of the OpenAPI 3.0 document that the
//! translator reads. Maps keep declaration order so the IR lists come out in
//! the order the author wrote them.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// Root OpenAPI document.
#[derive(Debug, Deserialize)]
pub struct OpenApiDocument {
    /// Version string, always `3.x` once loaded.
    pub openapi: String,
    pub info: Info,
    /// Top-level tag declarations (names and descriptions).
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Path templates to path items, in declaration order.
    pub paths: IndexMap<String, PathItem>,
    pub components: Option<Components>,
}

/// Document metadata.
#[derive(Debug, Deserialize)]
pub struct Info {
    pub title: String,
    /// Version of the described API, not of OpenAPI.
    pub version: String,
}

/// Top-level tag declaration.
#[derive(Debug, Deserialize)]
pub struct Tag {
    pub name: String,
    pub description: Option<String>,
}

/// Components section containing reusable objects.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
    #[serde(default)]
    pub parameters: IndexMap<String, RefOr<Parameter>>,
    #[serde(default)]
    pub request_bodies: IndexMap<String, RefOr<RequestBody>>,
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<Response>>,
}

/// Either a local `$ref` or an inline object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Item(T),
}

/// Refs pointing at refs are followed at most this many times.
const MAX_REF_DEPTH: usize = 16;

impl<T> RefOr<T> {
    /// Follow local refs through a components table until an inline object.
    /// Returns `None` for dangling or circular refs.
    pub fn resolve<'a>(&'a self, table: &'a IndexMap<String, RefOr<T>>) -> Option<&'a T> {
        let mut current = self;
        for _ in 0..MAX_REF_DEPTH {
            match current {
                RefOr::Item(item) => return Some(item),
                RefOr::Ref { ref_path } => current = table.get(ref_name(ref_path))?,
            }
        }
        None
    }

    /// The `$ref` path, if this is a reference.
    pub fn ref_path(&self) -> Option<&str> {
        match self {
            RefOr::Ref { ref_path } => Some(ref_path),
            RefOr::Item(_) => None,
        }
    }
}

/// A path item containing operations for different HTTP methods.
#[derive(Debug, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub post: Option<Operation>,
    pub put: Option<Operation>,
    pub patch: Option<Operation>,
    pub delete: Option<Operation>,
    /// Path-level parameters shared by all operations.
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
}

/// An API operation (endpoint).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
    pub request_body: Option<RefOr<RequestBody>>,
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<Response>>,
}

/// A parameter (query, path, header, or cookie).
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub required: Option<bool>,
    pub description: Option<String>,
    pub schema: Option<Schema>,
}

/// A request body definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// A response definition.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    pub description: Option<String>,
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Media type content (e.g., application/json).
#[derive(Debug, Clone, Deserialize)]
pub struct MediaType {
    pub schema: Option<Schema>,
}

/// JSON Schema definition used in OpenAPI.
///
/// Fields with a malformed shape (a boolean `required`, an object `enum`, a
/// tuple-style `items`, ...) read as absent so the node degrades instead of
/// failing the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Schema {
    /// The type of the schema (string, number, integer, boolean, object, array).
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Reference to another schema.
    #[serde(rename = "$ref", default, deserialize_with = "lenient")]
    pub ref_path: Option<String>,

    /// Format hint (e.g., int64, float, date-time).
    #[serde(default, deserialize_with = "lenient")]
    pub format: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,

    /// Properties for object types.
    #[serde(default, deserialize_with = "lenient")]
    pub properties: IndexMap<String, Schema>,

    /// Required property names for object types.
    #[serde(default, deserialize_with = "lenient")]
    pub required: Vec<String>,

    /// Item schema for array types.
    #[serde(default, deserialize_with = "lenient")]
    pub items: Option<Box<Schema>>,

    /// Default value for the schema.
    pub default: Option<serde_json::Value>,

    /// Enum literals.
    #[serde(rename = "enum", default, deserialize_with = "lenient")]
    pub enum_values: Vec<serde_json::Value>,

    /// Intersection (all of these schemas combined).
    #[serde(rename = "allOf", default, deserialize_with = "lenient")]
    pub all_of: Vec<Schema>,

    /// Exactly one of these schemas.
    #[serde(rename = "oneOf", default, deserialize_with = "lenient")]
    pub one_of: Vec<Schema>,

    /// Any of these schemas.
    #[serde(rename = "anyOf", default, deserialize_with = "lenient")]
    pub any_of: Vec<Schema>,
}

/// Deserialize a field, falling back to its default when the value has the
/// wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|err| {
        debug!(error = %err, "Ignoring malformed schema field.");
        T::default()
    }))
}

/// Schema type can be a single type, an array of types (3.1 nullable style),
/// or something unrecognizable that degrades to an untyped node.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
    Other(serde_json::Value),
}

impl SchemaType {
    /// The effective type name, skipping `null` entries of a type array.
    pub fn name(&self) -> Option<&str> {
        match self {
            SchemaType::Single(t) => Some(t.as_str()),
            SchemaType::Multiple(types) => types.iter().map(String::as_str).find(|t| *t != "null"),
            SchemaType::Other(_) => None,
        }
    }
}

/// Last path segment of a `$ref` (`#/components/schemas/Pet` -> `Pet`).
pub fn ref_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}
