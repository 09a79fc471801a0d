//! Schema node to [`TypeRef`] mapping.
//!
//! Mapping is pure and total: every schema resolves to some type, falling back
//! to `JsonElement` when the shape cannot be determined.

use crate::spec::{Schema, SchemaType, ref_name};

use super::types::{PrimitiveType, TypeRef};

/// Convert a Schema to a TypeRef
pub fn map_schema(schema: &Schema) -> TypeRef {
    // $ref wins over every other field on the node, even when it dangles
    if let Some(ref_path) = &schema.ref_path {
        return TypeRef::reference(ref_name(ref_path));
    }

    let format = schema.format.as_deref();
    match schema.schema_type.as_ref().and_then(SchemaType::name) {
        Some("string") => TypeRef::primitive(PrimitiveType::String),
        Some("integer") => match format {
            Some("int64") => TypeRef::primitive(PrimitiveType::Long),
            _ => TypeRef::primitive(PrimitiveType::Int),
        },
        Some("number") => match format {
            Some("float") => TypeRef::primitive(PrimitiveType::Float),
            _ => TypeRef::primitive(PrimitiveType::Double),
        },
        Some("boolean") => TypeRef::primitive(PrimitiveType::Boolean),
        Some("array") => TypeRef::list(map_optional(schema.items.as_deref())),
        _ => TypeRef::JsonElement,
    }
}

/// Map an optional schema; an absent schema is untyped.
pub fn map_optional(schema: Option<&Schema>) -> TypeRef {
    schema.map_or(TypeRef::JsonElement, map_schema)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn map_json(json: serde_json::Value) -> TypeRef {
        let schema: Schema = serde_json::from_value(json).unwrap();
        map_schema(&schema)
    }

    #[test]
    fn test_string_ignores_format() {
        for format in [None, Some("date-time"), Some("uuid"), Some("byte")] {
            let mut json = serde_json::json!({ "type": "string" });
            if let Some(f) = format {
                json["format"] = serde_json::json!(f);
            }
            assert_eq!(map_json(json), TypeRef::primitive(PrimitiveType::String));
        }
    }

    #[test]
    fn test_integer_formats() {
        assert_eq!(
            map_json(serde_json::json!({ "type": "integer", "format": "int64" })),
            TypeRef::primitive(PrimitiveType::Long)
        );
        assert_eq!(
            map_json(serde_json::json!({ "type": "integer", "format": "int32" })),
            TypeRef::primitive(PrimitiveType::Int)
        );
        assert_eq!(
            map_json(serde_json::json!({ "type": "integer" })),
            TypeRef::primitive(PrimitiveType::Int)
        );
    }

    #[test]
    fn test_number_formats() {
        assert_eq!(
            map_json(serde_json::json!({ "type": "number", "format": "float" })),
            TypeRef::primitive(PrimitiveType::Float)
        );
        assert_eq!(
            map_json(serde_json::json!({ "type": "number", "format": "double" })),
            TypeRef::primitive(PrimitiveType::Double)
        );
        assert_eq!(
            map_json(serde_json::json!({ "type": "number" })),
            TypeRef::primitive(PrimitiveType::Double)
        );
    }

    #[test]
    fn test_boolean() {
        assert_eq!(
            map_json(serde_json::json!({ "type": "boolean" })),
            TypeRef::primitive(PrimitiveType::Boolean)
        );
    }

    #[test]
    fn test_arrays() {
        assert_eq!(
            map_json(serde_json::json!({ "type": "array", "items": { "type": "integer" } })),
            TypeRef::list(TypeRef::primitive(PrimitiveType::Int))
        );
        assert_eq!(
            map_json(serde_json::json!({ "type": "array" })),
            TypeRef::list(TypeRef::JsonElement)
        );
        assert_eq!(
            map_json(serde_json::json!({
                "type": "array",
                "items": { "type": "array", "items": { "$ref": "#/components/schemas/Track" } }
            })),
            TypeRef::list(TypeRef::list(TypeRef::reference("Track")))
        );
    }

    #[test]
    fn test_ref_wins_over_type() {
        assert_eq!(
            map_json(serde_json::json!({ "$ref": "#/components/schemas/Pet", "type": "string" })),
            TypeRef::reference("Pet")
        );
    }

    #[test]
    fn test_ref_uses_last_segment_verbatim() {
        assert_eq!(
            map_json(serde_json::json!({ "$ref": "#/components/schemas/" })),
            TypeRef::reference("")
        );
        assert_eq!(
            map_json(serde_json::json!({ "$ref": "#/components/schemas/Missing" })),
            TypeRef::reference("Missing")
        );
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(map_json(serde_json::json!({})), TypeRef::JsonElement);
        assert_eq!(
            map_json(serde_json::json!({ "type": "object", "properties": { "a": { "type": "string" } } })),
            TypeRef::JsonElement
        );
        assert_eq!(map_json(serde_json::json!({ "type": "file" })), TypeRef::JsonElement);
        assert_eq!(map_json(serde_json::json!({ "type": 7 })), TypeRef::JsonElement);
        assert_eq!(
            map_json(serde_json::json!({ "oneOf": [{ "type": "string" }] })),
            TypeRef::JsonElement
        );
        assert_eq!(map_optional(None), TypeRef::JsonElement);
    }

    #[test]
    fn test_nullable_type_array() {
        assert_eq!(
            map_json(serde_json::json!({ "type": ["string", "null"] })),
            TypeRef::primitive(PrimitiveType::String)
        );
    }
}
