//! Model extraction from `components.schemas`.
//!
//! Every schema entry becomes exactly one [`ModelIR`]. Composition is
//! flattened rather than modeled:
//! - `allOf`: properties and required sets of every member are merged
//! - `oneOf` / `anyOf`: only the first listed member contributes
//!
//! `$ref` members are resolved against the component schemas. When the same
//! property name is contributed more than once, the last declaration wins for
//! its type, default, and description, but it keeps the position of its first
//! appearance.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tracing::debug;

use crate::spec::{Components, Schema, ref_name};

use super::api::{ModelIR, PropertyIR};
use super::mapper::map_schema;
use super::utils::render_literal;

/// Properties gathered while walking a composed schema.
#[derive(Debug, Clone, Default)]
struct PropertySet<'a> {
    properties: IndexMap<&'a str, &'a Schema>,
    required: HashSet<&'a str>,
}

impl<'a> PropertySet<'a> {
    /// Apply `other` as if its declarations were walked here: existing names
    /// keep their position and take the later schema.
    fn merge(&mut self, other: PropertySet<'a>) {
        self.properties.extend(other.properties);
        self.required.extend(other.required);
    }

    fn into_properties(self) -> Vec<PropertyIR> {
        let required = self.required;
        self.properties
            .into_iter()
            .map(|(name, schema)| PropertyIR {
                name: name.to_string(),
                ty: map_schema(schema),
                required: required.contains(name),
                default_value: schema.default.as_ref().and_then(render_literal),
                description: schema.description.clone(),
            })
            .collect()
    }
}

/// Flattens component schemas, caching each component's property set so
/// schemas shared through many refs are walked once.
#[derive(Debug)]
struct Flattener<'a> {
    components: &'a Components,
    /// Component names on the current resolution path.
    visiting: HashSet<&'a str>,
    cache: HashMap<&'a str, PropertySet<'a>>,
    /// Number of circular refs cut so far. A set computed while a cut
    /// happened depends on the path that reached it and is not cached.
    cuts: usize,
}

impl<'a> Flattener<'a> {
    fn new(components: &'a Components) -> Self {
        Self {
            components,
            visiting: HashSet::new(),
            cache: HashMap::new(),
            cuts: 0,
        }
    }

    /// Flattened property set of the component `name`.
    fn component(&mut self, name: &'a str, schema: &'a Schema) -> PropertySet<'a> {
        if let Some(cached) = self.cache.get(name) {
            return cached.clone();
        }

        let cuts = self.cuts;
        let mut set = PropertySet::default();
        self.visiting.insert(name);
        self.collect(schema, &mut set);
        self.visiting.remove(name);

        if self.cuts == cuts {
            self.cache.insert(name, set.clone());
        }
        set
    }

    /// Merge the properties a schema contributes into `set`.
    fn collect(&mut self, schema: &'a Schema, set: &mut PropertySet<'a>) {
        if let Some(ref_path) = &schema.ref_path {
            let target_name = ref_name(ref_path);
            if self.visiting.contains(target_name) {
                debug!(schema = target_name, "Cutting circular schema reference.");
                self.cuts += 1;
                return;
            }
            let components = self.components;
            match components.schemas.get_key_value(target_name) {
                Some((name, target)) => {
                    let resolved = self.component(name, target);
                    set.merge(resolved);
                }
                None => debug!(ref_path = %ref_path, "Dangling schema reference contributes no properties."),
            }
            return;
        }

        if !schema.all_of.is_empty() {
            for member in &schema.all_of {
                self.collect(member, set);
            }
        } else if let Some(first) = schema.one_of.first().or_else(|| schema.any_of.first()) {
            self.collect(first, set);
        }

        for (name, property) in &schema.properties {
            // insert keeps the original position when the key already exists
            set.properties.insert(name.as_str(), property);
        }
        set.required
            .extend(schema.required.iter().map(String::as_str));
    }
}

/// Normalize component schemas into models, in declaration order
pub fn normalize_models(components: &Components) -> Vec<ModelIR> {
    let mut flattener = Flattener::new(components);
    components
        .schemas
        .iter()
        .map(|(name, schema)| normalize_model(name, schema, &mut flattener))
        .collect()
}

/// Convert one component schema to a model
fn normalize_model<'a>(
    name: &'a str,
    schema: &'a Schema,
    flattener: &mut Flattener<'a>,
) -> ModelIR {
    let set = flattener.component(name, schema);

    debug!(
        model = name,
        properties = set.properties.len(),
        "Normalized component schema."
    );

    ModelIR {
        name: name.to_string(),
        properties: set.into_properties(),
        description: schema.description.clone(),
        enum_values: schema.enum_values.iter().filter_map(render_literal).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ir::types::{PrimitiveType, TypeRef};

    fn components(json: serde_json::Value) -> Components {
        serde_json::from_value(serde_json::json!({ "schemas": json })).unwrap()
    }

    fn names(model: &ModelIR) -> Vec<&str> {
        model.properties.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_plain_object() {
        let components = components(serde_json::json!({
            "Track": {
                "type": "object",
                "description": "A music track",
                "required": ["id"],
                "properties": {
                    "id": { "type": "integer", "format": "int64" },
                    "explicit": { "type": "boolean", "default": false, "description": "Parental advisory" },
                    "tags": { "type": "array", "items": { "type": "string" } }
                }
            }
        }));
        let models = normalize_models(&components);
        assert_eq!(models.len(), 1);

        let track = &models[0];
        assert_eq!(track.name, "Track");
        assert_eq!(track.description.as_deref(), Some("A music track"));
        assert_eq!(names(track), vec!["id", "explicit", "tags"]);

        let id = track.property("id").unwrap();
        assert!(id.required);
        assert_eq!(id.ty, TypeRef::primitive(PrimitiveType::Long));

        let explicit = track.property("explicit").unwrap();
        assert!(!explicit.required);
        assert_eq!(explicit.default_value.as_deref(), Some("false"));
        assert_eq!(explicit.description.as_deref(), Some("Parental advisory"));

        assert_eq!(
            track.property("tags").unwrap().ty,
            TypeRef::list(TypeRef::primitive(PrimitiveType::String))
        );
    }

    #[test]
    fn test_all_of_union_with_ref() {
        let components = components(serde_json::json!({
            "Base": {
                "type": "object",
                "required": ["id"],
                "properties": { "id": { "type": "string" } }
            },
            "Extended": {
                "allOf": [
                    { "$ref": "#/components/schemas/Base" },
                    {
                        "type": "object",
                        "required": ["name"],
                        "properties": { "name": { "type": "string" } }
                    }
                ]
            }
        }));
        let models = normalize_models(&components);
        let extended = &models[1];
        assert_eq!(names(extended), vec!["id", "name"]);
        assert!(extended.properties.iter().all(|p| p.required));
    }

    #[test]
    fn test_all_of_conflict_last_member_wins() {
        let components = components(serde_json::json!({
            "Conflict": {
                "allOf": [
                    {
                        "properties": {
                            "value": { "type": "string", "description": "first" },
                            "other": { "type": "boolean" }
                        }
                    },
                    {
                        "required": ["value"],
                        "properties": { "value": { "type": "integer", "default": 3 } }
                    }
                ]
            }
        }));
        let model = &normalize_models(&components)[0];
        assert_eq!(names(model), vec!["value", "other"]);

        let value = model.property("value").unwrap();
        assert_eq!(value.ty, TypeRef::primitive(PrimitiveType::Int));
        assert_eq!(value.default_value.as_deref(), Some("3"));
        assert_eq!(value.description, None);
        assert!(value.required);
    }

    #[test]
    fn test_one_of_takes_first_branch_only() {
        let components = components(serde_json::json!({
            "Payment": {
                "oneOf": [
                    { "type": "object", "properties": { "cardNumber": { "type": "string" } } },
                    { "type": "object", "properties": { "iban": { "type": "string" }, "bic": { "type": "string" } } }
                ]
            }
        }));
        let model = &normalize_models(&components)[0];
        assert_eq!(names(model), vec!["cardNumber"]);
    }

    #[test]
    fn test_any_of_first_ref_branch() {
        let components = components(serde_json::json!({
            "Cat": { "properties": { "purrs": { "type": "boolean" } } },
            "Dog": { "properties": { "barks": { "type": "boolean" } } },
            "Pet": {
                "anyOf": [
                    { "$ref": "#/components/schemas/Cat" },
                    { "$ref": "#/components/schemas/Dog" }
                ]
            }
        }));
        let models = normalize_models(&components);
        assert_eq!(names(&models[2]), vec!["purrs"]);
    }

    #[test]
    fn test_self_reference_terminates() {
        let components = components(serde_json::json!({
            "Node": {
                "allOf": [
                    { "$ref": "#/components/schemas/Node" },
                    { "properties": { "children": { "type": "array", "items": { "$ref": "#/components/schemas/Node" } } } }
                ]
            }
        }));
        let model = &normalize_models(&components)[0];
        assert_eq!(names(model), vec!["children"]);
        assert_eq!(
            model.properties[0].ty,
            TypeRef::list(TypeRef::reference("Node"))
        );
    }

    #[test]
    fn test_mutual_refs_flatten_from_each_side() {
        let components = components(serde_json::json!({
            "A": { "allOf": [{ "$ref": "#/components/schemas/B" }, { "properties": { "a": { "type": "string" } } }] },
            "B": { "allOf": [{ "$ref": "#/components/schemas/A" }, { "properties": { "b": { "type": "string" } } }] }
        }));
        let models = normalize_models(&components);
        assert_eq!(names(&models[0]), vec!["b", "a"]);
        assert_eq!(names(&models[1]), vec!["a", "b"]);
    }

    #[test]
    fn test_deep_shared_all_of_chain() {
        const DEPTH: usize = 24;
        let mut schemas = serde_json::Map::new();
        for level in 0..DEPTH {
            let next = format!("#/components/schemas/S{}", level + 1);
            schemas.insert(
                format!("S{level}"),
                serde_json::json!({
                    "allOf": [{ "$ref": next }, { "$ref": next }],
                    "required": [format!("p{level}")],
                    "properties": { format!("p{level}"): { "type": "integer" } }
                }),
            );
        }
        schemas.insert(
            format!("S{DEPTH}"),
            serde_json::json!({ "properties": { "leaf": { "type": "boolean" } } }),
        );

        let components = components(serde_json::Value::Object(schemas));
        let models = normalize_models(&components);
        assert_eq!(models.len(), DEPTH + 1);

        let root = &models[0];
        assert_eq!(root.properties.len(), DEPTH + 1);
        assert_eq!(root.properties[0].name, "leaf");
        assert_eq!(root.properties[DEPTH].name, "p0");
        assert!(!root.property("leaf").unwrap().required);
        assert!(root.property("p7").unwrap().required);
    }

    #[test]
    fn test_dangling_ref_member_contributes_nothing() {
        let components = components(serde_json::json!({
            "Orphan": {
                "allOf": [
                    { "$ref": "#/components/schemas/Missing" },
                    { "properties": { "id": { "type": "string" } } }
                ]
            }
        }));
        let model = &normalize_models(&components)[0];
        assert_eq!(names(model), vec!["id"]);
    }

    #[test]
    fn test_non_object_schemas_still_produce_models() {
        let components = components(serde_json::json!({
            "Genre": { "type": "string", "enum": ["rock", "jazz", "pop"] },
            "Ids": { "type": "array", "items": { "type": "integer" } },
            "Anything": {}
        }));
        let models = normalize_models(&components);
        assert_eq!(models.len(), 3);
        assert_eq!(models[0].enum_values, vec!["rock", "jazz", "pop"]);
        assert!(models.iter().all(|m| m.properties.is_empty()));
    }
}
