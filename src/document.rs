//! Loading OpenAPI text into the typed document model.
//!
//! Loading happens in three steps: syntax (JSON or YAML into a generic tree),
//! a structural check of the mandatory top-level fields that reports every
//! problem at once, and finally typed deserialization.

use serde_json::Value;
use serde_yaml::Value as YamlValue;
use tracing::debug;

use crate::error::{DocumentError, DocumentResult};
use crate::spec::OpenApiDocument;

/// Parse OpenAPI text (JSON or YAML) into an [`OpenApiDocument`].
pub fn load_document(text: &str) -> DocumentResult<OpenApiDocument> {
    if text.trim().is_empty() {
        return Err(vec![DocumentError::Empty]);
    }

    let mut tree = parse_tree(text).map_err(|e| vec![e])?;
    check_structure(&mut tree)?;
    drop_extensions(&mut tree);

    serde_json::from_value(tree).map_err(|e| vec![DocumentError::Structure(e.to_string())])
}

/// Parse text into a generic tree. JSON-looking input is tried as JSON first
/// and falls back to YAML (flow mappings also start with `{`).
fn parse_tree(text: &str) -> Result<Value, DocumentError> {
    if text.trim_start().starts_with('{') {
        match serde_json::from_str::<Value>(text) {
            Ok(tree) => {
                debug!(syntax = "json", len = text.len(), "Parsed OpenAPI document tree.");
                return Ok(tree);
            }
            Err(json_err) => {
                return parse_yaml(text).map_err(|_| DocumentError::Syntax(json_err.to_string()));
            }
        }
    }
    parse_yaml(text)
}

fn parse_yaml(text: &str) -> Result<Value, DocumentError> {
    let yaml: YamlValue =
        serde_yaml::from_str(text).map_err(|e| DocumentError::Syntax(e.to_string()))?;
    debug!(syntax = "yaml", len = text.len(), "Parsed OpenAPI document tree.");
    Ok(yaml_to_json(yaml))
}

/// Convert a YAML tree into a JSON tree. Non-string mapping keys (e.g. the
/// unquoted `200:` of a responses map) become their textual form.
fn yaml_to_json(value: YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => yaml_number(&n),
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_json(v)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map_or(Value::Null, Value::Number)
    }
}

fn yaml_key(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Validate the mandatory top-level fields, collecting every problem.
fn check_structure(tree: &mut Value) -> DocumentResult<()> {
    let kind = kind_of(tree);
    let Some(root) = tree.as_object_mut() else {
        return Err(vec![DocumentError::NotAMapping(kind)]);
    };

    let mut errors = Vec::new();
    let swagger = root.get("swagger").map(scalar_text);

    match root.get_mut("openapi") {
        None | Some(Value::Null) => {
            if let Some(swagger) = swagger {
                errors.push(DocumentError::UnsupportedVersion(format!("swagger {swagger}")));
            } else {
                errors.push(DocumentError::MissingField("openapi"));
            }
        }
        Some(version) => {
            coerce_number_to_string(version);
            match version.as_str() {
                Some(v) if v.trim().starts_with("3.") => {}
                Some(v) => errors.push(DocumentError::UnsupportedVersion(v.to_string())),
                None => errors.push(DocumentError::Structure(
                    "'openapi' must be a version string".to_string(),
                )),
            }
        }
    }

    match root.get_mut("info") {
        None | Some(Value::Null) => errors.push(DocumentError::MissingField("info")),
        Some(Value::Object(info)) => {
            if info.get("title").is_none_or(Value::is_null) {
                errors.push(DocumentError::MissingField("info.title"));
            }
            match info.get_mut("version") {
                None | Some(Value::Null) => errors.push(DocumentError::MissingField("info.version")),
                Some(version) => coerce_number_to_string(version),
            }
        }
        Some(_) => errors.push(DocumentError::Structure(
            "'info' must be a mapping".to_string(),
        )),
    }

    match root.get("paths") {
        None | Some(Value::Null) => errors.push(DocumentError::MissingField("paths")),
        Some(Value::Object(_)) => {}
        Some(_) => errors.push(DocumentError::Structure(
            "'paths' must be a mapping".to_string(),
        )),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Remove `x-` extension entries from the maps whose keys are otherwise
/// data: the paths object and every operation's responses object.
fn drop_extensions(tree: &mut Value) {
    let Some(paths) = tree.get_mut("paths").and_then(Value::as_object_mut) else {
        return;
    };
    retain_non_extensions(paths);

    let operations = paths
        .values_mut()
        .filter_map(Value::as_object_mut)
        .flat_map(|item| item.values_mut())
        .filter_map(Value::as_object_mut);
    for op in operations {
        if let Some(responses) = op.get_mut("responses").and_then(Value::as_object_mut) {
            retain_non_extensions(responses);
        }
    }
}

fn retain_non_extensions(map: &mut serde_json::Map<String, Value>) {
    map.retain(|key, _| {
        let extension = key.starts_with("x-");
        if extension {
            debug!(key = %key, "Ignoring specification extension.");
        }
        !extension
    });
}

/// YAML reads `version: 1.0` as a float; versions are strings.
fn coerce_number_to_string(value: &mut Value) {
    if let Value::Number(n) = value {
        *value = Value::String(n.to_string());
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
