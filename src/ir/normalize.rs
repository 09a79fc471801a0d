//! Normalization from an OpenAPI document to IR.
//!
//! This module handles the operation side of the document:
//! - Path item walking and HTTP verb expansion
//! - Parameter merging (path-level, then operation-level)
//! - Request body and success response selection
//! - Tag grouping into interfaces
//!
//! Component schemas are handled in `models`.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::spec::{Components, MediaType, OpenApiDocument, Operation, Parameter, PathItem, RefOr};

use super::api::{ApiInterfaceIR, HttpMethod, OpenApiIR, OperationIR, ParameterIR, ParameterLocation};
use super::mapper::map_optional;
use super::models::normalize_models;
use super::types::TypeRef;
use super::utils::{interface_name, is_json_media_type, to_camel_case};

/// Success responses in priority order. The first one declared wins.
const SUCCESS_STATUS_CODES: [&str; 10] = [
    "200", "201", "202", "203", "204", "205", "206", "207", "2XX", "default",
];

/// Normalize an OpenAPI document into IR
pub fn normalize_document(document: &OpenApiDocument) -> OpenApiIR {
    let empty = Components::default();
    let components = document.components.as_ref().unwrap_or(&empty);

    let interfaces = normalize_interfaces(document, components);
    let models = normalize_models(components);

    OpenApiIR {
        title: document.info.title.clone(),
        version: document.info.version.clone(),
        interfaces,
        models,
    }
}

/// Operations of a path item in a fixed verb order
fn path_operations(item: &PathItem) -> [(HttpMethod, Option<&Operation>); 5] {
    [
        (HttpMethod::Get, item.get.as_ref()),
        (HttpMethod::Post, item.post.as_ref()),
        (HttpMethod::Put, item.put.as_ref()),
        (HttpMethod::Patch, item.patch.as_ref()),
        (HttpMethod::Delete, item.delete.as_ref()),
    ]
}

/// Walk every path item and group operations by interface name
fn normalize_interfaces(document: &OpenApiDocument, components: &Components) -> Vec<ApiInterfaceIR> {
    let mut groups: IndexMap<String, Vec<OperationIR>> = IndexMap::new();

    for (path, item) in &document.paths {
        for (method, op) in path_operations(item) {
            let Some(op) = op else {
                continue;
            };

            let interface = interface_name(op.tags.first().map(String::as_str));
            let mut op_ir = normalize_operation(path, method, op, &item.parameters, components);

            let operations = groups.entry(interface).or_default();
            op_ir.function_name = unique_function_name(&op_ir.function_name, operations);
            operations.push(op_ir);
        }
    }

    // Tag descriptions keyed by the interface name they produce
    let descriptions: HashMap<String, &str> = document
        .tags
        .iter()
        .filter_map(|tag| {
            tag.description
                .as_deref()
                .map(|d| (interface_name(Some(tag.name.as_str())), d))
        })
        .collect();

    groups
        .into_iter()
        .map(|(name, operations)| ApiInterfaceIR {
            description: descriptions.get(&name).map(|d| (*d).to_string()),
            name,
            operations,
        })
        .collect()
}

/// Suffix a function name with a counter until it is unique in its interface
fn unique_function_name(name: &str, existing: &[OperationIR]) -> String {
    let taken = |candidate: &str| existing.iter().any(|o| o.function_name == candidate);
    if !taken(name) {
        return name.to_string();
    }

    let mut counter = 2;
    loop {
        let candidate = format!("{name}{counter}");
        if !taken(&candidate) {
            warn!(
                function_name = name,
                renamed = %candidate,
                "Duplicate function name in interface, renaming."
            );
            return candidate;
        }
        counter += 1;
    }
}

/// Normalize an operation
fn normalize_operation(
    path: &str,
    method: HttpMethod,
    op: &Operation,
    path_params: &[RefOr<Parameter>],
    components: &Components,
) -> OperationIR {
    let function_name = operation_name(path, method, op);
    debug!(
        path,
        method = method.as_str(),
        function_name = %function_name,
        "Normalizing operation."
    );

    OperationIR {
        parameters: normalize_params(path_params, &op.parameters, components),
        request_body: normalize_body(op, components),
        response_type: normalize_response(op, components),
        function_name,
        http_method: method,
        path: path.to_string(),
        summary: op.summary.clone(),
        description: op.description.clone(),
        deprecated: op.deprecated,
    }
}

/// Get operation name: camelCased operationId, or method + path segments
fn operation_name(path: &str, method: HttpMethod, op: &Operation) -> String {
    if let Some(id) = &op.operation_id {
        let name = to_camel_case(id);
        if !name.is_empty() {
            return name;
        }
    }

    let mut raw = method.as_str().to_lowercase();
    for segment in path.split('/') {
        let segment = segment.trim_start_matches('{').trim_end_matches('}');
        if !segment.is_empty() {
            raw.push('_');
            raw.push_str(segment);
        }
    }
    to_camel_case(&raw)
}

/// Normalize parameters - path-level first, then operation-level overrides
fn normalize_params(
    path_params: &[RefOr<Parameter>],
    op_params: &[RefOr<Parameter>],
    components: &Components,
) -> Vec<ParameterIR> {
    let mut params: Vec<ParameterIR> = path_params
        .iter()
        .filter_map(|p| resolve_param(p, components))
        .filter_map(normalize_param)
        .collect();

    for param in op_params
        .iter()
        .filter_map(|p| resolve_param(p, components))
        .filter_map(normalize_param)
    {
        // Same name and location: the operation-level declaration replaces it in place
        if let Some(existing) = params
            .iter_mut()
            .find(|e| e.name == param.name && e.location == param.location)
        {
            *existing = param;
        } else {
            params.push(param);
        }
    }

    params
}

fn resolve_param<'a>(param: &'a RefOr<Parameter>, components: &'a Components) -> Option<&'a Parameter> {
    let resolved = param.resolve(&components.parameters);
    if resolved.is_none() {
        warn!(
            ref_path = param.ref_path().unwrap_or_default(),
            "Skipping unresolvable parameter reference."
        );
    }
    resolved
}

/// Normalize a single parameter
fn normalize_param(p: &Parameter) -> Option<ParameterIR> {
    let location = match p.location.as_str() {
        "path" => ParameterLocation::Path,
        "query" => ParameterLocation::Query,
        "header" => ParameterLocation::Header,
        other => {
            debug!(name = %p.name, location = other, "Skipping unsupported parameter location.");
            return None;
        }
    };

    Some(ParameterIR {
        name: p.name.clone(),
        location,
        ty: map_optional(p.schema.as_ref()),
        // Path parameters are always required, whatever the document says
        required: location == ParameterLocation::Path || p.required.unwrap_or(false),
        description: p.description.clone(),
    })
}

/// Pick the JSON media type: exact `application/json`, then any `*+json`
fn json_media_type(content: &IndexMap<String, MediaType>) -> Option<&MediaType> {
    content.get("application/json").or_else(|| {
        content
            .iter()
            .find(|(media_type, _)| is_json_media_type(media_type))
            .map(|(_, m)| m)
    })
}

/// Normalize request body
fn normalize_body(op: &Operation, components: &Components) -> Option<TypeRef> {
    let body = op.request_body.as_ref()?;
    let Some(body) = body.resolve(&components.request_bodies) else {
        warn!(
            ref_path = body.ref_path().unwrap_or_default(),
            "Unresolvable request body reference, treating as no body."
        );
        return None;
    };

    json_media_type(&body.content).map(|m| map_optional(m.schema.as_ref()))
}

/// Normalize response - first success status in priority order
fn normalize_response(op: &Operation, components: &Components) -> TypeRef {
    let selected = SUCCESS_STATUS_CODES.iter().find_map(|code| {
        op.responses
            .iter()
            .find(|(status, _)| status.eq_ignore_ascii_case(code))
    });

    let Some((status, response)) = selected else {
        return TypeRef::Unit;
    };

    let Some(response) = response.resolve(&components.responses) else {
        warn!(
            status = %status,
            ref_path = response.ref_path().unwrap_or_default(),
            "Unresolvable response reference, treating as no content."
        );
        return TypeRef::Unit;
    };

    json_media_type(&response.content).map_or(TypeRef::Unit, |m| map_optional(m.schema.as_ref()))
}
