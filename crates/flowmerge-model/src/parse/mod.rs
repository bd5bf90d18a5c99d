mod json;
mod yaml;

use crate::k8s::{ConfigMap, Resource};
use crate::platform::Platform;
use crate::workflow::Workflow;
use flowmerge_core::{FieldPath, StructuredIssue};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use json::parse_json;
pub use yaml::parse_yaml;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Auto,
    Json,
    Yaml,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceDocument {
    Workflow(Workflow),
    Platform(Platform),
    ConfigMap(ConfigMap),
}

impl ResourceDocument {
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceDocument::Workflow(_) => Workflow::KIND,
            ResourceDocument::Platform(_) => Platform::KIND,
            ResourceDocument::ConfigMap(_) => ConfigMap::KIND,
        }
    }
}

pub fn parse_document(input: &str) -> Result<ResourceDocument, Vec<StructuredIssue>> {
    parse_document_with_format(input, DocumentFormat::Auto)
}

/// Parses a single resource and dispatches on its `kind`.
pub fn parse_document_with_format(
    input: &str,
    format: DocumentFormat,
) -> Result<ResourceDocument, Vec<StructuredIssue>> {
    let value = parse_value(input, format)?;
    let kind = extract_kind(&value)?;

    let document = if kind == Workflow::KIND {
        ResourceDocument::Workflow(parse_typed_document(value, &kind)?)
    } else if kind == Platform::KIND {
        ResourceDocument::Platform(parse_typed_document(value, &kind)?)
    } else if kind == ConfigMap::KIND {
        ResourceDocument::ConfigMap(parse_typed_document(value, &kind)?)
    } else {
        return Err(vec![StructuredIssue::error(
            "parse_error",
            FieldPath::root().key("kind"),
            format!("unsupported resource kind: {kind}"),
            "parse.unsupported_kind",
        )]);
    };

    Ok(document)
}

pub fn parse_workflow(input: &str) -> Result<Workflow, Vec<StructuredIssue>> {
    match parse_document(input)? {
        ResourceDocument::Workflow(workflow) => Ok(workflow),
        other => Err(vec![unexpected_kind(Workflow::KIND, other.kind())]),
    }
}

pub fn parse_platform(input: &str) -> Result<Platform, Vec<StructuredIssue>> {
    match parse_document(input)? {
        ResourceDocument::Platform(platform) => Ok(platform),
        other => Err(vec![unexpected_kind(Platform::KIND, other.kind())]),
    }
}

fn parse_value(input: &str, format: DocumentFormat) -> Result<Value, Vec<StructuredIssue>> {
    match format {
        DocumentFormat::Auto => {
            if looks_like_json(input) {
                parse_json(input)
            } else {
                parse_yaml(input)
            }
        }
        DocumentFormat::Json => parse_json(input),
        DocumentFormat::Yaml => parse_yaml(input),
    }
}

fn looks_like_json(input: &str) -> bool {
    let trimmed = input.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

fn extract_kind(value: &Value) -> Result<String, Vec<StructuredIssue>> {
    value
        .as_object()
        .and_then(|obj| obj.get("kind"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            vec![StructuredIssue::error(
                "parse_error",
                FieldPath::root(),
                "document must contain string field `kind`",
                "parse.kind_required",
            )]
        })
}

fn parse_typed_document<T: DeserializeOwned>(value: Value, kind: &str) -> Result<T, Vec<StructuredIssue>> {
    serde_json::from_value::<T>(value).map_err(|err| {
        vec![StructuredIssue::error(
            "parse_error",
            FieldPath::root(),
            format!("typed parse failed for kind {kind}: {err}"),
            "parse.typed_deserialize_error",
        )]
    })
}

fn unexpected_kind(expected: &str, found: &str) -> StructuredIssue {
    StructuredIssue::error(
        "parse_error",
        FieldPath::root().key("kind"),
        format!("expected kind {expected}, found {found}"),
        "parse.unexpected_kind",
    )
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
