//! Loading platform defaults from a file.

use flowmerge_core::{contains_deferred_expression, FieldPath, StructuredIssue};
use flowmerge_model::PlatformDefaults;
use std::fs;
use std::path::Path;

const ENV_PLACEHOLDER_OPEN: &str = "${env:";

#[derive(Debug, thiserror::Error)]
pub enum PlatformConfigError {
    #[error("read platform config failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("platform config parse failed: {0}")]
    Parse(String),
    #[error("platform config validation failed: {0:?}")]
    Validation(Vec<StructuredIssue>),
}

/// Reads platform defaults from YAML or JSON, picked by extension.
///
/// `${env:NAME}` placeholders are replaced from the process environment before
/// decoding. Any other `${...}` text is left alone, so runtime expressions in
/// property values survive.
pub fn load_platform_defaults(path: &Path) -> Result<PlatformDefaults, PlatformConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| PlatformConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let expanded = expand_env_placeholders(raw.as_str()).map_err(PlatformConfigError::Parse)?;
    let defaults: PlatformDefaults = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(expanded.as_str()).map_err(|error| {
            PlatformConfigError::Parse(format!("json decode error: {error}"))
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(expanded.as_str()).map_err(|error| {
            PlatformConfigError::Parse(format!("yaml decode error: {error}"))
        })?,
        _ => serde_yaml::from_str(expanded.as_str())
            .or_else(|_| serde_json::from_str(expanded.as_str()))
            .map_err(|error| PlatformConfigError::Parse(error.to_string()))?,
    };

    let mut issues = validate_platform_defaults(&defaults);
    StructuredIssue::sort_stable(&mut issues);
    if !issues.is_empty() {
        return Err(PlatformConfigError::Validation(issues));
    }
    Ok(defaults)
}

pub fn validate_platform_defaults(defaults: &PlatformDefaults) -> Vec<StructuredIssue> {
    let mut issues = Vec::<StructuredIssue>::new();
    if defaults.image.trim().is_empty() {
        issues.push(config_issue(
            "platform.config.image.non_empty",
            FieldPath::keys(&["image"]),
            "platform image must not be empty".to_string(),
        ));
    }
    if defaults.network.port == 0 {
        issues.push(config_issue(
            "platform.config.network.port_range",
            FieldPath::keys(&["network", "port"]),
            "network port must be between 1 and 65535".to_string(),
        ));
    }
    if defaults.network.host.trim().is_empty() {
        issues.push(config_issue(
            "platform.config.network.host.non_empty",
            FieldPath::keys(&["network", "host"]),
            "network host must not be empty".to_string(),
        ));
    }
    if contains_deferred_expression(&defaults.network.host) {
        issues.push(config_issue(
            "platform.config.network.host.literal",
            FieldPath::keys(&["network", "host"]),
            "network host must be a literal value".to_string(),
        ));
    }
    for key in defaults.properties.keys() {
        if key.trim().is_empty() {
            issues.push(config_issue(
                "platform.config.properties.key_non_empty",
                FieldPath::keys(&["properties"]),
                "property keys must not be empty".to_string(),
            ));
        }
    }
    issues
}

fn config_issue(reference: &str, field_path: FieldPath, message: String) -> StructuredIssue {
    StructuredIssue::error("platform_config_error", field_path, message, reference)
}

fn expand_env_placeholders(input: &str) -> Result<String, String> {
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;
    while let Some(start_offset) = input[cursor..].find(ENV_PLACEHOLDER_OPEN) {
        let start = cursor + start_offset;
        out.push_str(&input[cursor..start]);
        let name_start = start + ENV_PLACEHOLDER_OPEN.len();
        let Some(end_offset) = input[name_start..].find('}') else {
            return Err("unterminated env placeholder `${env:...`".to_string());
        };
        let end = name_start + end_offset;
        let name = &input[name_start..end];
        if name.is_empty() {
            return Err("empty env placeholder `${env:}`".to_string());
        }
        let value = std::env::var(name)
            .map_err(|_| format!("missing env var for placeholder `${{env:{name}}}`"))?;
        out.push_str(value.as_str());
        cursor = end + 1;
    }
    out.push_str(&input[cursor..]);
    Ok(out)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
