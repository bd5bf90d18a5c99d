//! Well-known names shared by the runtime image, the generated objects and the
//! workflow resource.

use flowmerge_model::Workflow;
use std::collections::BTreeMap;

pub const DEFAULT_CONTAINER_NAME: &str = "workflow";
pub const HTTP_PORT_NAME: &str = "http";
pub const SERVICE_PORT: i32 = 80;

pub const APPLICATION_PROPERTIES_FILE_NAME: &str = "application.properties";

pub const APP_LABEL: &str = "app";
pub const WORKFLOW_APP_LABEL: &str = "sonataflow.org/workflow-app";
pub const PROPERTIES_CHECKSUM_ANNOTATION: &str = "sonataflow.org/properties-checksum";

pub const LIVENESS_PATH: &str = "/q/health/live";
pub const READINESS_PATH: &str = "/q/health/ready";
pub const STARTUP_PATH: &str = "/q/health/started";

/// `application-dev.properties` or `application-prod.properties`, the profile file the
/// runtime gives precedence over `application.properties`.
pub fn managed_properties_file_name(workflow: &Workflow) -> String {
    format!("application-{}.properties", workflow.mode().profile())
}

pub fn user_properties_config_map_name(workflow: &Workflow) -> String {
    format!("{}-props", workflow.name())
}

pub fn managed_properties_config_map_name(workflow: &Workflow) -> String {
    format!("{}-managed-props", workflow.name())
}

pub fn workflow_labels(workflow: &Workflow) -> BTreeMap<String, String> {
    BTreeMap::from([
        (APP_LABEL.to_string(), workflow.name().to_string()),
        (WORKFLOW_APP_LABEL.to_string(), workflow.name().to_string()),
    ])
}

#[cfg(test)]
#[path = "names_test.rs"]
mod tests;
