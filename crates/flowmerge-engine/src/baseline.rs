//! The default container, pod and properties state of a workflow, computed from its
//! identity and the platform defaults only.

use crate::error::EngineError;
use crate::names::{
    DEFAULT_CONTAINER_NAME, HTTP_PORT_NAME, LIVENESS_PATH, READINESS_PATH, STARTUP_PATH,
};
use flowmerge_core::{FieldPath, PropertiesDocument};
use flowmerge_model::{
    Container, ContainerPort, HttpGetAction, IntOrString, PlatformDefaults, PodSpec, Probe,
    Workflow, WorkflowMode,
};

pub const HTTP_PORT_PROPERTY: &str = "quarkus.http.port";
pub const HTTP_HOST_PROPERTY: &str = "quarkus.http.host";
pub const SERVICE_URL_PROPERTY: &str = "kogito.service.url";
pub const KNATIVE_HEALTH_PROPERTY: &str = "org.kie.kogito.addons.knative.eventing.health-enabled";
pub const DEV_SERVICES_PROPERTY: &str = "quarkus.devservices.enabled";
pub const KOGITO_DEV_SERVICES_PROPERTY: &str = "quarkus.kogito.devservices.enabled";

const PROBE_TIMEOUT_SECONDS: i32 = 10;
const PROBE_PERIOD_SECONDS: i32 = 15;
const PROBE_FAILURE_THRESHOLD: i32 = 10;
const DNS_LABEL_MAX_LEN: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    pub container: Container,
    /// Pod spec holding the main container as its only entry.
    pub pod_spec: PodSpec,
    pub properties: PropertiesDocument,
}

pub fn build_baseline(
    workflow: &Workflow,
    platform: &PlatformDefaults,
) -> Result<Baseline, EngineError> {
    validate_identity(workflow)?;

    let container = main_container(workflow, platform);
    let pod_spec = PodSpec {
        containers: vec![container.clone()],
        ..PodSpec::default()
    };
    Ok(Baseline {
        container,
        pod_spec,
        properties: properties_seed(workflow, platform),
    })
}

/// Seed entries of the managed properties document.
pub fn properties_seed(workflow: &Workflow, platform: &PlatformDefaults) -> PropertiesDocument {
    let mut seed = PropertiesDocument::new();
    seed.insert(HTTP_PORT_PROPERTY, platform.network.port.to_string());
    seed.insert(HTTP_HOST_PROPERTY, platform.network.host.as_str());
    seed.insert(
        SERVICE_URL_PROPERTY,
        format!("http://{}.{}", workflow.name(), workflow.namespace()),
    );
    seed.insert(KNATIVE_HEALTH_PROPERTY, "false");
    if workflow.mode() == WorkflowMode::Development {
        seed.insert(DEV_SERVICES_PROPERTY, "false");
        seed.insert(KOGITO_DEV_SERVICES_PROPERTY, "false");
    }
    seed
}

fn main_container(workflow: &Workflow, platform: &PlatformDefaults) -> Container {
    let image = match (workflow.mode(), platform.dev_image.as_deref()) {
        (WorkflowMode::Development, Some(dev_image)) if !dev_image.is_empty() => dev_image,
        _ => platform.image.as_str(),
    };
    Container {
        name: DEFAULT_CONTAINER_NAME.to_string(),
        image: image.to_string(),
        ports: vec![ContainerPort {
            name: HTTP_PORT_NAME.to_string(),
            container_port: i32::from(platform.network.port),
            protocol: Some("TCP".to_string()),
        }],
        liveness_probe: Some(http_probe(LIVENESS_PATH)),
        readiness_probe: Some(http_probe(READINESS_PATH)),
        startup_probe: Some(http_probe(STARTUP_PATH)),
        ..Container::default()
    }
}

fn http_probe(path: &str) -> Probe {
    Probe {
        http_get: Some(HttpGetAction {
            path: path.to_string(),
            port: IntOrString::String(HTTP_PORT_NAME.to_string()),
            scheme: None,
        }),
        initial_delay_seconds: None,
        period_seconds: Some(PROBE_PERIOD_SECONDS),
        timeout_seconds: Some(PROBE_TIMEOUT_SECONDS),
        failure_threshold: Some(PROBE_FAILURE_THRESHOLD),
    }
}

pub(crate) fn validate_identity(workflow: &Workflow) -> Result<(), EngineError> {
    for (field, value) in [("name", workflow.name()), ("namespace", workflow.namespace())] {
        if !is_dns_label(value) {
            let message = if value.is_empty() {
                format!("workflow {field} is required")
            } else {
                format!("workflow {field} `{value}` is not a valid DNS-1123 label")
            };
            return Err(EngineError::configuration(
                FieldPath::keys(&["metadata", field]),
                message,
                "baseline.invalid_identity",
            ));
        }
    }
    Ok(())
}

pub(crate) fn is_dns_label(value: &str) -> bool {
    let bytes = value.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    bytes.len() <= DNS_LABEL_MAX_LEN
        && first.is_ascii_alphanumeric()
        && last.is_ascii_alphanumeric()
        && bytes
            .iter()
            .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit() || *byte == b'-')
}

#[cfg(test)]
#[path = "baseline_test.rs"]
mod tests;
