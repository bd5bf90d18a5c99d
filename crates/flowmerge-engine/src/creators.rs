//! Fresh desired objects for a workflow. Visitors converge persisted objects toward
//! what these return.

use crate::baseline::build_baseline;
use crate::error::EngineError;
use crate::merge::merge_pod_spec;
use crate::names::{
    managed_properties_config_map_name, managed_properties_file_name,
    user_properties_config_map_name, workflow_labels, APPLICATION_PROPERTIES_FILE_NAME,
    DEFAULT_CONTAINER_NAME, HTTP_PORT_NAME, SERVICE_PORT,
};
use crate::persistence::{append_persistence_env, resolve_persistence_env};
use crate::properties::reconcile_managed_properties;
use flowmerge_core::{FieldPath, PropertiesDocument};
use flowmerge_model::{
    ConfigMap, Container, Deployment, DeploymentSpec, IntOrString, LabelSelector, ObjectMeta,
    PlatformDefaults, PodSpec, PodTemplateSpec, Service, ServicePort, ServiceSpec, Workflow,
};
use std::collections::BTreeMap;

const DEFAULT_REPLICAS: i32 = 1;

fn object_meta(name: String, workflow: &Workflow) -> ObjectMeta {
    ObjectMeta {
        labels: workflow_labels(workflow),
        ..ObjectMeta::named(name, workflow.namespace())
    }
}

/// Baseline, user override and persistence entries folded into one pod spec.
pub fn workflow_pod_spec(
    workflow: &Workflow,
    platform: &PlatformDefaults,
) -> Result<PodSpec, EngineError> {
    let baseline = build_baseline(workflow, platform)?;
    let mut pod_spec = merge_pod_spec(&baseline.pod_spec, &workflow.spec.pod_template)?;
    if let Some(persistence) = &workflow.spec.persistence {
        let entries = resolve_persistence_env(persistence, workflow.namespace())?;
        append_persistence_env(
            main_container_mut(&mut pod_spec)?,
            entries,
            &workflow.spec.pod_template,
        )?;
    }
    Ok(pod_spec)
}

fn main_container_mut(pod_spec: &mut PodSpec) -> Result<&mut Container, EngineError> {
    pod_spec
        .containers
        .iter_mut()
        .find(|container| container.name == DEFAULT_CONTAINER_NAME)
        .ok_or_else(|| {
            EngineError::configuration(
                FieldPath::keys(&["spec", "podTemplate", "podSpec", "containers"]),
                format!("merged pod spec lacks the `{DEFAULT_CONTAINER_NAME}` container"),
                "merge.main_container_missing",
            )
        })
}

pub fn deployment_creator(
    workflow: &Workflow,
    platform: &PlatformDefaults,
) -> Result<Deployment, EngineError> {
    let pod_spec = workflow_pod_spec(workflow, platform)?;
    let labels = workflow_labels(workflow);
    Ok(Deployment {
        metadata: object_meta(workflow.name().to_string(), workflow),
        spec: DeploymentSpec {
            replicas: Some(workflow.spec.pod_template.replicas.unwrap_or(DEFAULT_REPLICAS)),
            selector: LabelSelector {
                match_labels: labels.clone(),
            },
            template: PodTemplateSpec {
                metadata: ObjectMeta {
                    labels,
                    ..ObjectMeta::default()
                },
                spec: pod_spec,
            },
        },
        ..Deployment::default()
    })
}

pub fn service_creator(workflow: &Workflow) -> Service {
    Service {
        metadata: object_meta(workflow.name().to_string(), workflow),
        spec: ServiceSpec {
            selector: workflow_labels(workflow),
            ports: vec![ServicePort {
                name: HTTP_PORT_NAME.to_string(),
                port: SERVICE_PORT,
                target_port: IntOrString::String(HTTP_PORT_NAME.to_string()),
                protocol: Some("TCP".to_string()),
            }],
            service_type: None,
        },
        ..Service::default()
    }
}

/// The user-owned document, created empty. Its content is never generated.
pub fn user_props_config_map_creator(workflow: &Workflow) -> ConfigMap {
    ConfigMap {
        metadata: object_meta(user_properties_config_map_name(workflow), workflow),
        data: BTreeMap::from([(APPLICATION_PROPERTIES_FILE_NAME.to_string(), String::new())]),
        ..ConfigMap::default()
    }
}

pub fn managed_props_config_map_creator(
    workflow: &Workflow,
    platform: &PlatformDefaults,
    user_document: &PropertiesDocument,
) -> Result<ConfigMap, EngineError> {
    let managed = reconcile_managed_properties(
        user_document,
        workflow,
        platform,
        workflow.spec.persistence.as_ref(),
    )?;
    Ok(ConfigMap {
        metadata: object_meta(managed_properties_config_map_name(workflow), workflow),
        data: BTreeMap::from([(managed_properties_file_name(workflow), managed.render())]),
        ..ConfigMap::default()
    })
}

#[cfg(test)]
#[path = "creators_test.rs"]
mod tests;
