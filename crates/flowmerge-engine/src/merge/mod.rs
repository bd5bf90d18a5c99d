//! Layers the user pod-template override onto the baseline pod spec.
//!
//! Precedence for the main container is baseline < `podTemplate.container` < a
//! `podTemplate.podSpec.containers` entry carrying the reserved name. That entry replaces
//! earlier ports and mounts, except ports the basis already declares. Other pod-level
//! containers are sidecars, appended in the order given.

mod container;

use crate::error::EngineError;
use crate::names::DEFAULT_CONTAINER_NAME;
use container::{ensure_unique, merge_container, Precedence};
use flowmerge_core::FieldPath;
use flowmerge_model::{Container, PodSpec, WorkflowPodTemplate};
use std::collections::BTreeSet;
use tracing::debug;

pub fn merge_pod_spec(
    base: &PodSpec,
    template: &WorkflowPodTemplate,
) -> Result<PodSpec, EngineError> {
    let template_path = FieldPath::keys(&["spec", "podTemplate"]);
    let pod_path = template_path.clone().key("podSpec");
    let containers_path = pod_path.clone().key("containers");
    let overrides = &template.pod_spec;

    for (index, container) in overrides.containers.iter().enumerate() {
        if container.name.trim().is_empty() {
            return Err(EngineError::configuration(
                containers_path.clone().index(index).key("name"),
                "pod template containers must be named",
                "merge.container_name_required",
            ));
        }
    }
    ensure_unique(
        &overrides.containers,
        |container| Some(container.name.as_str()),
        &containers_path,
        "name",
        "merge.duplicate_container",
    )?;
    ensure_unique(
        &overrides.volumes,
        |volume| Some(volume.name.as_str()),
        &pod_path.clone().key("volumes"),
        "name",
        "merge.duplicate_volume",
    )?;

    let mut main = base
        .container(DEFAULT_CONTAINER_NAME)
        .cloned()
        .unwrap_or_else(|| Container {
            name: DEFAULT_CONTAINER_NAME.to_string(),
            ..Container::default()
        });
    let mut sidecars = base
        .containers
        .iter()
        .filter(|container| container.name != DEFAULT_CONTAINER_NAME)
        .cloned()
        .collect::<Vec<_>>();

    let protected_ports = main
        .ports
        .iter()
        .map(|port| port.name.clone())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>();

    merge_container(
        &mut main,
        &template.container.to_container(DEFAULT_CONTAINER_NAME),
        &template_path.key("container"),
        Precedence::Existing,
    )?;

    for (index, container) in overrides.containers.iter().enumerate() {
        if container.name == DEFAULT_CONTAINER_NAME {
            merge_container(
                &mut main,
                container,
                &containers_path.clone().index(index),
                Precedence::Overlay {
                    protected_ports: &protected_ports,
                },
            )?;
        } else if sidecars.iter().any(|sidecar| sidecar.name == container.name) {
            debug!(container = %container.name, "sidecar already present, keeping first");
        } else {
            sidecars.push(container.clone());
        }
    }

    let mut merged = PodSpec {
        containers: Vec::with_capacity(sidecars.len() + 1),
        service_account_name: base.service_account_name.clone(),
        volumes: base.volumes.clone(),
    };
    merged.containers.push(main);
    merged.containers.extend(sidecars);

    if !overrides.service_account_name.is_empty() {
        merged.service_account_name = overrides.service_account_name.clone();
    }
    for volume in &overrides.volumes {
        if merged.volumes.iter().any(|existing| existing.name == volume.name) {
            debug!(volume = %volume.name, "volume already present, keeping first");
            continue;
        }
        merged.volumes.push(volume.clone());
    }

    Ok(merged)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
