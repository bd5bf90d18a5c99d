//! The full set of desired objects for one workflow, computed in one pure pass.

use crate::creators::{
    deployment_creator, managed_props_config_map_creator, service_creator,
    user_props_config_map_creator,
};
use crate::error::EngineError;
use crate::names::{APPLICATION_PROPERTIES_FILE_NAME, PROPERTIES_CHECKSUM_ANNOTATION};
use crate::properties::user_properties_document;
use flowmerge_core::stable_hash_hex;
use flowmerge_model::{ConfigMap, Deployment, PlatformDefaults, Service, Workflow};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredObjects {
    pub deployment: Deployment,
    pub service: Service,
    pub user_properties: ConfigMap,
    pub managed_properties: ConfigMap,
}

/// `user_properties` is the persisted user ConfigMap, if any. Its content is carried
/// through untouched.
pub fn compute_desired_objects(
    workflow: &Workflow,
    platform: &PlatformDefaults,
    user_properties: Option<&ConfigMap>,
) -> Result<DesiredObjects, EngineError> {
    let mut user_config_map = user_properties
        .cloned()
        .unwrap_or_else(|| user_props_config_map_creator(workflow));
    user_config_map
        .data
        .entry(APPLICATION_PROPERTIES_FILE_NAME.to_string())
        .or_default();

    let user_document = user_properties_document(Some(&user_config_map))?;
    let managed_config_map = managed_props_config_map_creator(workflow, platform, &user_document)?;

    let mut deployment = deployment_creator(workflow, platform)?;
    let checksum = properties_checksum(&user_config_map, &managed_config_map);
    annotate_properties_checksum(&mut deployment, &checksum);

    Ok(DesiredObjects {
        deployment,
        service: service_creator(workflow),
        user_properties: user_config_map,
        managed_properties: managed_config_map,
    })
}

/// SHA-256 over the data of both properties ConfigMaps.
pub fn properties_checksum(user_properties: &ConfigMap, managed_properties: &ConfigMap) -> String {
    let value = json!({
        "user": user_properties.data,
        "managed": managed_properties.data,
    });
    stable_hash_hex(&value)
}

pub fn annotate_properties_checksum(deployment: &mut Deployment, checksum: &str) {
    deployment
        .spec
        .template
        .metadata
        .annotations
        .insert(PROPERTIES_CHECKSUM_ANNOTATION.to_string(), checksum.to_string());
}

#[cfg(test)]
#[path = "desired_test.rs"]
mod tests;
