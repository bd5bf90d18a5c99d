use crate::k8s::{
    Container, ContainerPort, EnvVar, ObjectMeta, Probe, Resource, Volume, VolumeMount,
};
use crate::persistence::PersistenceConfig;
use serde::{Deserialize, Serialize};

pub const WORKFLOW_API_VERSION: &str = "sonataflow.org/v1alpha08";
pub const PROFILE_ANNOTATION: &str = "sonataflow.org/profile";
pub const DEV_PROFILE: &str = "dev";
pub const PROD_PROFILE: &str = "prod";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowMode {
    Development,
    Production,
}

impl WorkflowMode {
    pub fn profile(self) -> &'static str {
        match self {
            WorkflowMode::Development => DEV_PROFILE,
            WorkflowMode::Production => PROD_PROFILE,
        }
    }
}

/// The user-authored workflow resource. The engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: WorkflowSpec,
}

impl Workflow {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            api_version: WORKFLOW_API_VERSION.to_string(),
            kind: Self::KIND.to_string(),
            metadata: ObjectMeta::named(name, namespace),
            spec: WorkflowSpec::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }

    pub fn mode(&self) -> WorkflowMode {
        match self.metadata.annotations.get(PROFILE_ANNOTATION) {
            Some(profile) if profile.eq_ignore_ascii_case(DEV_PROFILE) => WorkflowMode::Development,
            _ => WorkflowMode::Production,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: WorkflowMode) -> Self {
        self.metadata
            .annotations
            .insert(PROFILE_ANNOTATION.to_string(), mode.profile().to_string());
        self
    }
}

impl Resource for Workflow {
    const KIND: &'static str = "SonataFlow";

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSpec {
    #[serde(default)]
    pub pod_template: WorkflowPodTemplate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistence: Option<PersistenceConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowPodTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(default)]
    pub container: ContainerSpec,
    #[serde(default)]
    pub pod_spec: PodSpecOverride,
}

/// Container-level override for the workflow container. It has no name: it always
/// targets the reserved main container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ContainerPort>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_mounts: Vec<VolumeMount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<Probe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<Probe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_probe: Option<Probe>,
}

impl ContainerSpec {
    /// Views this override as a container carrying `name`.
    pub fn to_container(&self, name: &str) -> Container {
        Container {
            name: name.to_string(),
            image: self.image.clone(),
            image_pull_policy: self.image_pull_policy.clone(),
            command: self.command.clone(),
            args: self.args.clone(),
            ports: self.ports.clone(),
            env: self.env.clone(),
            volume_mounts: self.volume_mounts.clone(),
            liveness_probe: self.liveness_probe.clone(),
            readiness_probe: self.readiness_probe.clone(),
            startup_probe: self.startup_probe.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpecOverride {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_account_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<Container>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,
}

#[cfg(test)]
#[path = "workflow_test.rs"]
mod tests;
