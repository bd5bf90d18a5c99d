use crate::k8s::{ObjectMeta, Resource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PLATFORM_API_VERSION: &str = "sonataflow.org/v1alpha08";
pub const DEFAULT_WORKFLOW_IMAGE: &str = "quay.io/kiegroup/kogito-swf-builder:latest";
pub const DEFAULT_DEV_MODE_IMAGE: &str = "quay.io/kiegroup/kogito-swf-devmode:latest";
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Cluster-wide platform resource owned by operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: PlatformDefaults,
}

impl Platform {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, spec: PlatformDefaults) -> Self {
        Self {
            api_version: PLATFORM_API_VERSION.to_string(),
            kind: Self::KIND.to_string(),
            metadata: ObjectMeta::named(name, namespace),
            spec,
        }
    }
}

impl Resource for Platform {
    const KIND: &'static str = "SonataFlowPlatform";

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformDefaults {
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_image: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub network: NetworkBinding,
}

impl Default for PlatformDefaults {
    fn default() -> Self {
        Self {
            image: default_image(),
            dev_image: Some(DEFAULT_DEV_MODE_IMAGE.to_string()),
            properties: BTreeMap::new(),
            network: NetworkBinding::default(),
        }
    }
}

/// Where the workflow runtime listens. The port is fixed for the reserved `http` port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkBinding {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for NetworkBinding {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_image() -> String {
    DEFAULT_WORKFLOW_IMAGE.to_string()
}

fn default_host() -> String {
    DEFAULT_HTTP_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_HTTP_PORT
}

#[cfg(test)]
#[path = "platform_test.rs"]
mod tests;
