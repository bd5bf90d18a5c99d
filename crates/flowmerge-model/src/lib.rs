pub mod k8s;
pub mod parse;
pub mod persistence;
pub mod platform;
pub mod workflow;

pub use k8s::{
    ConfigMap, ConfigMapVolumeSource, Container, ContainerPort, Deployment, DeploymentSpec,
    EmptyDirVolumeSource, EnvValue, EnvVar, EnvVarError, EnvVarFields, EnvVarSource,
    HttpGetAction, IntOrString, KeySelector, KeyToPath, LabelSelector, ObjectFieldSelector,
    ObjectMeta, PersistentVolumeClaimVolumeSource, PodSpec, PodTemplateSpec, Probe, Resource,
    ResourceFieldSelector, SecretVolumeSource, Service, ServicePort, ServiceSpec, Volume,
    VolumeMount, VolumeSource,
};
pub use parse::{
    parse_document, parse_document_with_format, parse_json, parse_platform, parse_workflow,
    parse_yaml, DocumentFormat, ResourceDocument,
};
pub use persistence::{
    PersistenceConfig, PersistenceOptions, PersistenceOptionsError, PostgreSqlOptions,
    SecretRef, ServiceRef, DEFAULT_POSTGRESQL_PORT,
};
pub use platform::{
    NetworkBinding, Platform, PlatformDefaults, DEFAULT_DEV_MODE_IMAGE, DEFAULT_HTTP_HOST,
    DEFAULT_HTTP_PORT, DEFAULT_WORKFLOW_IMAGE,
};
pub use workflow::{
    ContainerSpec, PodSpecOverride, Workflow, WorkflowMode, WorkflowPodTemplate, WorkflowSpec,
    DEV_PROFILE, PROD_PROFILE, PROFILE_ANNOTATION,
};
