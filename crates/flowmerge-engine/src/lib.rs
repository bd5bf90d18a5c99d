pub mod baseline;
pub mod config;
pub mod creators;
pub mod desired;
pub mod error;
pub mod merge;
pub mod names;
pub mod persistence;
pub mod pod_diff;
pub mod properties;
pub mod visitor;

pub use baseline::{build_baseline, properties_seed, Baseline};
pub use config::{load_platform_defaults, validate_platform_defaults, PlatformConfigError};
pub use creators::{
    deployment_creator, managed_props_config_map_creator, service_creator,
    user_props_config_map_creator, workflow_pod_spec,
};
pub use desired::{
    annotate_properties_checksum, compute_desired_objects, properties_checksum, DesiredObjects,
};
pub use error::EngineError;
pub use merge::merge_pod_spec;
pub use persistence::{
    append_persistence_env, jdbc_url, persistence_properties, resolve_persistence_env,
    PERSISTENCE_ENV_PREFIX,
};
pub use pod_diff::{
    diff_pod_specs, diff_pod_specs_text, ContainerChange, ContainerChanged, PodSpecDiff,
    PodSpecDiffSummary,
};
pub use properties::{
    reconcile_managed_properties, user_properties_document, ExcludedProperty, ExclusionReason,
    ManagedProperties, ManagedPropertyGuard, PROTECTED_PROPERTY_KEYS,
};
pub use visitor::{
    DeploymentVisitor, DesiredState, ManagedPropertiesVisitor, MutateFn, MutateOutcome,
    MutateVisitor, ServiceVisitor, UserPropertiesVisitor,
};
