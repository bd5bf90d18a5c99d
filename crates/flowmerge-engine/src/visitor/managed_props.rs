use super::{stamp_identity, DesiredState, MutateOutcome};
use crate::creators::managed_props_config_map_creator;
use crate::error::EngineError;
use crate::names::managed_properties_file_name;
use crate::properties::user_properties_document;
use flowmerge_core::parse_properties;
use flowmerge_model::{ConfigMap, PlatformDefaults, Workflow};
use tracing::warn;

/// Regenerates the managed properties ConfigMap. The data map ends up holding exactly
/// the managed profile file.
#[derive(Debug, Clone, Copy)]
pub struct ManagedPropertiesVisitor<'a> {
    workflow: &'a Workflow,
    platform: &'a PlatformDefaults,
    user_properties: Option<&'a ConfigMap>,
}

impl<'a> ManagedPropertiesVisitor<'a> {
    pub fn new(
        workflow: &'a Workflow,
        platform: &'a PlatformDefaults,
        user_properties: Option<&'a ConfigMap>,
    ) -> Self {
        Self {
            workflow,
            platform,
            user_properties,
        }
    }
}

impl DesiredState for ManagedPropertiesVisitor<'_> {
    type Object = ConfigMap;

    fn compute_desired(&self) -> Result<ConfigMap, EngineError> {
        let user_document = user_properties_document(self.user_properties)?;
        managed_props_config_map_creator(self.workflow, self.platform, &user_document)
    }

    fn apply(&self, existing: &mut ConfigMap, desired: ConfigMap) -> MutateOutcome {
        let mut changed = stamp_identity(&mut existing.metadata, &desired.metadata);

        let file_name = managed_properties_file_name(self.workflow);
        if let Some(Err(error)) = existing.data.get(&file_name).map(|text| parse_properties(text)) {
            warn!(
                workflow = %self.workflow.name(),
                document = %file_name,
                %error,
                "existing managed properties are malformed, overwriting"
            );
        }
        if existing.data != desired.data {
            existing.data = desired.data;
            changed = true;
        }
        MutateOutcome::from_changed(changed)
    }
}
