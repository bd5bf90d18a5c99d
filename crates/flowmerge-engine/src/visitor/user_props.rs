use super::{stamp_identity, DesiredState, MutateOutcome};
use crate::creators::user_props_config_map_creator;
use crate::error::EngineError;
use crate::names::APPLICATION_PROPERTIES_FILE_NAME;
use flowmerge_model::{ConfigMap, Workflow};

/// Makes sure the user ConfigMap exists with an `application.properties` key. User
/// content is never rewritten.
#[derive(Debug, Clone, Copy)]
pub struct UserPropertiesVisitor<'a> {
    workflow: &'a Workflow,
}

impl<'a> UserPropertiesVisitor<'a> {
    pub fn new(workflow: &'a Workflow) -> Self {
        Self { workflow }
    }
}

impl DesiredState for UserPropertiesVisitor<'_> {
    type Object = ConfigMap;

    fn compute_desired(&self) -> Result<ConfigMap, EngineError> {
        Ok(user_props_config_map_creator(self.workflow))
    }

    fn apply(&self, existing: &mut ConfigMap, desired: ConfigMap) -> MutateOutcome {
        let mut changed = stamp_identity(&mut existing.metadata, &desired.metadata);
        if !existing.data.contains_key(APPLICATION_PROPERTIES_FILE_NAME) {
            existing
                .data
                .insert(APPLICATION_PROPERTIES_FILE_NAME.to_string(), String::new());
            changed = true;
        }
        MutateOutcome::from_changed(changed)
    }
}
