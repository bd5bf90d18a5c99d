use super::{stamp_identity, DesiredState, MutateOutcome};
use crate::creators::service_creator;
use crate::error::EngineError;
use flowmerge_model::{Service, Workflow};

#[derive(Debug, Clone, Copy)]
pub struct ServiceVisitor<'a> {
    workflow: &'a Workflow,
}

impl<'a> ServiceVisitor<'a> {
    pub fn new(workflow: &'a Workflow) -> Self {
        Self { workflow }
    }
}

impl DesiredState for ServiceVisitor<'_> {
    type Object = Service;

    fn compute_desired(&self) -> Result<Service, EngineError> {
        Ok(service_creator(self.workflow))
    }

    fn apply(&self, existing: &mut Service, desired: Service) -> MutateOutcome {
        let mut changed = stamp_identity(&mut existing.metadata, &desired.metadata);
        if existing.spec.selector != desired.spec.selector {
            existing.spec.selector = desired.spec.selector;
            changed = true;
        }
        if existing.spec.ports != desired.spec.ports {
            existing.spec.ports = desired.spec.ports;
            changed = true;
        }
        MutateOutcome::from_changed(changed)
    }
}
