use super::{converge_entries, stamp_identity, DesiredState, MutateOutcome};
use crate::creators::deployment_creator;
use crate::desired::annotate_properties_checksum;
use crate::error::EngineError;
use crate::pod_diff::diff_pod_specs_text;
use flowmerge_model::{Deployment, PlatformDefaults, Workflow};
use tracing::debug;

/// Converges replicas, pod template metadata and the pod spec. An existing selector
/// is kept since the cluster treats it as immutable.
#[derive(Debug, Clone)]
pub struct DeploymentVisitor<'a> {
    workflow: &'a Workflow,
    platform: &'a PlatformDefaults,
    properties_checksum: Option<String>,
}

impl<'a> DeploymentVisitor<'a> {
    pub fn new(workflow: &'a Workflow, platform: &'a PlatformDefaults) -> Self {
        Self {
            workflow,
            platform,
            properties_checksum: None,
        }
    }

    /// Stamps the pod template with a checksum of the properties documents, so a
    /// properties change rolls the pods.
    #[must_use]
    pub fn with_properties_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.properties_checksum = Some(checksum.into());
        self
    }
}

impl DesiredState for DeploymentVisitor<'_> {
    type Object = Deployment;

    fn compute_desired(&self) -> Result<Deployment, EngineError> {
        let mut deployment = deployment_creator(self.workflow, self.platform)?;
        if let Some(checksum) = &self.properties_checksum {
            annotate_properties_checksum(&mut deployment, checksum);
        }
        Ok(deployment)
    }

    fn apply(&self, existing: &mut Deployment, desired: Deployment) -> MutateOutcome {
        let mut changed = stamp_identity(&mut existing.metadata, &desired.metadata);

        if existing.spec.replicas != desired.spec.replicas {
            existing.spec.replicas = desired.spec.replicas;
            changed = true;
        }
        if existing.spec.selector.match_labels.is_empty() {
            existing.spec.selector = desired.spec.selector;
            changed = true;
        }

        let template = &mut existing.spec.template;
        changed |= converge_entries(
            &mut template.metadata.labels,
            &desired.spec.template.metadata.labels,
        );
        changed |= converge_entries(
            &mut template.metadata.annotations,
            &desired.spec.template.metadata.annotations,
        );
        if template.spec != desired.spec.template.spec {
            debug!(
                workflow = %self.workflow.name(),
                diff = %diff_pod_specs_text(&template.spec, &desired.spec.template.spec),
                "pod spec drifted"
            );
            template.spec = desired.spec.template.spec;
            changed = true;
        }

        MutateOutcome::from_changed(changed)
    }
}
