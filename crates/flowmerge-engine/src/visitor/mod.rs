//! Two-phase compute/apply contract offered to the reconciliation loop.
//!
//! `compute_desired` is pure. `apply` converges an existing object, which may be a
//! zero value or a previously persisted one, and reports whether anything changed so
//! the caller can skip no-op writes.

mod deployment;
mod managed_props;
mod service;
mod user_props;

pub use deployment::DeploymentVisitor;
pub use managed_props::ManagedPropertiesVisitor;
pub use service::ServiceVisitor;
pub use user_props::UserPropertiesVisitor;

use crate::error::EngineError;
use flowmerge_model::{ObjectMeta, Resource};
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutateOutcome {
    Unchanged,
    Updated,
}

impl MutateOutcome {
    fn from_changed(changed: bool) -> Self {
        if changed {
            MutateOutcome::Updated
        } else {
            MutateOutcome::Unchanged
        }
    }
}

pub type MutateFn<'a> = Box<dyn FnOnce() -> Result<MutateOutcome, EngineError> + 'a>;

pub trait DesiredState {
    type Object: Resource;

    fn compute_desired(&self) -> Result<Self::Object, EngineError>;

    fn apply(&self, existing: &mut Self::Object, desired: Self::Object) -> MutateOutcome;
}

/// The hook a create-or-update primitive invokes: bind the existing object, get back
/// the mutation to run.
pub trait MutateVisitor<T> {
    fn visit<'a>(&'a self, existing: &'a mut T) -> MutateFn<'a>;
}

impl<D: DesiredState> MutateVisitor<D::Object> for D {
    fn visit<'a>(&'a self, existing: &'a mut D::Object) -> MutateFn<'a> {
        Box::new(move || {
            let desired = self.compute_desired()?;
            let outcome = self.apply(existing, desired);
            match outcome {
                MutateOutcome::Updated => info!(object = %existing.object_ref(), "object updated"),
                MutateOutcome::Unchanged => {
                    debug!(object = %existing.object_ref(), "object unchanged, skipping write")
                }
            }
            Ok(outcome)
        })
    }
}

/// Fills name and namespace on a zero-value object and adds the desired labels.
/// Returns true when something changed.
pub(crate) fn stamp_identity(existing: &mut ObjectMeta, desired: &ObjectMeta) -> bool {
    let mut changed = false;
    if existing.name.is_empty() {
        existing.name = desired.name.clone();
        changed = true;
    }
    if existing.namespace.is_empty() {
        existing.namespace = desired.namespace.clone();
        changed = true;
    }
    converge_entries(&mut existing.labels, &desired.labels) || changed
}

/// Inserts every desired entry, leaving unrelated existing entries in place.
pub(crate) fn converge_entries(
    existing: &mut BTreeMap<String, String>,
    desired: &BTreeMap<String, String>,
) -> bool {
    let mut changed = false;
    for (key, value) in desired {
        if existing.get(key) != Some(value) {
            existing.insert(key.clone(), value.clone());
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
