use super::guard::{ExclusionReason, ManagedPropertyGuard};
use crate::baseline::{properties_seed, validate_identity};
use crate::error::EngineError;
use crate::persistence::persistence_properties;
use flowmerge_core::{write_properties, FieldPath, PropertiesDocument};
use flowmerge_model::{PersistenceConfig, PlatformDefaults, Workflow};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedProperty {
    pub key: String,
    pub reason: ExclusionReason,
}

/// The recomputed managed document together with what was left out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedProperties {
    document: PropertiesDocument,
    excluded: Vec<ExcludedProperty>,
    shadowed_user_keys: Vec<String>,
}

impl ManagedProperties {
    pub fn document(&self) -> &PropertiesDocument {
        &self.document
    }

    pub fn excluded(&self) -> &[ExcludedProperty] {
        &self.excluded
    }

    /// User keys that the managed document also sets. The runtime reads the managed
    /// profile file last, so these user values have no effect.
    pub fn shadowed_user_keys(&self) -> &[String] {
        &self.shadowed_user_keys
    }

    pub fn render(&self) -> String {
        write_properties(&self.document)
    }
}

/// Regenerates the managed document from the seed, the platform properties and the
/// persistence properties, in that order of precedence. The user document only decides
/// exclusions; none of its keys is copied.
pub fn reconcile_managed_properties(
    user_document: &PropertiesDocument,
    workflow: &Workflow,
    platform: &PlatformDefaults,
    persistence: Option<&PersistenceConfig>,
) -> Result<ManagedProperties, EngineError> {
    validate_identity(workflow)?;
    let guard = ManagedPropertyGuard::default();
    let seed = properties_seed(workflow, platform);

    let mut candidates = seed.clone();
    for (key, value) in &platform.properties {
        if key.trim().is_empty() {
            return Err(EngineError::configuration(
                FieldPath::keys(&["spec", "properties"]),
                "platform property keys must not be empty",
                "properties.empty_key",
            ));
        }
        candidates.insert(key.as_str(), value.as_str());
    }
    if persistence.is_some() {
        candidates.extend_from(&persistence_properties());
    }
    for key in &guard.protected_keys {
        if let Some(value) = seed.get(key) {
            candidates.insert(key.as_str(), value);
        }
    }

    let mut document = PropertiesDocument::new();
    let mut excluded = Vec::new();
    for (key, value) in candidates.iter() {
        match guard.check(key, value, user_document) {
            Ok(()) => {
                document.insert(key, value);
            }
            Err(reason) => {
                debug!(workflow = %workflow.name(), key = %key, ?reason, "managed property excluded");
                excluded.push(ExcludedProperty {
                    key: key.to_string(),
                    reason,
                });
            }
        }
    }

    let shadowed_user_keys = user_document
        .keys()
        .filter(|key| document.contains_key(key))
        .map(str::to_string)
        .collect::<Vec<_>>();
    for key in &shadowed_user_keys {
        debug!(workflow = %workflow.name(), key = %key, "user property shadowed by managed value");
    }

    Ok(ManagedProperties {
        document,
        excluded,
        shadowed_user_keys,
    })
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
