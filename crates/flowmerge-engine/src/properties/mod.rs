//! Regeneration of the managed properties document.

mod guard;
mod reconcile;

pub use guard::{ExclusionReason, ManagedPropertyGuard, PROTECTED_PROPERTY_KEYS};
pub use reconcile::{reconcile_managed_properties, ExcludedProperty, ManagedProperties};

use crate::error::EngineError;
use crate::names::APPLICATION_PROPERTIES_FILE_NAME;
use flowmerge_core::{parse_properties, PropertiesDocument};
use flowmerge_model::ConfigMap;

/// Reads `application.properties` out of the user ConfigMap. A missing map or key is an
/// empty document.
pub fn user_properties_document(
    config_map: Option<&ConfigMap>,
) -> Result<PropertiesDocument, EngineError> {
    let Some(text) = config_map.and_then(|map| map.data.get(APPLICATION_PROPERTIES_FILE_NAME))
    else {
        return Ok(PropertiesDocument::new());
    };
    parse_properties(text).map_err(|source| EngineError::DocumentParse {
        document: APPLICATION_PROPERTIES_FILE_NAME.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
