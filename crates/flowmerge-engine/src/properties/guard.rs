use crate::baseline::{HTTP_HOST_PROPERTY, HTTP_PORT_PROPERTY};
use flowmerge_core::{contains_deferred_expression, PropertiesDocument};
use serde::{Deserialize, Serialize};

/// Keys bound to the reserved port. They always carry the platform value.
pub const PROTECTED_PROPERTY_KEYS: &[&str] = &[HTTP_PORT_PROPERTY, HTTP_HOST_PROPERTY];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// The candidate value carries a deferred expression.
    DeferredExpression,
    /// The user document sets the key to a deferred expression; the runtime resolves it.
    UserDeferredExpression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedPropertyGuard {
    pub protected_keys: Vec<String>,
}

impl Default for ManagedPropertyGuard {
    fn default() -> Self {
        Self {
            protected_keys: PROTECTED_PROPERTY_KEYS
                .iter()
                .map(|key| key.to_string())
                .collect(),
        }
    }
}

impl ManagedPropertyGuard {
    pub fn is_protected(&self, key: &str) -> bool {
        self.protected_keys.iter().any(|protected| protected == key)
    }

    /// Decides whether a candidate entry may be written to the managed document.
    pub fn check(
        &self,
        key: &str,
        value: &str,
        user_document: &PropertiesDocument,
    ) -> Result<(), ExclusionReason> {
        if contains_deferred_expression(value) {
            return Err(ExclusionReason::DeferredExpression);
        }
        if self.is_protected(key) {
            return Ok(());
        }
        if user_document
            .get(key)
            .is_some_and(contains_deferred_expression)
        {
            return Err(ExclusionReason::UserDeferredExpression);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
