//! Detection of deferred-resolution expressions such as `${kubernetes:services.v1/event-listener}`.
//!
//! These placeholders are resolved by the workflow runtime at startup. Anything that
//! writes generated configuration must leave them alone, so callers use this module to
//! recognise and exclude them.

use regex::Regex;
use std::sync::OnceLock;

const DEFERRED_EXPRESSION_PATTERN: &str = r"\$\{([A-Za-z][A-Za-z0-9+\-]*):([^}/]*/[^}]*)\}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredExpression {
    pub scheme: String,
    pub target: String,
}

fn deferred_expression_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(DEFERRED_EXPRESSION_PATTERN).expect("valid regex"))
}

/// True when `value` holds at least one `${scheme:target}` placeholder.
///
/// The target must be a resource path (`<kind>.<version>/<name>`), so plain property
/// references (`${other.key}`) and defaulted ones (`${PORT:8080}`) do not count.
pub fn contains_deferred_expression(value: &str) -> bool {
    deferred_expression_regex().is_match(value)
}

pub fn deferred_expressions(value: &str) -> Vec<DeferredExpression> {
    deferred_expression_regex()
        .captures_iter(value)
        .filter_map(|capture| {
            Some(DeferredExpression {
                scheme: capture.get(1)?.as_str().to_string(),
                target: capture.get(2)?.as_str().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "expression_test.rs"]
mod tests;
