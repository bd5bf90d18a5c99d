use super::{ExclusionReason, ManagedPropertyGuard};
use flowmerge_core::PropertiesDocument;

#[test]
fn default_guard_protects_network_binding() {
    let guard = ManagedPropertyGuard::default();
    assert!(guard.is_protected("quarkus.http.port"));
    assert!(guard.is_protected("quarkus.http.host"));
    assert!(!guard.is_protected("kogito.service.url"));
}

#[test]
fn expression_values_are_excluded() {
    let guard = ManagedPropertyGuard::default();
    let user = PropertiesDocument::new();
    assert_eq!(
        guard.check(
            "mp.messaging.outgoing.kogito_outgoing_stream.url",
            "${kubernetes:services.v1/event-listener}",
            &user
        ),
        Err(ExclusionReason::DeferredExpression)
    );
    assert_eq!(guard.check("quarkus.log.level", "${LOG_LEVEL:INFO}", &user), Ok(()));
}

#[test]
fn user_expression_excludes_managed_key() {
    let guard = ManagedPropertyGuard::default();
    let user = PropertiesDocument::from_iter([(
        "kogito.service.url",
        "${kubernetes:services.v1/greeting}",
    )]);
    assert_eq!(
        guard.check("kogito.service.url", "http://greeting.default", &user),
        Err(ExclusionReason::UserDeferredExpression)
    );
}

#[test]
fn protected_keys_are_never_excluded() {
    let guard = ManagedPropertyGuard::default();
    let user = PropertiesDocument::from_iter([(
        "quarkus.http.port",
        "${kubernetes:services.v1/other}",
    )]);
    assert_eq!(guard.check("quarkus.http.port", "8080", &user), Ok(()));
}

#[test]
fn protected_key_with_expression_value_is_excluded() {
    let guard = ManagedPropertyGuard::default();
    assert_eq!(
        guard.check(
            "quarkus.http.host",
            "${kubernetes:services.v1/gateway}",
            &PropertiesDocument::new()
        ),
        Err(ExclusionReason::DeferredExpression)
    );
}
