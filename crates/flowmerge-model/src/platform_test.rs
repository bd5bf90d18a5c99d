use super::{PlatformDefaults, DEFAULT_HTTP_PORT, DEFAULT_WORKFLOW_IMAGE};
use serde_json::json;

#[test]
fn empty_spec_gets_defaults() {
    let defaults: PlatformDefaults = serde_json::from_value(json!({})).expect("must decode");
    assert_eq!(defaults.image, DEFAULT_WORKFLOW_IMAGE);
    assert_eq!(defaults.network.host, "0.0.0.0");
    assert_eq!(defaults.network.port, DEFAULT_HTTP_PORT);
    assert!(defaults.dev_image.is_none());
}

#[test]
fn properties_and_network_are_read() {
    let defaults: PlatformDefaults = serde_json::from_value(json!({
        "image": "registry.example/runtime:2",
        "properties": {"quarkus.log.level": "INFO"},
        "network": {"port": 8181}
    }))
    .expect("must decode");
    assert_eq!(defaults.properties.get("quarkus.log.level").map(String::as_str), Some("INFO"));
    assert_eq!(defaults.network.port, 8181);
    assert_eq!(defaults.network.host, "0.0.0.0");
}

#[test]
fn default_value_has_dev_image() {
    assert!(PlatformDefaults::default().dev_image.is_some());
}
