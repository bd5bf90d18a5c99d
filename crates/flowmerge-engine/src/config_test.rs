use super::{load_platform_defaults, validate_platform_defaults, PlatformConfigError};
use flowmerge_model::{PlatformDefaults, DEFAULT_DEV_MODE_IMAGE};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[test]
fn load_platform_defaults_parses_yaml_and_expands_env() {
    std::env::set_var("FLOWMERGE_CONFIG_TEST_IMAGE", "quay.io/example/builder:2.0");
    let path = write_temp_file(
        "platform-ok",
        "yaml",
        r#"
image: ${env:FLOWMERGE_CONFIG_TEST_IMAGE}
devImage: quay.io/example/devmode:2.0
properties:
  quarkus.log.level: INFO
  mp.messaging.outgoing.events.url: ${kubernetes:services.v1/broker}
network:
  host: 0.0.0.0
  port: 8080
"#,
    );

    let defaults = load_platform_defaults(path.as_path()).expect("config must load");
    assert_eq!(defaults.image, "quay.io/example/builder:2.0");
    assert_eq!(defaults.dev_image.as_deref(), Some("quay.io/example/devmode:2.0"));
    assert_eq!(
        defaults
            .properties
            .get("mp.messaging.outgoing.events.url")
            .map(String::as_str),
        Some("${kubernetes:services.v1/broker}")
    );
    remove(&path);
}

#[test]
fn load_platform_defaults_parses_json_with_defaults() {
    let path = write_temp_file("platform-json", "json", r#"{"image": "quay.io/example/builder:3"}"#);
    let defaults = load_platform_defaults(path.as_path()).expect("config must load");
    assert_eq!(defaults.image, "quay.io/example/builder:3");
    assert_eq!(defaults.network.port, 8080);
    assert_eq!(defaults.network.host, "0.0.0.0");
    assert_eq!(defaults.dev_image, None);
    remove(&path);
}

#[test]
fn unknown_extension_falls_back_to_yaml_then_json() {
    let path = write_temp_file("platform-conf", "conf", "image: quay.io/example/builder:4\n");
    let defaults = load_platform_defaults(path.as_path()).expect("config must load");
    assert_eq!(defaults.image, "quay.io/example/builder:4");
    remove(&path);
}

#[test]
fn missing_env_var_is_parse_error() {
    let path = write_temp_file(
        "platform-missing-env",
        "yaml",
        "image: ${env:FLOWMERGE_CONFIG_TEST_UNSET_VARIABLE}\n",
    );
    match load_platform_defaults(path.as_path()) {
        Err(PlatformConfigError::Parse(message)) => {
            assert!(message.contains("FLOWMERGE_CONFIG_TEST_UNSET_VARIABLE"))
        }
        other => panic!("unexpected result: {other:?}"),
    }
    remove(&path);
}

#[test]
fn invalid_values_are_validation_issues() {
    let path = write_temp_file(
        "platform-invalid",
        "yaml",
        "image: \"\"\nnetwork:\n  host: \"\"\n  port: 0\n",
    );
    match load_platform_defaults(path.as_path()) {
        Err(PlatformConfigError::Validation(issues)) => {
            let references = issues
                .iter()
                .filter_map(|issue| issue.reference.as_deref())
                .collect::<Vec<_>>();
            assert_eq!(issues.len(), 3);
            assert!(references.contains(&"platform.config.image.non_empty"));
            assert!(references.contains(&"platform.config.network.port_range"));
            assert!(references.contains(&"platform.config.network.host.non_empty"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    remove(&path);
}

#[test]
fn missing_file_is_read_error() {
    let path = std::env::temp_dir().join("flowmerge-platform-does-not-exist.yaml");
    assert!(matches!(
        load_platform_defaults(path.as_path()),
        Err(PlatformConfigError::ReadFile { .. })
    ));
}

#[test]
fn builtin_defaults_are_valid() {
    let defaults = PlatformDefaults::default();
    assert!(validate_platform_defaults(&defaults).is_empty());
    assert_eq!(defaults.dev_image.as_deref(), Some(DEFAULT_DEV_MODE_IMAGE));
}

#[test]
fn expression_host_is_validation_issue() {
    let mut defaults = PlatformDefaults::default();
    defaults.network.host = "${kubernetes:services.v1/gateway}".to_string();
    let issues = validate_platform_defaults(&defaults);
    assert_eq!(issues.len(), 1);
    assert_eq!(
        issues[0].reference.as_deref(),
        Some("platform.config.network.host.literal")
    );
}

fn write_temp_file(prefix: &str, extension: &str, content: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time must be monotonic")
        .as_nanos();
    path.push(format!(
        "flowmerge-{prefix}-{}-{nanos}.{extension}",
        std::process::id()
    ));
    fs::write(&path, content).expect("must write temp file");
    path
}

fn remove(path: &Path) {
    let _ = fs::remove_file(path);
}
