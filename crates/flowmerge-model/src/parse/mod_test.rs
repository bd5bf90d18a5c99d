use super::{parse_document_with_format, parse_platform, parse_workflow, DocumentFormat, ResourceDocument};
use crate::persistence::PersistenceConfig;
use crate::workflow::WorkflowMode;

#[test]
fn yaml_workflow_dispatches_by_kind() {
    let input = r#"
apiVersion: sonataflow.org/v1alpha08
kind: SonataFlow
metadata:
  name: greeting
  namespace: default
  annotations:
    sonataflow.org/profile: dev
spec:
  persistence:
    postgresql:
      secretRef:
        name: test
      serviceRef:
        name: test
        namespace: foo
        port: 5432
        databaseName: petstore
        databaseSchema: bar
"#;

    let workflow = parse_workflow(input).expect("must parse");
    assert_eq!(workflow.name(), "greeting");
    assert_eq!(workflow.mode(), WorkflowMode::Development);
    assert!(matches!(
        workflow.spec.persistence,
        Some(PersistenceConfig::ServiceReference { .. })
    ));
}

#[test]
fn json_platform_dispatches_by_kind() {
    let input = r#"{"apiVersion":"sonataflow.org/v1alpha08","kind":"SonataFlowPlatform","metadata":{"name":"platform"},"spec":{"image":"registry.example/runtime:2"}}"#;
    let parsed = parse_document_with_format(input, DocumentFormat::Json).expect("must parse");
    match parsed {
        ResourceDocument::Platform(platform) => {
            assert_eq!(platform.spec.image, "registry.example/runtime:2");
        }
        other => panic!("expected platform, got {other:?}"),
    }
}

#[test]
fn config_map_is_accepted() {
    let input = r#"
apiVersion: v1
kind: ConfigMap
metadata:
  name: greeting-props
data:
  application.properties: |
    my.prop=1
"#;
    let parsed = parse_document_with_format(input, DocumentFormat::Yaml).expect("must parse");
    assert_eq!(parsed.kind(), "ConfigMap");
}

#[test]
fn contradictory_persistence_is_a_typed_parse_error() {
    let input = r#"
apiVersion: sonataflow.org/v1alpha08
kind: SonataFlow
metadata:
  name: greeting
spec:
  persistence:
    postgresql:
      secretRef:
        name: test
      jdbcUrl: jdbc:postgresql://host:5432/db
      serviceRef:
        name: test
        databaseName: db
"#;
    let issues = parse_workflow(input).expect_err("must reject");
    assert_eq!(
        issues[0].reference.as_deref(),
        Some("parse.typed_deserialize_error")
    );
    assert!(issues[0].message.contains("exactly one is allowed"));
}

#[test]
fn unknown_kind_is_rejected() {
    let issues = parse_document_with_format(r#"{"kind":"Pod"}"#, DocumentFormat::Json)
        .expect_err("must reject");
    assert_eq!(issues[0].reference.as_deref(), Some("parse.unsupported_kind"));
}

#[test]
fn wrong_kind_for_typed_helper_is_rejected() {
    let input = r#"{"apiVersion":"v1","kind":"ConfigMap","metadata":{"name":"x"}}"#;
    let issues = parse_platform(input).expect_err("must reject");
    assert_eq!(issues[0].reference.as_deref(), Some("parse.unexpected_kind"));
}

#[test]
fn duplicate_yaml_keys_are_rejected() {
    let input = "kind: SonataFlow\nmetadata:\n  name: a\n  name: b\n";
    let issues = parse_document_with_format(input, DocumentFormat::Yaml).expect_err("must reject");
    assert_eq!(issues[0].reference.as_deref(), Some("yaml.duplicate_key"));
}
