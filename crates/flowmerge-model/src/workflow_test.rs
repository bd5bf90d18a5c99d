use super::{Workflow, WorkflowMode, PROFILE_ANNOTATION};
use crate::persistence::PersistenceConfig;
use serde_json::json;

#[test]
fn profile_annotation_selects_mode() {
    let workflow = Workflow::new("greeting", "default");
    assert_eq!(workflow.mode(), WorkflowMode::Production);

    let workflow = workflow.with_mode(WorkflowMode::Development);
    assert_eq!(workflow.mode(), WorkflowMode::Development);
    assert_eq!(
        workflow.metadata.annotations.get(PROFILE_ANNOTATION).map(String::as_str),
        Some("dev")
    );
}

#[test]
fn unknown_profile_is_production() {
    let mut workflow = Workflow::new("greeting", "default");
    workflow
        .metadata
        .annotations
        .insert(PROFILE_ANNOTATION.to_string(), "preview".to_string());
    assert_eq!(workflow.mode(), WorkflowMode::Production);
}

#[test]
fn pod_template_decodes_from_wire_form() {
    let workflow: Workflow = serde_json::from_value(json!({
        "apiVersion": "sonataflow.org/v1alpha08",
        "kind": "SonataFlow",
        "metadata": {"name": "greeting", "namespace": "default"},
        "spec": {
            "podTemplate": {
                "container": {
                    "image": "quay.io/example/my-workflow:1.0.0",
                    "ports": [{"name": "http", "containerPort": 9090}],
                    "env": [{"name": "ENV1", "value": "VALUE_CUSTOM"}]
                },
                "podSpec": {
                    "serviceAccountName": "superuser",
                    "containers": [{"name": "sidecar"}],
                    "volumes": [{"name": "myvolume", "configMap": {"name": "customproperties"}}]
                }
            },
            "persistence": {
                "postgresql": {"secretRef": {"name": "test"}, "jdbcUrl": "jdbc:postgresql://host:5432/db"}
            }
        }
    }))
    .expect("must decode");

    let template = &workflow.spec.pod_template;
    assert_eq!(template.container.image, "quay.io/example/my-workflow:1.0.0");
    assert_eq!(template.container.ports[0].container_port, 9090);
    assert_eq!(template.pod_spec.service_account_name, "superuser");
    assert_eq!(template.pod_spec.containers[0].name, "sidecar");
    assert!(matches!(
        workflow.spec.persistence,
        Some(PersistenceConfig::ExplicitJdbc { .. })
    ));

    let container = template.container.to_container("workflow");
    assert_eq!(container.name, "workflow");
    assert_eq!(container.env_var("ENV1").and_then(|env| env.literal_value()), Some("VALUE_CUSTOM"));
}
