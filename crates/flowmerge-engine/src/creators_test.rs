use super::{
    deployment_creator, managed_props_config_map_creator, service_creator,
    user_props_config_map_creator,
};
use crate::names::{DEFAULT_CONTAINER_NAME, HTTP_PORT_NAME};
use crate::persistence::{DB_KIND_ENV, JDBC_URL_ENV, PASSWORD_ENV, USERNAME_ENV};
use flowmerge_core::{parse_properties, PropertiesDocument};
use flowmerge_model::{
    ConfigMapVolumeSource, Container, ContainerPort, EnvVar, IntOrString, PersistenceConfig,
    PlatformDefaults, SecretRef, ServiceRef, Volume, VolumeMount, VolumeSource, Workflow,
    WorkflowMode, WorkflowPodTemplate,
};

fn http_port(value: i32) -> ContainerPort {
    ContainerPort {
        name: HTTP_PORT_NAME.to_string(),
        container_port: value,
        protocol: None,
    }
}

fn override_template() -> WorkflowPodTemplate {
    let mut template = WorkflowPodTemplate::default();
    template.container.image = "quay.io/example/my-workflow:1.0.0".to_string();
    template.container.ports = vec![http_port(9090)];
    template.container.env = vec![EnvVar::literal("ENV1", "VALUE_CUSTOM")];
    template.container.volume_mounts = vec![VolumeMount {
        name: "myvolume".to_string(),
        mount_path: "/tmp/any/path".to_string(),
        read_only: true,
        sub_path: None,
    }];
    template.pod_spec.service_account_name = "superuser".to_string();
    template.pod_spec.containers = vec![Container {
        name: "sidecar".to_string(),
        ..Container::default()
    }];
    template.pod_spec.volumes = vec![Volume {
        name: "myvolume".to_string(),
        source: VolumeSource::ConfigMap(ConfigMapVolumeSource {
            name: "customproperties".to_string(),
            items: Vec::new(),
            default_mode: None,
        }),
    }];
    template
}

fn persistence_env(jdbc_url: &str) -> Vec<EnvVar> {
    vec![
        EnvVar::secret_key(USERNAME_ENV, "test", "POSTGRESQL_USER"),
        EnvVar::secret_key(PASSWORD_ENV, "test", "POSTGRESQL_PASSWORD"),
        EnvVar::literal(DB_KIND_ENV, "postgresql"),
        EnvVar::literal(JDBC_URL_ENV, jdbc_url),
    ]
}

#[test]
fn deployment_carries_merged_pod_spec() {
    let mut workflow = Workflow::new("greeting", "default");
    workflow.spec.pod_template = override_template();

    let deployment =
        deployment_creator(&workflow, &PlatformDefaults::default()).expect("deployment");

    let pod_spec = &deployment.spec.template.spec;
    assert_eq!(pod_spec.containers.len(), 2);
    assert_eq!(pod_spec.service_account_name, "superuser");
    assert_eq!(pod_spec.volumes.len(), 1);
    let main = pod_spec.container(DEFAULT_CONTAINER_NAME).expect("main");
    assert_eq!(main.image, "quay.io/example/my-workflow:1.0.0");
    assert_eq!(main.ports[0].container_port, 8080);
    assert_eq!(main.env[0].literal_value(), Some("VALUE_CUSTOM"));
    assert_eq!(main.volume_mounts.len(), 1);

    assert_eq!(deployment.metadata.name, "greeting");
    assert_eq!(deployment.spec.replicas, Some(1));
    assert_eq!(
        deployment.spec.selector.match_labels,
        deployment.spec.template.metadata.labels
    );
}

#[test]
fn deployment_appends_persistence_env_after_override_env() {
    let mut workflow = Workflow::new("greeting", "default");
    workflow.spec.pod_template = override_template();
    workflow.spec.persistence = Some(PersistenceConfig::ExplicitJdbc {
        secret_ref: SecretRef {
            name: "test".to_string(),
        },
        jdbc_url: "jdbc:postgresql://host:port/database?currentSchema=workflow".to_string(),
    });

    let deployment =
        deployment_creator(&workflow, &PlatformDefaults::default()).expect("deployment");

    let main = deployment
        .spec
        .template
        .spec
        .container(DEFAULT_CONTAINER_NAME)
        .expect("main");
    let mut expected = vec![EnvVar::literal("ENV1", "VALUE_CUSTOM")];
    expected.extend(persistence_env(
        "jdbc:postgresql://host:port/database?currentSchema=workflow",
    ));
    assert_eq!(main.env, expected);
    assert_eq!(deployment.spec.template.spec.containers.len(), 2);
}

#[test]
fn pod_level_main_container_with_service_reference() {
    let mut workflow = Workflow::new("greeting", "default");
    workflow.spec.pod_template.pod_spec.containers = vec![Container {
        name: DEFAULT_CONTAINER_NAME.to_string(),
        ports: vec![http_port(9090)],
        ..Container::default()
    }];
    workflow.spec.persistence = Some(PersistenceConfig::ServiceReference {
        secret_ref: SecretRef {
            name: "test".to_string(),
        },
        service: ServiceRef {
            name: "test".to_string(),
            namespace: Some("foo".to_string()),
            port: Some(5432),
            database_name: "petstore".to_string(),
            database_schema: Some("bar".to_string()),
        },
    });

    let deployment =
        deployment_creator(&workflow, &PlatformDefaults::default()).expect("deployment");

    let pod_spec = &deployment.spec.template.spec;
    assert_eq!(pod_spec.containers.len(), 1);
    let main = &pod_spec.containers[0];
    assert_eq!(main.ports[0].container_port, 8080);
    assert_eq!(
        main.env,
        persistence_env("jdbc:postgresql://test.foo:5432/petstore?currentSchema=bar")
    );
}

#[test]
fn replicas_follow_pod_template() {
    let mut workflow = Workflow::new("greeting", "default");
    workflow.spec.pod_template.replicas = Some(3);
    let deployment =
        deployment_creator(&workflow, &PlatformDefaults::default()).expect("deployment");
    assert_eq!(deployment.spec.replicas, Some(3));
}

#[test]
fn service_targets_named_http_port() {
    let service = service_creator(&Workflow::new("greeting", "default"));
    assert_eq!(service.metadata.namespace, "default");
    assert_eq!(service.spec.ports.len(), 1);
    assert_eq!(service.spec.ports[0].port, 80);
    assert_eq!(
        service.spec.ports[0].target_port,
        IntOrString::String("http".to_string())
    );
    assert_eq!(
        service.spec.selector.get("app").map(String::as_str),
        Some("greeting")
    );
}

#[test]
fn user_config_map_starts_empty() {
    let config_map = user_props_config_map_creator(&Workflow::new("greeting", "default"));
    assert_eq!(config_map.metadata.name, "greeting-props");
    assert_eq!(
        config_map.data.get("application.properties").map(String::as_str),
        Some("")
    );
}

#[test]
fn managed_config_map_holds_only_profile_file() {
    let workflow = Workflow::new("greeting", "default").with_mode(WorkflowMode::Development);
    let config_map = managed_props_config_map_creator(
        &workflow,
        &PlatformDefaults::default(),
        &PropertiesDocument::new(),
    )
    .expect("managed");

    assert_eq!(config_map.metadata.name, "greeting-managed-props");
    assert!(!config_map.data.contains_key("application.properties"));
    let text = config_map
        .data
        .get("application-dev.properties")
        .expect("managed file");
    let document = parse_properties(text).expect("parse");
    assert_eq!(document.get("quarkus.http.port"), Some("8080"));
}
