//! Database connection settings rendered as environment entries and properties.

use crate::error::EngineError;
use flowmerge_core::{FieldPath, PropertiesDocument};
use crate::names::DEFAULT_CONTAINER_NAME;
use flowmerge_model::{
    Container, EnvVar, PersistenceConfig, ServiceRef, WorkflowPodTemplate,
    DEFAULT_POSTGRESQL_PORT,
};

pub const PERSISTENCE_ENV_PREFIX: &str = "QUARKUS_DATASOURCE_";
pub const USERNAME_ENV: &str = "QUARKUS_DATASOURCE_USERNAME";
pub const PASSWORD_ENV: &str = "QUARKUS_DATASOURCE_PASSWORD";
pub const DB_KIND_ENV: &str = "QUARKUS_DATASOURCE_DB_KIND";
pub const JDBC_URL_ENV: &str = "QUARKUS_DATASOURCE_JDBC_URL";

pub const SECRET_USER_KEY: &str = "POSTGRESQL_USER";
pub const SECRET_PASSWORD_KEY: &str = "POSTGRESQL_PASSWORD";
pub const POSTGRESQL_DB_KIND: &str = "postgresql";

fn postgresql_path() -> FieldPath {
    FieldPath::keys(&["spec", "persistence", "postgresql"])
}

/// Username, password, database kind and JDBC URL, always in that order.
///
/// `workflow_namespace` is used when a service reference leaves its namespace unset.
pub fn resolve_persistence_env(
    config: &PersistenceConfig,
    workflow_namespace: &str,
) -> Result<Vec<EnvVar>, EngineError> {
    let secret = config.secret_ref();
    if secret.name.trim().is_empty() {
        return Err(EngineError::MissingReference {
            field_path: postgresql_path().key("secretRef").key("name"),
            reference_kind: "secret",
        });
    }
    let url = jdbc_url(config, workflow_namespace)?;

    Ok(vec![
        EnvVar::secret_key(USERNAME_ENV, secret.name.as_str(), SECRET_USER_KEY),
        EnvVar::secret_key(PASSWORD_ENV, secret.name.as_str(), SECRET_PASSWORD_KEY),
        EnvVar::literal(DB_KIND_ENV, POSTGRESQL_DB_KIND),
        EnvVar::literal(JDBC_URL_ENV, url),
    ])
}

pub fn jdbc_url(config: &PersistenceConfig, workflow_namespace: &str) -> Result<String, EngineError> {
    match config {
        PersistenceConfig::ExplicitJdbc { jdbc_url, .. } => Ok(jdbc_url.clone()),
        PersistenceConfig::ServiceReference { service, .. } => {
            service_jdbc_url(service, workflow_namespace)
        }
    }
}

fn service_jdbc_url(service: &ServiceRef, workflow_namespace: &str) -> Result<String, EngineError> {
    let path = postgresql_path().key("serviceRef");
    if service.name.trim().is_empty() {
        return Err(EngineError::MissingReference {
            field_path: path.key("name"),
            reference_kind: "service",
        });
    }
    if service.database_name.trim().is_empty() {
        return Err(EngineError::configuration(
            path.key("databaseName"),
            "service reference must name a database",
            "persistence.database_name_required",
        ));
    }

    let namespace = service
        .namespace
        .as_deref()
        .filter(|namespace| !namespace.is_empty())
        .unwrap_or(workflow_namespace);
    let port = service.port.unwrap_or(DEFAULT_POSTGRESQL_PORT);
    let mut url = format!(
        "jdbc:postgresql://{}.{}:{}/{}",
        service.name, namespace, port, service.database_name
    );
    if let Some(schema) = service.database_schema.as_deref().filter(|schema| !schema.is_empty()) {
        url.push_str("?currentSchema=");
        url.push_str(schema);
    }
    Ok(url)
}

/// Properties the runtime needs to switch its persistence layer to JDBC.
pub fn persistence_properties() -> PropertiesDocument {
    PropertiesDocument::from_iter([
        ("kogito.persistence.type", "jdbc"),
        ("quarkus.datasource.db-kind", POSTGRESQL_DB_KIND),
        ("kogito.persistence.proto.marshaller", "false"),
    ])
}

/// Appends persistence entries after the merged env list. An entry whose name is
/// already taken is a configuration error, never an overwrite. The error points at the
/// override layer that declared the name.
pub fn append_persistence_env(
    container: &mut Container,
    entries: Vec<EnvVar>,
    template: &WorkflowPodTemplate,
) -> Result<(), EngineError> {
    for entry in entries {
        if container.env.iter().any(|env| env.name == entry.name) {
            return Err(EngineError::configuration(
                env_origin_path(template, &entry.name),
                format!(
                    "env `{}` collides with a persistence entry; names starting with `{PERSISTENCE_ENV_PREFIX}` are reserved",
                    entry.name
                ),
                "persistence.env_collision",
            ));
        }
        container.env.push(entry);
    }
    Ok(())
}

fn env_origin_path(template: &WorkflowPodTemplate, name: &str) -> FieldPath {
    let template_path = FieldPath::keys(&["spec", "podTemplate"]);
    let pod_level = template
        .pod_spec
        .containers
        .iter()
        .enumerate()
        .filter(|(_, container)| container.name == DEFAULT_CONTAINER_NAME)
        .find_map(|(index, container)| {
            let env_index = container.env.iter().position(|env| env.name == name)?;
            Some(
                template_path
                    .clone()
                    .key("podSpec")
                    .key("containers")
                    .index(index)
                    .key("env")
                    .index(env_index),
            )
        });
    if let Some(path) = pod_level {
        return path;
    }
    let container_path = template_path.key("container").key("env");
    match template.container.env.iter().position(|env| env.name == name) {
        Some(env_index) => container_path.index(env_index),
        None => container_path,
    }
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
