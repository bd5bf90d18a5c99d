//! Database persistence settings of a workflow.
//!
//! On the wire this is `persistence.postgresql` with either `jdbcUrl` or `serviceRef`.
//! In memory it is the two-variant [`PersistenceConfig`], so a value holding both (or
//! neither) connection forms cannot be built.

use serde::{Deserialize, Serialize};

pub const DEFAULT_POSTGRESQL_PORT: u16 = 5432;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    pub database_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_schema: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersistenceOptions", into = "PersistenceOptions")]
pub enum PersistenceConfig {
    ExplicitJdbc {
        secret_ref: SecretRef,
        jdbc_url: String,
    },
    ServiceReference {
        secret_ref: SecretRef,
        service: ServiceRef,
    },
}

impl PersistenceConfig {
    pub fn secret_ref(&self) -> &SecretRef {
        match self {
            PersistenceConfig::ExplicitJdbc { secret_ref, .. }
            | PersistenceConfig::ServiceReference { secret_ref, .. } => secret_ref,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgresql: Option<PostgreSqlOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgreSqlOptions {
    pub secret_ref: SecretRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jdbc_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_ref: Option<ServiceRef>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PersistenceOptionsError {
    #[error("persistence must configure `postgresql`")]
    MissingProvider,
    #[error("postgresql persistence sets both `jdbcUrl` and `serviceRef`; exactly one is allowed")]
    ConflictingConnection,
    #[error("postgresql persistence must set either `jdbcUrl` or `serviceRef`")]
    MissingConnection,
}

impl TryFrom<PersistenceOptions> for PersistenceConfig {
    type Error = PersistenceOptionsError;

    fn try_from(options: PersistenceOptions) -> Result<Self, Self::Error> {
        let postgresql = options
            .postgresql
            .ok_or(PersistenceOptionsError::MissingProvider)?;
        let jdbc_url = postgresql.jdbc_url.filter(|url| !url.trim().is_empty());
        match (jdbc_url, postgresql.service_ref) {
            (Some(_), Some(_)) => Err(PersistenceOptionsError::ConflictingConnection),
            (None, None) => Err(PersistenceOptionsError::MissingConnection),
            (Some(jdbc_url), None) => Ok(PersistenceConfig::ExplicitJdbc {
                secret_ref: postgresql.secret_ref,
                jdbc_url,
            }),
            (None, Some(service)) => Ok(PersistenceConfig::ServiceReference {
                secret_ref: postgresql.secret_ref,
                service,
            }),
        }
    }
}

impl From<PersistenceConfig> for PersistenceOptions {
    fn from(config: PersistenceConfig) -> Self {
        let postgresql = match config {
            PersistenceConfig::ExplicitJdbc {
                secret_ref,
                jdbc_url,
            } => PostgreSqlOptions {
                secret_ref,
                jdbc_url: Some(jdbc_url),
                service_ref: None,
            },
            PersistenceConfig::ServiceReference {
                secret_ref,
                service,
            } => PostgreSqlOptions {
                secret_ref,
                jdbc_url: None,
                service_ref: Some(service),
            },
        };
        PersistenceOptions {
            postgresql: Some(postgresql),
        }
    }
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
