//! Data access ports
//!
//! The domain services never talk to a database. They receive a unit of work
//! and pull typed repositories out of it:
//!
//! ```text
//!   NoteService / MultimediaLinkService / FamilyService
//!                        |
//!        UnitOfWork + RepositoryProvider<E> + Repository<E>
//!                 /                          \
//!     infra_db (PostgreSQL)          domain_tree::adapters::memory
//! ```
//!
//! # Write semantics
//!
//! Repository writes are staged inside the unit of work that produced the
//! repository. Other units of work see them only after
//! [`UnitOfWork::commit`] succeeds, and a failed commit leaves the store as
//! it was.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::CoreError;
use crate::identifiers::{EntityId, TreeId};

/// Boxed cause carried by store failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by a repository or unit of work
#[derive(Debug, Error)]
pub enum PortError {
    #[error("{kind} {id} does not exist")]
    NotFound { kind: String, id: String },

    #[error("invalid {}: {message}", field.as_deref().unwrap_or("input"))]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("conflicting write: {message}")]
    Conflict { message: String },

    /// The store could not be reached; retrying may succeed
    #[error("store unreachable: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("store failure: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl PortError {
    pub fn not_found(kind: impl Into<String>, id: impl std::fmt::Display) -> Self {
        PortError::NotFound {
            kind: kind.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an underlying store error as an internal failure
    pub fn internal_caused_by(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PortError::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

impl From<CoreError> for PortError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => PortError::validation(message),
            CoreError::Negative { field, value } => PortError::Validation {
                message: format!("must not be negative (got {})", value),
                field: Some(field),
            },
        }
    }
}

/// A record that lives inside a family tree
///
/// Every persisted entity is owned by exactly one tree and carries a
/// store-assigned id. Until it is stored the id is [`EntityId::UNSAVED`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human readable kind used in errors and logs
    const KIND: &'static str;

    fn id(&self) -> EntityId;

    fn set_id(&mut self, id: EntityId);

    fn tree_id(&self) -> TreeId;

    /// Checks entity-level invariants before the entity is written
    fn validate(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

/// Basic persistence operations for one entity type
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Stages an insert and returns the entity carrying its newly assigned id
    async fn add(&self, entity: E) -> Result<E, PortError>;

    /// Stages a full replacement of a stored entity
    async fn update(&self, entity: &E) -> Result<(), PortError>;

    /// Stages removal of a stored entity
    async fn delete(&self, entity: &E) -> Result<(), PortError>;

    /// Looks up one entity of a tree
    async fn find(&self, tree_id: TreeId, id: EntityId) -> Result<Option<E>, PortError>;

    /// Returns every entity of a tree, ordered by id
    async fn get_by_tree(&self, tree_id: TreeId) -> Result<Vec<E>, PortError>;
}

/// A set of repository operations committed as one transaction
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Makes every staged change durable
    async fn commit(&self) -> Result<(), PortError>;

    /// Discards every staged change
    async fn rollback(&self) -> Result<(), PortError>;
}

/// A unit of work able to hand out the repository for `E`
pub trait RepositoryProvider<E: Entity>: UnitOfWork {
    fn repository(&self) -> Arc<dyn Repository<E>>;
}

/// Produces a fresh unit of work per use case
#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync + 'static {
    type UnitOfWork: UnitOfWork + 'static;

    async fn begin(&self) -> Result<Self::UnitOfWork, PortError>;
}

/// Whether an adapter can serve requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
}

/// Outcome of probing an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    pub latency_ms: u64,
    pub message: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl HealthCheckResult {
    pub fn healthy(adapter_id: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Healthy,
            latency_ms,
            message: None,
            checked_at: Utc::now(),
        }
    }

    pub fn unhealthy(adapter_id: impl Into<String>, latency_ms: u64, message: impl Into<String>) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Unhealthy,
            latency_ms,
            message: Some(message.into()),
            checked_at: Utc::now(),
        }
    }

    pub fn is_operational(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// An adapter that can probe its backing store
#[async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Note", EntityId::new(123));
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert_eq!(error.to_string(), "Note ENT-123 does not exist");
    }

    #[test]
    fn test_port_error_transient() {
        assert!(PortError::connection("refused").is_transient());
        assert!(!PortError::validation("bad").is_transient());
        assert!(!PortError::conflict("duplicate").is_transient());
    }

    #[test]
    fn test_validation_message_names_field() {
        let error = PortError::Validation {
            message: "too long".to_string(),
            field: Some("title".to_string()),
        };
        assert_eq!(error.to_string(), "invalid title: too long");
        assert_eq!(PortError::validation("bad").to_string(), "invalid input: bad");
    }

    #[test]
    fn test_internal_keeps_its_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let error = PortError::internal_caused_by("write failed", cause);
        let source = std::error::Error::source(&error).map(|e| e.to_string());
        assert_eq!(source.as_deref(), Some("disk full"));
    }

    #[test]
    fn test_core_error_conversion() {
        let error: PortError = CoreError::validation("text is empty").into();
        assert!(matches!(error, PortError::Validation { .. }));
    }

    #[test]
    fn test_health_results() {
        assert!(HealthCheckResult::healthy("memory", 0).is_operational());
        let down = HealthCheckResult::unhealthy("postgres", 12, "refused");
        assert!(!down.is_operational());
        assert_eq!(down.message.as_deref(), Some("refused"));
    }
}
