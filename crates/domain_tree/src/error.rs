//! Family tree domain errors

use thiserror::Error;

use core_kernel::{CoreError, PortError};

/// Errors returned by the family tree services
#[derive(Debug, Error)]
pub enum TreeError {
    /// A precondition on the arguments or the entity failed
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The entity to change does not exist in the store
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The persistence layer failed
    #[error("Persistence failure: {0}")]
    Persistence(PortError),
}

impl TreeError {
    pub fn validation(message: impl Into<String>) -> Self {
        TreeError::Validation(message.into())
    }

    pub fn not_found(entity: impl Into<String>, id: impl std::fmt::Display) -> Self {
        TreeError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TreeError::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TreeError::Validation(_))
    }
}

impl From<CoreError> for TreeError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => TreeError::Validation(message),
            negative @ CoreError::Negative { .. } => TreeError::Validation(negative.to_string()),
        }
    }
}

impl From<PortError> for TreeError {
    fn from(error: PortError) -> Self {
        match error {
            PortError::NotFound { kind, id } => TreeError::NotFound {
                entity: kind,
                id,
            },
            PortError::Validation { message, field: Some(field) } => {
                TreeError::Validation(format!("{}: {}", field, message))
            }
            PortError::Validation { message, field: None } => TreeError::Validation(message),
            other => TreeError::Persistence(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_errors_map_onto_tree_errors() {
        let not_found = TreeError::from(PortError::not_found("Family", 12));
        assert!(matches!(
            &not_found,
            TreeError::NotFound { entity, id } if entity == "Family" && id == "12"
        ));

        let named_field = TreeError::from(PortError::Validation {
            message: "must not be negative (got -1)".to_string(),
            field: Some("owner.id".to_string()),
        });
        assert!(matches!(
            &named_field,
            TreeError::Validation(msg) if msg == "owner.id: must not be negative (got -1)"
        ));

        let unnamed = TreeError::from(PortError::validation("text too long"));
        assert!(matches!(&unnamed, TreeError::Validation(msg) if msg == "text too long"));

        let cases = [
            PortError::conflict("duplicate child"),
            PortError::connection("refused"),
            PortError::internal("disk full"),
        ];
        for port in cases {
            assert!(matches!(TreeError::from(port), TreeError::Persistence(_)));
        }
    }

    #[test]
    fn test_negative_id_becomes_validation() {
        let error = TreeError::from(CoreError::require_not_negative("wife_id", -2).unwrap_err());
        assert!(error.is_validation());
        assert!(error.to_string().contains("wife_id"));
    }
}
