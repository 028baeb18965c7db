//! Database errors
//!
//! [`DatabaseError`] is what the pool, session and repositories return
//! internally. At the port boundary it is folded into a [`PortError`] so the
//! domain never sees SQLx types.

use core_kernel::PortError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: String, id: String },

    /// SQLSTATE 23505
    #[error("Unique violation: {0}")]
    UniqueViolation(String),

    /// SQLSTATE 23503
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// SQLSTATE 23502 and 23514
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Serialization failure or deadlock, or a transaction that could not be opened
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A stored row holds values no entity can be built from
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

impl DatabaseError {
    /// # Example
    ///
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::not_found("Note", "ENT-12");
    /// assert_eq!(error.to_string(), "Note with id 'ENT-12' not found");
    /// ```
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound { .. })
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::UniqueViolation(_)
                | DatabaseError::ForeignKeyViolation(_)
                | DatabaseError::ConstraintViolation(_)
        )
    }

    pub fn is_connection_error(&self) -> bool {
        matches!(self, DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted)
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::not_found("Row", "unknown"),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => DatabaseError::PoolExhausted,
            sqlx::Error::Io(io) => DatabaseError::ConnectionFailed(io.to_string()),
            sqlx::Error::Tls(tls) => DatabaseError::ConnectionFailed(tls.to_string()),
            sqlx::Error::ColumnDecode { index, source } => {
                DatabaseError::CorruptRow(format!("column {}: {}", index, source))
            }
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.code() {
                    Some(code) => classify_sqlstate(&code, message),
                    None => DatabaseError::QueryFailed(message),
                }
            }
            other => DatabaseError::QueryFailed(other.to_string()),
        }
    }
}

/// Picks the variant for a PostgreSQL SQLSTATE
///
/// See <https://www.postgresql.org/docs/current/errcodes-appendix.html>.
pub(crate) fn classify_sqlstate(code: &str, message: String) -> DatabaseError {
    match code {
        "23505" => DatabaseError::UniqueViolation(message),
        "23503" => DatabaseError::ForeignKeyViolation(message),
        "23502" | "23514" => DatabaseError::ConstraintViolation(message),
        "40001" | "40P01" => DatabaseError::TransactionFailed(message),
        class if class.starts_with("08") => DatabaseError::ConnectionFailed(message),
        _ => DatabaseError::QueryFailed(message),
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::MigrationFailed(error.to_string())
    }
}

impl From<DatabaseError> for PortError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound { entity, id } => PortError::NotFound { kind: entity, id },
            DatabaseError::UniqueViolation(message) | DatabaseError::ForeignKeyViolation(message) => {
                PortError::conflict(message)
            }
            DatabaseError::ConstraintViolation(message) => PortError::validation(message),
            DatabaseError::ConnectionFailed(message) => PortError::connection(message),
            DatabaseError::PoolExhausted => PortError::connection("connection pool exhausted"),
            other => PortError::internal_caused_by("database operation failed", other),
        }
    }
}
