//! Database error types

use thiserror::Error;

/// Errors raised by the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Check constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value could not be turned back into a domain value
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl DatabaseError {
    /// Creates a not found error for an entity type and identifier
    ///
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::not_found("Claim", 42);
    /// assert!(error.to_string().contains("Claim"));
    /// ```
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} with id '{}' not found", entity, id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }

    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Maps SQLx errors by PostgreSQL error code
///
/// See <https://www.postgresql.org/docs/current/errcodes-appendix.html>
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolClosed => {
                DatabaseError::ConnectionFailed(error.to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DatabaseError::CorruptRow(error.to_string())
            }
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => DatabaseError::DuplicateEntry(db_err.message().to_string()),
                Some("23514") => DatabaseError::ConstraintViolation(db_err.message().to_string()),
                _ => DatabaseError::QueryFailed(db_err.message().to_string()),
            },
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(DatabaseError::from(sqlx::Error::RowNotFound).is_not_found());
    }

    #[test]
    fn test_pool_errors_are_connection_errors() {
        assert!(DatabaseError::from(sqlx::Error::PoolTimedOut).is_connection_error());
        assert!(DatabaseError::from(sqlx::Error::PoolClosed).is_connection_error());
    }
}
