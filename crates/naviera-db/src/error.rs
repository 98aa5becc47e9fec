//! Database-specific error types and conversions.

use naviera_core::error::NavieraError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Query failed: {0}")]
    Query(String),

    /// A unique index rejected the write, or a concurrent transaction
    /// committed the same key first.
    #[error("Uniqueness conflict: {0}")]
    Conflict(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Corrupt row: {0}")]
    Decode(String),
}

impl DbError {
    /// Classify a failed statement.
    ///
    /// SurrealDB reports index violations as "Database index `x` already
    /// contains ..." and optimistic commit failures as "... read or write
    /// conflict ...". Both mean another writer got there first.
    pub fn from_statement(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        if is_conflict_message(&msg) {
            DbError::Conflict(msg)
        } else {
            DbError::Query(msg)
        }
    }
}

fn is_conflict_message(msg: &str) -> bool {
    let lower = msg.to_ascii_lowercase();
    lower.contains("already contains")
        || lower.contains("write conflict")
        || lower.contains("transaction conflict")
}

impl From<DbError> for NavieraError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Conflict(msg) => NavieraError::AlreadyExists { entity: msg },
            other => NavieraError::Database(other.to_string()),
        }
    }
}
