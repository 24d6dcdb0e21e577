/// Structured error types for album data access.
///
/// Uses `thiserror` so callers can branch on the failure kind.
/// The binary (albumctl-cli) wraps these in `anyhow` with stage context.
use thiserror::Error;

/// Main error type for albumctl-store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Pool or session could not be established
    #[error("unable to connect to database")]
    Connection {
        #[source]
        source: sqlx::Error,
    },

    /// Statement execution or row decoding failed
    #[error("{operation} {input}")]
    Query {
        operation: &'static str,
        input: String,
        #[source]
        source: sqlx::Error,
    },

    /// Lookup by id matched no row
    #[error("album {id}: no such album")]
    NotFound { id: i64 },

    /// Caller deadline elapsed before storage answered
    #[error("{operation}: timed out after {seconds}s")]
    Timeout {
        operation: &'static str,
        seconds: u64,
    },

    /// Schema migration failed
    #[error("migration failed")]
    Migration {
        #[from]
        source: sqlx::migrate::MigrateError,
    },
}

/// Result type alias for albumctl-store operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Create a connection error
    pub fn connection(source: sqlx::Error) -> Self {
        Self::Connection { source }
    }

    /// Create a query error with the operation name and its input
    pub fn query(operation: &'static str, input: impl ToString, source: sqlx::Error) -> Self {
        Self::Query {
            operation,
            input: input.to_string(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
