//! Error types with credential sanitization.
//!
//! No variant carries the password or the username. Connection failures are
//! described by host, port, and database only.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for maskdeploy operations.
///
/// # Security
/// Error messages never include credentials. Operator input is named by
/// field, not echoed back.
#[derive(Debug, Error)]
pub enum MaskDeployError {
    /// Operator input could not be interpreted (e.g. a non-numeric port)
    #[error("Invalid input for {field}")]
    InvalidInput {
        field: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Terminal I/O failed while prompting
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Database connection failed (credentials sanitized)
    #[error("Database connection failed: {context}")]
    Connection {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A SQL file was missing or unreadable
    #[error("Failed to read SQL file {}", path.display())]
    SqlFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The server rejected a statement batch
    #[error("Statement rejected by server")]
    Statement {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The database rejected a masking function definition
    #[error("Failed to install {function}")]
    Execution {
        function: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Convenience type alias for Results with MaskDeployError
pub type Result<T> = std::result::Result<T, MaskDeployError>;

impl MaskDeployError {
    /// Creates an input-format error for the named prompt field
    pub fn invalid_input<E>(field: &'static str, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::InvalidInput {
            field,
            source: Box::new(error),
        }
    }

    /// Creates a connection error with sanitized context
    ///
    /// `target` must already be credential-free, typically the `Display`
    /// form of [`crate::ConnectionParams`].
    pub fn connection_failed<E>(target: impl std::fmt::Display, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            context: format!("could not connect to {}", target),
            source: Box::new(error),
        }
    }

    /// Creates a statement error from a driver error
    pub fn statement_failed<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Statement {
            source: Box::new(error),
        }
    }

    /// Creates an execution error for a masking function
    pub fn execution_failed<E>(function: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Execution {
            function: function.into(),
            source: Box::new(error),
        }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_field_only() {
        let parse_err = "54x39".parse::<u16>().unwrap_err();
        let error = MaskDeployError::invalid_input("port", parse_err);

        let message = error.to_string();
        assert!(message.contains("port"));
        assert!(!message.contains("54x39"));
    }

    #[test]
    fn test_connection_error_uses_target_display() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = MaskDeployError::connection_failed("localhost:5439/dev", io);

        assert_eq!(
            error.to_string(),
            "Database connection failed: could not connect to localhost:5439/dev"
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_sql_file_error_includes_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = MaskDeployError::SqlFile {
            path: PathBuf::from("sql/f_mask_bigint.sql"),
            source: io,
        };

        assert!(error.to_string().contains("f_mask_bigint.sql"));
    }

    #[test]
    fn test_error_creation() {
        let error = MaskDeployError::configuration("connect timeout must be greater than 0");
        assert!(error.to_string().contains("connect timeout"));

        let io = std::io::Error::other("permission denied for schema public");
        let error = MaskDeployError::execution_failed("f_mask_varchar", io);
        assert_eq!(error.to_string(), "Failed to install f_mask_varchar");
    }

    #[test]
    fn test_statement_error_wraps_into_execution() {
        let server = std::io::Error::other("syntax error at or near \"RETURNS\"");
        let statement = MaskDeployError::statement_failed(server);
        assert_eq!(statement.to_string(), "Statement rejected by server");

        let error = MaskDeployError::execution_failed("f_mask_bigint", statement);
        let cause = std::error::Error::source(&error).unwrap();
        assert_eq!(cause.to_string(), "Statement rejected by server");
        let root = std::error::Error::source(cause).unwrap();
        assert!(root.to_string().contains("syntax error"));
    }
}
