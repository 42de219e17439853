//! Redshift session over the PostgreSQL wire protocol.
//!
//! # Security Features
//! - One connection per run, never pooled
//! - Connect timeout bounds the handshake
//! - Error context carries host, port, and database only
//! - `PgConnectOptions` holds the password and is never logged

use super::{Connector, Session};
use crate::{ConnectionParams, Result, SessionConfig, SslMode, error::MaskDeployError};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgSslMode};
use sqlx::{Connection, Executor};
use tracing::{debug, info};

/// Maps the configured TLS mode to the driver's.
fn pg_ssl_mode(mode: SslMode) -> PgSslMode {
    match mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require => PgSslMode::Require,
        SslMode::VerifyCa => PgSslMode::VerifyCa,
        SslMode::VerifyFull => PgSslMode::VerifyFull,
    }
}

/// Opens single PostgreSQL-protocol connections to a Redshift cluster.
#[derive(Debug, Clone)]
pub struct RedshiftConnector {
    config: SessionConfig,
}

impl RedshiftConnector {
    /// Creates a connector after validating `config`.
    ///
    /// # Errors
    /// Returns a configuration error if `config` is invalid
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Gets the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Builds driver options from the operator's parameters.
    ///
    /// # Security
    /// The returned value contains the password. Do not log it.
    pub fn connect_options(&self, params: &ConnectionParams) -> PgConnectOptions {
        PgConnectOptions::new_without_pgpass()
            .host(&params.host)
            .port(params.port)
            .database(&params.database)
            .username(params.credentials.username())
            .password(params.credentials.password())
            .ssl_mode(pg_ssl_mode(self.config.ssl_mode))
            .application_name(&self.config.application_name)
    }
}

#[async_trait]
impl Connector for RedshiftConnector {
    type Session = RedshiftSession;

    async fn connect(&self, params: &ConnectionParams) -> Result<RedshiftSession> {
        let target = params.to_string();
        info!("Connecting to {} (ssl mode {})", target, self.config.ssl_mode);

        let options = self.connect_options(params);
        let conn = tokio::time::timeout(
            self.config.connect_timeout,
            PgConnection::connect_with(&options),
        )
        .await
        .map_err(|e| MaskDeployError::connection_failed(&target, e))?
        .map_err(|e| MaskDeployError::connection_failed(&target, e))?;

        info!("✓ Connected to {}", target);
        Ok(RedshiftSession {
            conn: Some(conn),
            target,
        })
    }
}

/// The single open connection of a run.
///
/// Dropping an unclosed session still tears down the socket; `close` does it
/// gracefully and reports failures.
pub struct RedshiftSession {
    conn: Option<PgConnection>,
    target: String,
}

impl RedshiftSession {
    /// Whether the connection is still open.
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}

impl std::fmt::Debug for RedshiftSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedshiftSession")
            .field("target", &self.target)
            .field("open", &self.is_open())
            .finish()
    }
}

#[async_trait]
impl Session for RedshiftSession {
    async fn execute_batch(&mut self, sql: &str) -> Result<()> {
        let conn = self.conn.as_mut().ok_or_else(|| {
            MaskDeployError::io(
                format!("session to {} is closed", self.target),
                std::io::Error::new(std::io::ErrorKind::NotConnected, "session is closed"),
            )
        })?;

        // Simple-query protocol: multiple statements and $$ bodies pass through untouched
        let result = conn
            .execute(sqlx::raw_sql(sql))
            .await
            .map_err(MaskDeployError::statement_failed)?;
        debug!("Batch executed ({} rows affected)", result.rows_affected());
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().await.map_err(|e| MaskDeployError::Connection {
                context: format!("failed to close session to {}", self.target),
                source: Box::new(e),
            })?;
            info!("Closed session to {}", self.target);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn params() -> ConnectionParams {
        ConnectionParams::new(
            "cluster.example.com".to_string(),
            "dev".to_string(),
            "admin".to_string(),
            5439,
            "x".to_string(),
        )
    }

    #[test]
    fn test_connector_rejects_invalid_config() {
        let config = SessionConfig::new().with_connect_timeout(Duration::ZERO);
        assert!(RedshiftConnector::new(config).is_err());
    }

    #[test]
    fn test_connect_options_from_params() {
        let connector = RedshiftConnector::new(SessionConfig::default()).unwrap();
        let options = connector.connect_options(&params());

        assert_eq!(options.get_host(), "cluster.example.com");
        assert_eq!(options.get_port(), 5439);
        assert_eq!(options.get_database(), Some("dev"));
        assert_eq!(options.get_username(), "admin");
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Prefer));
        assert_eq!(
            options.get_application_name(),
            Some(connector.config().application_name.as_str())
        );
    }

    #[test]
    fn test_ssl_mode_mapping() {
        assert!(matches!(pg_ssl_mode(SslMode::Disable), PgSslMode::Disable));
        assert!(matches!(pg_ssl_mode(SslMode::Require), PgSslMode::Require));
        assert!(matches!(pg_ssl_mode(SslMode::VerifyCa), PgSslMode::VerifyCa));
        assert!(matches!(
            pg_ssl_mode(SslMode::VerifyFull),
            PgSslMode::VerifyFull
        ));
    }

    #[tokio::test]
    async fn test_closed_session_rejects_batches() {
        let mut session = RedshiftSession {
            conn: None,
            target: "cluster.example.com:5439/dev".to_string(),
        };
        assert!(!session.is_open());

        match session.execute_batch("SELECT 1").await {
            Err(MaskDeployError::Io { source, .. }) => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotConnected);
            }
            other => panic!("expected NotConnected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_session_close_is_idempotent() {
        let mut session = RedshiftSession {
            conn: None,
            target: "cluster.example.com:5439/dev".to_string(),
        };

        session.close().await.unwrap();
        session.close().await.unwrap();

        assert!(!session.is_open());
        assert_eq!(
            format!("{:?}", session),
            "RedshiftSession { target: \"cluster.example.com:5439/dev\", open: false }"
        );
    }

    #[tokio::test]
    async fn test_connect_refused_fails_without_retry() {
        let connector = RedshiftConnector::new(
            SessionConfig::new()
                .with_ssl_mode(SslMode::Disable)
                .with_connect_timeout(Duration::from_secs(5)),
        )
        .unwrap();
        let mut params = params();
        params.host = "127.0.0.1".to_string();
        params.port = 1;

        let result = connector.connect(&params).await;
        assert!(matches!(result, Err(MaskDeployError::Connection { .. })));
    }
}
