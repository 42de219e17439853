//! Session traits and the Redshift implementation.
//!
//! A `Connector` opens exactly one `Session` per run. The installer and the
//! deploy flow only see these traits, so they can be driven by an in-memory
//! session in tests.
//!
//! # Module Structure
//! - `redshift`: `sqlx` PostgreSQL-protocol connector for Redshift clusters

use crate::{ConnectionParams, Result};
use async_trait::async_trait;

mod redshift;

pub use redshift::{RedshiftConnector, RedshiftSession};

/// An open, exclusively owned statement-execution handle.
///
/// # Security
/// Implementations must not log the SQL they are given at levels above DEBUG,
/// and must never log connection credentials.
#[async_trait]
pub trait Session: Send {
    /// Executes `sql` verbatim as one batch, discarding any result sets.
    ///
    /// # Errors
    /// Returns a `Statement` error if the server rejects any statement in the
    /// batch, or an `Io` error if the session is already closed.
    async fn execute_batch(&mut self, sql: &str) -> Result<()>;

    /// Releases the connection. Calling it again is a no-op.
    ///
    /// # Errors
    /// Returns a connection error if the graceful shutdown fails.
    async fn close(&mut self) -> Result<()>;
}

/// Opens sessions from operator-supplied parameters.
#[async_trait]
pub trait Connector: Send + Sync {
    /// The session type this connector produces.
    type Session: Session;

    /// Opens one connection. No retries.
    ///
    /// # Errors
    /// Returns a connection error for unreachable hosts, rejected
    /// authentication, unknown databases, or a connect timeout.
    async fn connect(&self, params: &ConnectionParams) -> Result<Self::Session>;
}
