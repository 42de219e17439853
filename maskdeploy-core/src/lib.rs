//! Core library for maskdeploy.
//!
//! maskdeploy installs three data-masking user-defined functions
//! (`f_mask_bigint`, `f_mask_varchar`, `f_mask_timestamp`) into a Redshift
//! cluster. The operator is prompted for connection parameters, one
//! connection is opened, the three SQL definitions are executed in order,
//! and the connection is closed.
//!
//! # Security Guarantees
//! - The password is read without echo and held in a zeroizing container
//! - Credentials never appear in logs, errors, `Debug`, or `Display` output
//! - Exactly one connection per run, closed on success and on failure
//!
//! # Architecture
//! - `prompt`: credential collection behind the `Prompter` trait
//! - `session`: `Connector`/`Session` traits and the `sqlx` Redshift implementation
//! - `install`: ordered execution of the SQL definitions
//! - `deploy`: the whole flow with guaranteed session release

pub mod config;
pub mod deploy;
pub mod error;
pub mod install;
pub mod logging;
pub mod prompt;
pub mod security;
pub mod session;

// Re-export commonly used types
pub use config::{ConnectionParams, SessionConfig, SslMode};
pub use deploy::deploy;
pub use error::{MaskDeployError, Result};
pub use install::{InstallReport, MaskFunction, install_mask_functions};
pub use logging::init_logging;
pub use prompt::{Prompter, TerminalPrompter, collect_connection_params};
pub use session::{Connector, RedshiftConnector, RedshiftSession, Session};
