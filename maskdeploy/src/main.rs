//! Masking UDF installer for Redshift.
//!
//! Prompts for cluster connection parameters, opens one connection, and
//! installs `f_mask_bigint`, `f_mask_varchar`, and `f_mask_timestamp` from
//! SQL files in the working directory (or `--sql-dir`).
//!
//! # Security Guarantees
//! - Password entry is not echoed
//! - No credentials logged or printed
//! - The connection is closed on every path

use clap::Parser;
use maskdeploy_core::{RedshiftConnector, SessionConfig, SslMode, TerminalPrompter, deploy, init_logging};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "maskdeploy")]
#[command(about = "Install masking UDFs into a Redshift cluster")]
#[command(version)]
#[command(long_about = "
maskdeploy - Redshift masking UDF installer

Prompts for the cluster host, database name, user, port, and password, then
executes these files, in order, against the cluster:
- f_mask_bigint.sql
- f_mask_varchar.sql
- f_mask_timestamp.sql

Execution stops at the first failure. The connection is always closed.

EXAMPLES:
  maskdeploy
  maskdeploy --sql-dir ./udfs --ssl-mode require
")]
struct Cli {
    /// Directory holding the SQL definitions
    #[arg(
        long,
        env = "MASKDEPLOY_SQL_DIR",
        default_value = ".",
        help = "Directory containing f_mask_*.sql"
    )]
    sql_dir: PathBuf,

    /// TLS mode for the cluster connection
    #[arg(
        long,
        env = "MASKDEPLOY_SSL_MODE",
        default_value = "prefer",
        help = "TLS mode: disable, prefer, require, verify-ca, verify-full"
    )]
    ssl_mode: SslMode,

    /// Connect timeout in seconds
    #[arg(
        long,
        env = "MASKDEPLOY_CONNECT_TIMEOUT",
        default_value = "30",
        help = "Seconds to wait for the connection (1-300)"
    )]
    connect_timeout: u64,

    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity on stderr (-v, -vv, -vvv)"
    )]
    verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Only log errors")]
    quiet: bool,
}

impl Cli {
    fn session_config(&self) -> SessionConfig {
        SessionConfig::new()
            .with_ssl_mode(self.ssl_mode)
            .with_connect_timeout(Duration::from_secs(self.connect_timeout))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let connector = RedshiftConnector::new(cli.session_config())?;
    debug!("Using SQL directory {}", cli.sql_dir.display());

    let mut prompter = TerminalPrompter::new();
    let report = deploy(&mut prompter, &connector, &cli.sql_dir).await?;

    info!(
        "Done: {}",
        report
            .installed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}
