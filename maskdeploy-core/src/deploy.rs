//! End-to-end provisioning flow.

use crate::{
    InstallReport, Result,
    install::install_mask_functions,
    prompt::{Prompter, collect_connection_params},
    session::{Connector, Session},
};
use std::path::Path;
use tracing::{info, warn};

/// Prompts for parameters, connects, installs the masking functions, and
/// closes the session.
///
/// The session is closed whether or not installation succeeded. An
/// installation error wins over a close error; a close error alone still
/// fails the run.
///
/// # Errors
/// Any input, connection, file, execution, or close error, unchanged.
pub async fn deploy<P, C>(prompter: &mut P, connector: &C, sql_dir: &Path) -> Result<InstallReport>
where
    P: Prompter + ?Sized,
    C: Connector + ?Sized,
{
    let params = collect_connection_params(prompter)?;
    let mut session = connector.connect(&params).await?;
    drop(params);

    let installed = install_mask_functions(&mut session, sql_dir).await;
    let closed = session.close().await;

    match (installed, closed) {
        (Ok(report), Ok(())) => {
            info!("✓ Installed {} masking functions", report.installed.len());
            Ok(report)
        }
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            warn!("Session close also failed: {}", close_err);
            Err(e)
        }
    }
}
