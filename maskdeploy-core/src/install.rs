//! Installation of the masking UDFs.
//!
//! Three SQL files are read and executed verbatim, one batch each, in a
//! fixed order. The first failure stops the run; later files are not read.

use crate::{Result, error::MaskDeployError, session::Session};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// One of the masking functions this tool installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskFunction {
    /// Masks BIGINT values
    Bigint,
    /// Masks VARCHAR values
    Varchar,
    /// Masks TIMESTAMP values
    Timestamp,
}

impl MaskFunction {
    /// Installation order.
    pub const ALL: [Self; 3] = [Self::Bigint, Self::Varchar, Self::Timestamp];

    /// Function name as created in the database.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bigint => "f_mask_bigint",
            Self::Varchar => "f_mask_varchar",
            Self::Timestamp => "f_mask_timestamp",
        }
    }

    /// File holding the function definition.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Bigint => "f_mask_bigint.sql",
            Self::Varchar => "f_mask_varchar.sql",
            Self::Timestamp => "f_mask_timestamp.sql",
        }
    }

    /// Location of the definition under `sql_dir`.
    pub fn path_in(self, sql_dir: &Path) -> PathBuf {
        sql_dir.join(self.file_name())
    }
}

impl std::fmt::Display for MaskFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Functions installed during a run, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Successfully executed definitions
    pub installed: Vec<MaskFunction>,
}

impl InstallReport {
    /// Whether every function in [`MaskFunction::ALL`] was installed.
    pub fn is_complete(&self) -> bool {
        self.installed == MaskFunction::ALL
    }

    fn names(&self) -> String {
        if self.installed.is_empty() {
            return "none".to_string();
        }
        self.installed
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Reads and executes every masking function definition in order.
///
/// Each file is read whole as UTF-8 and sent as one batch. No result sets
/// are consumed.
///
/// # Errors
/// Returns `SqlFile` if a definition cannot be read, or `Execution` if the
/// server rejects it. Nothing after the failing file is read or executed.
pub async fn install_mask_functions<S: Session + ?Sized>(
    session: &mut S,
    sql_dir: &Path,
) -> Result<InstallReport> {
    let mut report = InstallReport::default();

    for function in MaskFunction::ALL {
        if let Err(e) = install_one(session, sql_dir, function).await {
            error!(
                "Installing {} failed; already installed: {}",
                function,
                report.names()
            );
            return Err(e);
        }
        info!("✓ Installed {}", function);
        report.installed.push(function);
    }

    Ok(report)
}

async fn install_one<S: Session + ?Sized>(
    session: &mut S,
    sql_dir: &Path,
    function: MaskFunction,
) -> Result<()> {
    let path = function.path_in(sql_dir);
    let sql = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| MaskDeployError::SqlFile {
            path: path.clone(),
            source,
        })?;

    tracing::debug!("Executing {} ({} bytes)", path.display(), sql.len());
    session
        .execute_batch(&sql)
        .await
        .map_err(|e| MaskDeployError::execution_failed(function.name(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_order_is_fixed() {
        let names: Vec<_> = MaskFunction::ALL.iter().map(|f| f.file_name()).collect();
        assert_eq!(
            names,
            vec!["f_mask_bigint.sql", "f_mask_varchar.sql", "f_mask_timestamp.sql"]
        );
    }

    #[test]
    fn test_path_in_joins_sql_dir() {
        let path = MaskFunction::Varchar.path_in(Path::new("/opt/udfs"));
        assert_eq!(path, PathBuf::from("/opt/udfs/f_mask_varchar.sql"));
    }

    #[test]
    fn test_report_completeness() {
        let mut report = InstallReport::default();
        assert!(!report.is_complete());
        assert_eq!(report.names(), "none");

        report.installed.push(MaskFunction::Bigint);
        assert_eq!(report.names(), "f_mask_bigint");

        report.installed.extend([MaskFunction::Varchar, MaskFunction::Timestamp]);
        assert!(report.is_complete());
    }
}
