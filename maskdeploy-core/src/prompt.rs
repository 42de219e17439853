//! Interactive collection of connection parameters.
//!
//! The operator is asked, in a fixed order, for host, database name, user,
//! port, and password. There are no defaults and no retries: the first bad
//! answer ends the run.

use crate::{ConnectionParams, Result, error::MaskDeployError};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Prompt shown for the cluster host.
pub const HOST_PROMPT: &str = "Cluster Host: ";
/// Prompt shown for the database name.
pub const DATABASE_PROMPT: &str = "Database Name: ";
/// Prompt shown for the user name.
pub const USER_PROMPT: &str = "User: ";
/// Prompt shown for the port.
pub const PORT_PROMPT: &str = "Port: ";
/// Prompt shown for the password (input is not echoed).
pub const PASSWORD_PROMPT: &str = "Password: ";

/// Source of operator answers.
pub trait Prompter {
    /// Shows `prompt` and reads one echoed line, without its terminator.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Shows `prompt` and reads one line with echo disabled.
    fn read_password(&mut self, prompt: &str) -> Result<String>;
}

/// Prompts on stdout and reads answers from stdin.
///
/// The password is read through `rpassword`, which switches terminal echo
/// off for the duration of the read.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    /// Creates a prompter bound to the process terminal.
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(prompt.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|e| MaskDeployError::io("Failed to write prompt", e))?;
        drop(stdout);

        let mut stdin = io::stdin().lock();
        read_answer(&mut stdin)
            .map_err(|e| MaskDeployError::io(format!("Failed to read answer to '{}'", prompt.trim_end()), e))
    }

    fn read_password(&mut self, prompt: &str) -> Result<String> {
        rpassword::prompt_password(prompt)
            .map_err(|e| MaskDeployError::io("Failed to read password", e))
    }
}

/// Reads one answer line and strips its line terminator.
///
/// End of input before any byte is an `UnexpectedEof` error; a bare newline
/// is an empty answer.
pub fn read_answer<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before an answer was given",
        ));
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

/// Parses the port answer.
///
/// Surrounding whitespace is ignored. Anything else that is not an integer
/// in `0..=65535` is an input-format error.
pub fn parse_port(input: &str) -> Result<u16> {
    input
        .trim()
        .parse::<u16>()
        .map_err(|e| MaskDeployError::invalid_input("port", e))
}

/// Asks the operator for every connection parameter, in order.
///
/// # Errors
/// Returns `InvalidInput` if the port is not an integer (the password is then
/// never requested), or `Io` if the terminal cannot be read.
pub fn collect_connection_params<P: Prompter + ?Sized>(
    prompter: &mut P,
) -> Result<ConnectionParams> {
    let host = prompter.read_line(HOST_PROMPT)?;
    let database = prompter.read_line(DATABASE_PROMPT)?;
    let user = prompter.read_line(USER_PROMPT)?;
    let port = parse_port(&prompter.read_line(PORT_PROMPT)?)?;
    let password = prompter.read_password(PASSWORD_PROMPT)?;

    let params = ConnectionParams::new(host, database, user, port, password);
    debug!("Collected connection parameters for {}", params);
    Ok(params)
}
