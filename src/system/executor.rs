// EN: src/system/executor.rs

use crate::system::platform::Platform;
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

/// Failures of the shell itself, as opposed to a command that ran and failed.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The command string was empty or only whitespace.
    #[error("No command specified to run.")]
    EmptyCommand,
    /// The shell process could not be started. Holds the command and the OS error.
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    /// Stdout could not be decoded as UTF-8.
    #[error("Command '{command}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        /// The command that produced the output.
        command: String,
        /// The decoding error.
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// What a shell run produced: the captured output and the exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOutput<T> {
    /// Captured standard output, passed back to the caller untouched.
    pub output: T,
    /// The exit status, `-1` when the process ended without one (e.g. killed by a signal).
    pub status: i32,
}

/// Runs a complete command string through a shell.
///
/// The status is only reported once output capture has finished, the way shell
/// backticks behave.
pub trait ShellExecutor {
    /// The captured output type. Runners hand it back without inspecting it.
    type Output;

    /// Executes `command_line`, which was quoted for `platform`, and waits for it to
    /// finish.
    fn execute(
        &self,
        command_line: &str,
        platform: Platform,
    ) -> Result<ShellOutput<Self::Output>, ExecutionError>;
}

/// The system shell: `sh -c` for unix commands, `cmd /C` for windows commands.
/// Stdout is captured, stderr is passed through to the user's terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl SystemShell {
    /// The shell program and its flag for commands rendered for `platform`.
    pub fn shell_for(platform: Platform) -> (&'static str, &'static str) {
        match platform {
            Platform::Unix => ("sh", "-c"),
            Platform::Windows => ("cmd", "/C"),
        }
    }

    fn command_for(command_line: &str, platform: Platform) -> StdCommand {
        let (program, flag) = Self::shell_for(platform);
        let mut command = StdCommand::new(program);
        command.arg(flag).arg(command_line);
        command
    }
}

impl ShellExecutor for SystemShell {
    type Output = String;

    fn execute(
        &self,
        command_line: &str,
        platform: Platform,
    ) -> Result<ShellOutput<String>, ExecutionError> {
        if command_line.trim().is_empty() {
            return Err(ExecutionError::EmptyCommand);
        }

        let command_output = Self::command_for(command_line, platform)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| ExecutionError::CommandFailed(command_line.to_string(), e))?;

        let status = command_output.status.code().unwrap_or(-1);
        log::debug!("Command '{}' exited with status {}.", command_line, status);

        let output =
            String::from_utf8(command_output.stdout).map_err(|e| ExecutionError::InvalidUtf8Output {
                command: command_line.to_string(),
                source: e,
            })?;

        Ok(ShellOutput { output, status })
    }
}
