// src/core/runner.rs

use crate::{
    constants::COMMAND_NOT_FOUND_OUTCODE,
    core::command_line::{CommandLine, CommandLineError},
    system::executor::ShellExecutor,
};
use std::collections::BTreeSet;

/// Executes built commands and classifies their exit status.
#[derive(Debug)]
pub struct Runner<'a, E> {
    executor: &'a E,
}

impl<'a, E: ShellExecutor> Runner<'a, E> {
    /// Creates a runner on top of a shell executor.
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    /// Builds, executes and judges `command_line`.
    ///
    /// On an expected exit status the executor's output is returned exactly as produced.
    /// Build errors are raised before anything is executed; the effects of a command
    /// that ran and failed are not undone.
    pub fn run(&self, command_line: &CommandLine) -> Result<E::Output, CommandLineError> {
        let (command, platform) = command_line.rendered()?;
        log::info!("Command :: {}", command);

        let result = self.executor.execute(&command, platform)?;
        classify_outcome(
            &command,
            command_line.executable(),
            result.status,
            command_line.expected(),
        )?;
        Ok(result.output)
    }
}

/// Accepts `status` if it is one of `expected`.
pub fn classify_outcome(
    command: &str,
    executable: &str,
    status: i32,
    expected: &BTreeSet<i32>,
) -> Result<(), CommandLineError> {
    if expected.contains(&status) {
        log::debug!("Exit status {} is expected.", status);
        return Ok(());
    }
    log::debug!("Exit status {} is not in {:?}.", status, expected);

    if status == COMMAND_NOT_FOUND_OUTCODE {
        return Err(CommandLineError::CommandNotFound {
            command: command.to_string(),
            executable: executable.to_string(),
        });
    }
    Err(CommandLineError::UnexpectedExitStatus {
        command: command.to_string(),
        status,
        expected: expected
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    })
}
