// EN: src/bin/cmdline.rs

use anyhow::Result;
use clap::Parser;
use cmdline::{CommandLineError, cli::Cli};
use colored::*;
use std::io::Write;

/// The main entry point of the `cmdline` application.
/// It sets up logging, parses arguments, builds and runs the command,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        // --- Centralized Error Handling ---
        // A command that ran and failed exits with its own status when we know it.
        let exit_code = match e.downcast_ref::<CommandLineError>() {
            Some(CommandLineError::UnexpectedExitStatus { status, .. }) if *status > 0 => *status,
            Some(CommandLineError::CommandNotFound { .. }) => 127,
            _ => 1,
        };
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(exit_code);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let settings = cli.settings()?;
    let command_line = cli.to_command_line(&settings)?;

    if cli.dry_run {
        println!("{}", command_line.command()?);
        return Ok(());
    }

    let output = command_line.run()?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
