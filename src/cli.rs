// src/cli.rs

use crate::{
    constants::PATH_ENV_VAR,
    core::{
        command_line::CommandLine, config_loader::Settings, parameters, paths::PathConfig,
    },
    models::QuotingMode,
    system::platform::Platform,
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// cmdline: build an injection-safe shell command from a template and run it.
///
/// Parameters are referenced in the template as `:name` or `:{name}` and are quoted
/// for the target shell before substitution.
///
/// Example:
///   cmdline convert ':in -resize 50% :out' -p in='my photo.jpg' -p out=thumb.jpg
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The program to run. Never quoted.
    pub executable: String,

    /// The argument template, e.g. `:one :{two}`.
    #[arg(default_value = "", allow_hyphen_values = true)]
    pub template: String,

    /// A template parameter. Repeat a name to pass a list.
    #[arg(short, long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,

    /// Directory prefixed to the executable.
    #[arg(long, env = PATH_ENV_VAR)]
    pub path: Option<String>,

    /// Discard the command's stderr.
    #[arg(long)]
    pub swallow_stderr: bool,

    /// Exit statuses treated as success (default: 0).
    #[arg(
        short,
        long = "expect",
        value_name = "CODE",
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub expect: Vec<i32>,

    /// Refuse values that cannot be quoted safely for cmd.exe.
    #[arg(long)]
    pub strict: bool,

    /// Render for this shell instead of detecting it.
    #[arg(long, value_enum)]
    pub platform: Option<PlatformArg>,

    /// Print the command instead of running it.
    #[arg(long)]
    pub dry_run: bool,

    /// Read defaults from a TOML settings file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Shell flavours selectable from the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformArg {
    /// POSIX sh quoting, `2>/dev/null`.
    Unix,
    /// cmd.exe quoting, `2>NUL`.
    Windows,
}

impl From<PlatformArg> for Platform {
    fn from(value: PlatformArg) -> Self {
        match value {
            PlatformArg::Unix => Self::Unix,
            PlatformArg::Windows => Self::Windows,
        }
    }
}

impl Cli {
    /// Loads the settings file named by `--config`, or the defaults.
    pub fn settings(&self) -> Result<Settings> {
        match &self.config {
            Some(file) => Ok(Settings::load(file)?),
            None => Ok(Settings::default()),
        }
    }

    /// Assembles the `CommandLine`. Flags given on the command line win over `settings`.
    pub fn to_command_line(&self, settings: &Settings) -> Result<CommandLine> {
        let params = parameters::params_from_assignments(&self.params)
            .context("Failed to read --param values")?;

        let mut options = settings.to_options();
        options.swallow_stderr |= self.swallow_stderr;
        if self.strict {
            options.quoting = QuotingMode::Strict;
        }
        if !self.expect.is_empty() {
            options.expected_outcodes = self.expect.iter().copied().collect();
        }

        let path = match self.path.as_ref().or(settings.path.as_ref()) {
            Some(dir) => PathConfig::Fixed(dir.clone()),
            None => PathConfig::Global,
        };

        let mut command_line = CommandLine::new(&self.executable, &self.template)
            .params(params)
            .options(options)
            .path(path);
        if let Some(platform) = self.platform {
            command_line = command_line.platform(platform.into());
        }
        Ok(command_line)
    }
}
