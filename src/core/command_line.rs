//! # Command Line
//!
//! `CommandLine` is built once per invocation: an executable, a template and its
//! parameters go in, a single shell-interpreted string comes out. Running it hands
//! that string to a `ShellExecutor` and judges the exit status.
//!
//! ```no_run
//! use cmdline::CommandLine;
//!
//! let output = CommandLine::new("convert", ":in -resize 50% :out")
//!     .param("in", "photo one.jpg")
//!     .param("out", "thumb.jpg")
//!     .swallow_stderr(true)
//!     .run()?;
//! # Ok::<(), cmdline::CommandLineError>(())
//! ```

use crate::{
    core::{
        compiler,
        paths::{self, PathConfig},
        runner::Runner,
    },
    models::{CommandOptions, ParamValue, Params, QuotingMode},
    system::{
        executor::{ExecutionError, ShellExecutor, SystemShell},
        platform::Platform,
    },
};
use std::{cell::OnceCell, collections::BTreeSet};
use thiserror::Error;

/// Every failure of building or running a command.
#[derive(Error, Debug)]
pub enum CommandLineError {
    /// The template interpolates `:swallow_stderr` or `:expected_outcodes`.
    #[error(
        "You have an argument named :swallow_stderr or :expected_outcodes. Don't use that, as it's reserved for CommandLine to use"
    )]
    ReservedParameter,
    /// A token in the template has no parameter.
    #[error("No value was given for the interpolation token '{token}'.")]
    UnresolvedParameter {
        /// The token as written in the template.
        token: String,
    },
    /// Strict quoting refused a value that double quotes cannot protect.
    #[error("Parameter '{name}' contains a double quote and cannot be quoted safely for cmd.exe.")]
    UnsafeValue {
        /// The offending parameter.
        name: String,
    },
    /// The command finished with a status outside the expected set.
    #[error("Command '{command}' returned {status}. Expected {expected}")]
    UnexpectedExitStatus {
        /// The command that ran.
        command: String,
        /// The observed exit status.
        status: i32,
        /// The accepted statuses, comma separated.
        expected: String,
    },
    /// The shell could not find the executable (status 127, not expected).
    #[error("Command '{executable}' not found while running '{command}' (exit status 127).")]
    CommandNotFound {
        /// The command that ran.
        command: String,
        /// The executable the shell failed to find.
        executable: String,
    },
    /// The shell itself could not be run.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// A shell command assembled from a template and named parameters.
#[derive(Debug, Clone)]
pub struct CommandLine {
    executable: String,
    template: String,
    params: Params,
    options: CommandOptions,
    path: PathConfig,
    platform: Option<Platform>,
    rendered: OnceCell<(String, Platform)>,
}

impl CommandLine {
    /// Creates a command for `executable` with the given argument template.
    pub fn new(executable: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            template: template.into(),
            params: Params::new(),
            options: CommandOptions::default(),
            path: PathConfig::default(),
            platform: None,
            rendered: OnceCell::new(),
        }
    }

    /// Binds a parameter, replacing any previous value of the same name.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self.invalidate()
    }

    /// Binds every parameter of `params`.
    pub fn params(mut self, params: Params) -> Self {
        self.params.extend(params);
        self.invalidate()
    }

    /// Replaces all options at once.
    pub fn options(mut self, options: CommandOptions) -> Self {
        self.options = options;
        self.invalidate()
    }

    /// Discards stderr through a platform redirection when `true`.
    pub fn swallow_stderr(mut self, swallow: bool) -> Self {
        self.options.swallow_stderr = swallow;
        self.invalidate()
    }

    /// Sets the exit statuses treated as success. Replaces the default `{0}`.
    pub fn expected_outcodes<I>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        self.options.expected_outcodes = codes.into_iter().collect();
        self.invalidate()
    }

    /// Sets the quoting policy for double-quote platforms.
    pub fn quoting(mut self, quoting: QuotingMode) -> Self {
        self.options.quoting = quoting;
        self.invalidate()
    }

    /// Overrides where the executable prefix comes from.
    pub fn path(mut self, path: PathConfig) -> Self {
        self.path = path;
        self.invalidate()
    }

    /// Renders for `platform` instead of probing the system.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self.invalidate()
    }

    fn invalidate(mut self) -> Self {
        self.rendered = OnceCell::new();
        self
    }

    /// The executable as given, without any path prefix.
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// The accepted exit statuses.
    pub fn expected(&self) -> &BTreeSet<i32> {
        &self.options.expected_outcodes
    }

    /// The final command string.
    ///
    /// Computed on first call and reused afterwards, so later changes to the global
    /// path or the platform do not alter an already rendered command.
    pub fn command(&self) -> Result<String, CommandLineError> {
        self.rendered().map(|(command, _)| command)
    }

    /// The final command string together with the platform it was quoted for.
    /// Memoized like [`CommandLine::command`].
    pub fn rendered(&self) -> Result<(String, Platform), CommandLineError> {
        if let Some(rendered) = self.rendered.get() {
            return Ok(rendered.clone());
        }
        let platform = self.platform.unwrap_or_else(Platform::detect);
        let prefix = self.path.resolve();
        let command = render(
            prefix.as_deref(),
            &self.executable,
            &self.template,
            &self.params,
            &self.options,
            platform,
        )?;
        Ok(self.rendered.get_or_init(|| (command, platform)).clone())
    }

    /// Runs the command through the system shell and returns its stdout.
    ///
    /// The shell is the one of the platform the command was rendered for, so a
    /// command rendered for windows is never handed to `sh`.
    pub fn run(&self) -> Result<String, CommandLineError> {
        self.run_with(&SystemShell)
    }

    /// Runs the command through `executor`.
    pub fn run_with<E: ShellExecutor>(&self, executor: &E) -> Result<E::Output, CommandLineError> {
        Runner::new(executor).run(self)
    }
}

/// Builds a command string in one call, using the process-wide path and the
/// detected platform.
pub fn build(
    executable: &str,
    template: &str,
    params: &Params,
    options: &CommandOptions,
) -> Result<String, CommandLineError> {
    let prefix = paths::get_path();
    render(
        prefix.as_deref(),
        executable,
        template,
        params,
        options,
        Platform::detect(),
    )
}

fn render(
    prefix: Option<&str>,
    executable: &str,
    template: &str,
    params: &Params,
    options: &CommandOptions,
    platform: Platform,
) -> Result<String, CommandLineError> {
    let components = compiler::tokenize_template(template);
    log::debug!(
        "Template '{}' parsed into {} component(s).",
        template,
        components.len()
    );
    let arguments = compiler::render_template(&components, params, platform, options.quoting)?;

    let mut command = format!(
        "{} {}",
        paths::prefixed_executable(prefix, executable),
        arguments
    );
    if options.swallow_stderr {
        command.push_str(&platform.stderr_redirect());
    }
    Ok(command)
}
