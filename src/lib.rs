//! Build injection-safe shell command lines from `:name` templates and run them,
//! judging the result by its exit status.

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;

pub use crate::core::{
    command_line::{CommandLine, CommandLineError, build},
    config_loader::Settings,
    paths::{PathConfig, get_path, set_path},
    runner::Runner,
};
pub use crate::models::{CommandOptions, ParamValue, Params, QuotingMode};
pub use crate::system::{
    executor::{ExecutionError, ShellExecutor, ShellOutput, SystemShell},
    platform::{Platform, QuoteStyle, is_unix_like},
};
