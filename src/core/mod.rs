// src/core/mod.rs

pub mod command_line;
pub mod compiler;
pub mod config_loader;
pub mod parameters;
pub mod paths;
pub mod quoting;
pub mod runner;
