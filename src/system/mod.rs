//! # System Interaction Layer
//!
//! The boundary between command rendering and the operating system.
//!
//! ## Modules
//!
//! - **`executor`**: runs a finished command string through the shell of the
//!   platform it was rendered for (`sh -c` or `cmd /C`), capturing stdout and the
//!   exit status.
//! - **`platform`**: the unix/windows switch that decides quoting and where a
//!   swallowed stderr goes, plus the `/dev/null` probe that picks one at runtime.

pub mod executor;
pub mod platform;
