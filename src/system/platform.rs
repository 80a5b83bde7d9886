// src/system/platform.rs

use crate::constants::{UNIX_NULL_DEVICE, WINDOWS_NULL_DEVICE};
use std::path::Path;

/// The quoting convention of a shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `'value'`, with `'` written as `'\''`.
    Single,
    /// `"value"`, with no escaping.
    Double,
}

/// The shell flavour a command is rendered for.
///
/// Rendering only ever asks a `Platform` two things: which quote style to use and
/// where stderr goes when it is swallowed. Tests pick a variant directly instead of
/// stubbing the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// POSIX `sh` semantics.
    Unix,
    /// `cmd.exe` semantics.
    Windows,
}

impl Platform {
    /// Probes the running system. Re-evaluated on every call, nothing is cached.
    pub fn detect() -> Self {
        Self::detect_with(Path::exists)
    }

    /// Probes with a custom existence check for the null device.
    pub fn detect_with<F>(exists: F) -> Self
    where
        F: Fn(&Path) -> bool,
    {
        let platform = if exists(Path::new(UNIX_NULL_DEVICE)) {
            Self::Unix
        } else {
            Self::Windows
        };
        log::debug!("Detected {:?} platform.", platform);
        platform
    }

    /// The quoting convention for parameter values.
    pub fn quote_style(self) -> QuoteStyle {
        match self {
            Self::Unix => QuoteStyle::Single,
            Self::Windows => QuoteStyle::Double,
        }
    }

    /// The target of a swallowed stderr stream.
    pub fn stderr_null_target(self) -> &'static str {
        match self {
            Self::Unix => UNIX_NULL_DEVICE,
            Self::Windows => WINDOWS_NULL_DEVICE,
        }
    }

    /// The suffix appended to a command whose stderr is swallowed.
    pub fn stderr_redirect(self) -> String {
        format!(" 2>{}", self.stderr_null_target())
    }
}

/// Returns `true` unless `/dev/null` is missing, which signals windows.
pub fn is_unix_like() -> bool {
    Platform::detect() == Platform::Unix
}
