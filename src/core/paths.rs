// src/core/paths.rs

use crate::constants::PATH_SEPARATOR;
use lazy_static::lazy_static;
use std::sync::{Mutex, MutexGuard, PoisonError};

lazy_static! {
    // Process-wide default prefix. Single writer, many readers: hosts are expected to
    // set it once at startup.
    static ref DEFAULT_PATH: Mutex<Option<String>> = Mutex::new(None);
}

fn lock_default_path() -> MutexGuard<'static, Option<String>> {
    // A panic while holding the lock cannot leave an `Option<String>` half-written.
    DEFAULT_PATH.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sets (or with `None`, clears) the process-wide directory prefixed to executables.
pub fn set_path(path: Option<String>) {
    log::debug!("Default executable path set to {:?}", path);
    *lock_default_path() = path;
}

/// Returns the process-wide directory prefixed to executables, if any.
pub fn get_path() -> Option<String> {
    lock_default_path().clone()
}

/// Where a `CommandLine` takes its executable prefix from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PathConfig {
    /// Use the process-wide default from `set_path`.
    #[default]
    Global,
    /// Use this directory, ignoring the process-wide default.
    Fixed(String),
    /// Never prefix the executable.
    Unset,
}

impl PathConfig {
    /// The effective prefix directory.
    pub fn resolve(&self) -> Option<String> {
        match self {
            Self::Global => get_path(),
            Self::Fixed(path) => Some(path.clone()),
            Self::Unset => None,
        }
    }
}

/// Joins the prefix directory and the executable. Neither part is escaped.
pub fn prefixed_executable(path: Option<&str>, executable: &str) -> String {
    match path {
        Some(dir) if !dir.is_empty() => {
            let dir = dir.trim_end_matches(PATH_SEPARATOR);
            format!("{}{}{}", dir, PATH_SEPARATOR, executable)
        }
        _ => executable.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Mutex, MutexGuard, PoisonError};

    // Tests that touch the process-wide path run one at a time.
    static GLOBAL_PATH_TEST_LOCK: Mutex<()> = Mutex::new(());

    pub(crate) fn serialize_global_path() -> MutexGuard<'static, ()> {
        GLOBAL_PATH_TEST_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::serialize_global_path;
    use super::*;

    #[test]
    fn test_prefixed_executable() {
        assert_eq!(prefixed_executable(None, "convert"), "convert");
        assert_eq!(prefixed_executable(Some("/opt/bin"), "convert"), "/opt/bin/convert");
        assert_eq!(prefixed_executable(Some("/opt/bin/"), "convert"), "/opt/bin/convert");
        assert_eq!(prefixed_executable(Some(""), "convert"), "convert");
    }

    #[test]
    fn test_global_path_set_get_reset() {
        let _guard = serialize_global_path();
        set_path(Some("/usr/local/bin".to_string()));
        assert_eq!(get_path().as_deref(), Some("/usr/local/bin"));
        assert_eq!(PathConfig::Global.resolve().as_deref(), Some("/usr/local/bin"));
        set_path(None);
        assert_eq!(get_path(), None);
    }

    #[test]
    fn test_fixed_and_unset_ignore_global() {
        let _guard = serialize_global_path();
        set_path(Some("/usr/local/bin".to_string()));
        assert_eq!(
            PathConfig::Fixed("/opt/bin".into()).resolve().as_deref(),
            Some("/opt/bin")
        );
        assert_eq!(PathConfig::Unset.resolve(), None);
        set_path(None);
    }
}
