// src/constants.rs

/// Parameter names reserved for the options of a `CommandLine`.
/// A template may never interpolate them.
pub const RESERVED_PARAMETER_NAMES: [&str; 2] = ["swallow_stderr", "expected_outcodes"];

/// The device file whose presence marks a unix-like system.
pub const UNIX_NULL_DEVICE: &str = "/dev/null";

/// The null device understood by `cmd.exe`.
pub const WINDOWS_NULL_DEVICE: &str = "NUL";

/// Exit status accepted when the caller does not pass `expected_outcodes`.
pub const DEFAULT_EXPECTED_OUTCODE: i32 = 0;

/// Exit status used by POSIX shells when the program could not be found.
pub const COMMAND_NOT_FOUND_OUTCODE: i32 = 127;

/// Separator placed between the configured path and the executable.
pub const PATH_SEPARATOR: char = '/';

/// Environment variable read by the binary as the default path prefix.
pub const PATH_ENV_VAR: &str = "CMDLINE_PATH";
