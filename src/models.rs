// src/models.rs

use crate::constants::DEFAULT_EXPECTED_OUTCODE;
use std::collections::{BTreeSet, HashMap};

// --- TEMPLATE MODELS ---

/// A single component of a parsed command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateComponent {
    /// Text copied verbatim into the command.
    Literal(String),
    /// An interpolation token, `:name` or `:{name}`.
    Parameter {
        /// The identifier between the colon (and braces).
        name: String,
        /// The token exactly as written in the template.
        original_token: String,
    },
}

// --- PARAMETER MODELS ---

/// The value bound to a template parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Quoted and substituted as one shell word.
    Single(String),
    /// Each element quoted on its own, then joined with spaces.
    List(Vec<String>),
}

/// The named parameters of a command. Keys are case-sensitive.
pub type Params = HashMap<String, ParamValue>;

// --- OPTIONS ---

/// How values are quoted on platforms that use double quotes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuotingMode {
    /// Wrap values in double quotes and leave embedded `"` untouched.
    #[default]
    Compatible,
    /// Refuse values that contain a `"` on windows-like platforms.
    Strict,
}

/// Options controlling how a command is rendered and judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOptions {
    /// Append a redirection that discards stderr.
    pub swallow_stderr: bool,
    /// Exit statuses treated as success.
    pub expected_outcodes: BTreeSet<i32>,
    /// Quoting policy for double-quote platforms.
    pub quoting: QuotingMode,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            swallow_stderr: false,
            expected_outcodes: BTreeSet::from([DEFAULT_EXPECTED_OUTCODE]),
            quoting: QuotingMode::default(),
        }
    }
}
