// src/core/quoting.rs

use crate::system::platform::QuoteStyle;

/// Wraps a value in single quotes for a POSIX shell.
/// Every embedded `'` closes the quote, emits an escaped quote and reopens it.
pub fn quote_unix(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Wraps a value in double quotes for `cmd.exe`. Embedded `"` are NOT escaped.
pub fn quote_windows(value: &str) -> String {
    format!("\"{}\"", value)
}

/// Quotes a value with the given style.
pub fn quote(value: &str, style: QuoteStyle) -> String {
    match style {
        QuoteStyle::Single => quote_unix(value),
        QuoteStyle::Double => quote_windows(value),
    }
}

/// Quotes every element on its own and joins them with single spaces.
pub fn quote_list<S: AsRef<str>>(values: &[S], style: QuoteStyle) -> String {
    values
        .iter()
        .map(|v| quote(v.as_ref(), style))
        .collect::<Vec<_>>()
        .join(" ")
}
