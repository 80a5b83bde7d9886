// src/core/parameters.rs

use crate::models::{ParamValue, Params};
use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

// --- CONVERSIONS INTO PARAMETER VALUES ---

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Single(value.clone())
    }
}

impl From<&Path> for ParamValue {
    fn from(value: &Path) -> Self {
        Self::Single(value.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for ParamValue {
    fn from(value: PathBuf) -> Self {
        Self::from(value.as_path())
    }
}

impl From<&PathBuf> for ParamValue {
    fn from(value: &PathBuf) -> Self {
        Self::from(value.as_path())
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Single(value.to_string())
                }
            }
        )*
    };
}

impl_from_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char
);

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    /// Builds a list value. Nested lists are flattened.
    fn from(values: Vec<T>) -> Self {
        let mut items = Vec::with_capacity(values.len());
        for value in values {
            match value.into() {
                Self::Single(s) => items.push(s),
                Self::List(inner) => items.extend(inner),
            }
        }
        Self::List(items)
    }
}

impl<T: Into<ParamValue> + Clone> From<&[T]> for ParamValue {
    fn from(values: &[T]) -> Self {
        Self::from(values.to_vec())
    }
}

impl<T: Into<ParamValue> + Clone, const N: usize> From<[T; N]> for ParamValue {
    fn from(values: [T; N]) -> Self {
        Self::from(Vec::from(values))
    }
}

// --- ASSIGNMENT PARSING (used by the command-line front end) ---

/// Parses a `NAME=VALUE` assignment. The value may be empty and may contain `=`.
pub fn parse_param_assignment(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid parameter '{}': expected NAME=VALUE.", raw))?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(anyhow!(
            "Invalid parameter name '{}': only letters, digits and '_' are allowed.",
            name
        ));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Inserts a value, turning a repeated name into a list value.
pub fn insert_param(params: &mut Params, name: String, value: String) {
    match params.remove(&name) {
        None => {
            params.insert(name, ParamValue::Single(value));
        }
        Some(ParamValue::Single(first)) => {
            params.insert(name, ParamValue::List(vec![first, value]));
        }
        Some(ParamValue::List(mut items)) => {
            items.push(value);
            params.insert(name, ParamValue::List(items));
        }
    }
}

/// Builds `Params` from `NAME=VALUE` assignments.
pub fn params_from_assignments<I, S>(assignments: I) -> Result<Params>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut params = Params::new();
    for raw in assignments {
        let (name, value) = parse_param_assignment(raw.as_ref())?;
        insert_param(&mut params, name, value);
    }
    log::debug!("Parsed {} parameter(s) from assignments.", params.len());
    Ok(params)
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(ParamValue::from("a.jpg"), ParamValue::Single("a.jpg".into()));
        assert_eq!(ParamValue::from(42), ParamValue::Single("42".into()));
        assert_eq!(ParamValue::from(1.5), ParamValue::Single("1.5".into()));
        assert_eq!(ParamValue::from(true), ParamValue::Single("true".into()));
        assert_eq!(
            ParamValue::from(PathBuf::from("/tmp/x y")),
            ParamValue::Single("/tmp/x y".into())
        );
    }

    #[test]
    fn test_list_conversions() {
        assert_eq!(
            ParamValue::from(vec!["a", "b"]),
            ParamValue::List(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            ParamValue::from([1, 2, 3]),
            ParamValue::List(vec!["1".into(), "2".into(), "3".into()])
        );
        let slice: &[&str] = &["x"];
        assert_eq!(ParamValue::from(slice), ParamValue::List(vec!["x".into()]));
    }

    #[test]
    fn test_nested_lists_are_flattened() {
        let nested = vec![vec!["a", "b"], vec!["c"]];
        assert_eq!(
            ParamValue::from(nested),
            ParamValue::List(vec!["a".into(), "b".into(), "c".into()])
        );
    }

    #[test]
    fn test_parse_param_assignment() {
        assert_eq!(
            parse_param_assignment("size=10x10").unwrap(),
            ("size".to_string(), "10x10".to_string())
        );
        assert_eq!(
            parse_param_assignment("expr=a=b").unwrap(),
            ("expr".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_param_assignment("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_param_assignment_errors() {
        assert!(parse_param_assignment("novalue").is_err());
        assert!(parse_param_assignment("=value").is_err());
        let err = parse_param_assignment("bad-name=1").unwrap_err();
        assert!(err.to_string().contains("Invalid parameter name"));
    }

    #[test]
    fn test_repeated_names_become_lists() {
        let params = params_from_assignments(["in=a.jpg", "in=b.jpg", "in=c.jpg", "out=d.png"]).unwrap();
        assert_eq!(
            params.get("in"),
            Some(&ParamValue::List(vec![
                "a.jpg".into(),
                "b.jpg".into(),
                "c.jpg".into()
            ]))
        );
        assert_eq!(params.get("out"), Some(&ParamValue::Single("d.png".into())));
    }
}
