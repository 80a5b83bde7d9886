//! # Compiler
//!
//! Turns a command template such as `-resize :size :{input}[0] :output` into a list of
//! `TemplateComponent`s, validates it, and renders it against a set of parameters.
//!
//! Rendering happens in two passes: a static validation pass over every parsed token
//! (reserved names, then unresolved names), and only then substitution. A template
//! that fails validation never produces a partial command.

use crate::{
    constants::RESERVED_PARAMETER_NAMES,
    core::{command_line::CommandLineError, quoting},
    models::{ParamValue, Params, QuotingMode, TemplateComponent},
    system::platform::{Platform, QuoteStyle},
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // `:name` or `:{name}`. Whether a bare match really is a token depends on the
    // character in front of it, see `is_token_boundary`.
    static ref TOKEN_RE: Regex =
        Regex::new(r":(?:\{([A-Za-z0-9_]+)\}|([A-Za-z0-9_]+))").expect("token regex is valid");
}

/// Splits a template into literals and parameter tokens.
///
/// A braced `:{name}` is a token wherever it appears. A bare `:name` only opens a
/// token at the start of the text or after a character that is neither a word
/// character nor another colon, so `xc:black`, `a::b` and `http://host` stay literal.
pub fn tokenize_template(text: &str) -> Vec<TemplateComponent> {
    let mut components = Vec::with_capacity(text.len() / 8 + 1);

    // Helper to push literals and handle merging.
    let push_literal = |components: &mut Vec<TemplateComponent>, s: &str| {
        if s.is_empty() {
            return;
        }
        if let Some(TemplateComponent::Literal(last)) = components.last_mut() {
            last.push_str(s);
        } else {
            components.push(TemplateComponent::Literal(s.to_string()));
        }
    };

    let mut last_index = 0;
    for caps in TOKEN_RE.captures_iter(text) {
        let Some(full_match) = caps.get(0) else {
            continue;
        };
        let before = text.get(last_index..full_match.start()).unwrap_or_default();
        push_literal(&mut components, before);

        let preceding = text
            .get(..full_match.start())
            .and_then(|s| s.chars().next_back());
        // `:{name}` is always a token; bare `:name` only at a word boundary.
        let name = match (caps.get(1), caps.get(2)) {
            (Some(braced), _) => Some(braced.as_str()),
            (None, Some(bare)) if is_token_boundary(preceding) => Some(bare.as_str()),
            _ => None,
        };

        match name {
            Some(name) => {
                components.push(TemplateComponent::Parameter {
                    name: name.to_string(),
                    original_token: full_match.as_str().to_string(),
                });
            }
            _ => push_literal(&mut components, full_match.as_str()),
        }
        last_index = full_match.end();
    }

    push_literal(&mut components, text.get(last_index..).unwrap_or_default());
    components
}

fn is_token_boundary(preceding: Option<char>) -> bool {
    match preceding {
        None => true,
        Some(c) => !(c.is_ascii_alphanumeric() || c == '_' || c == ':'),
    }
}

/// Fails if any token interpolates a reserved option name.
/// This does not depend on which options were actually passed.
pub fn validate_reserved(components: &[TemplateComponent]) -> Result<(), CommandLineError> {
    let uses_reserved = components.iter().any(|component| {
        matches!(component, TemplateComponent::Parameter { name, .. }
            if RESERVED_PARAMETER_NAMES.contains(&name.as_str()))
    });
    if uses_reserved {
        return Err(CommandLineError::ReservedParameter);
    }
    Ok(())
}

/// Fails on the first token that has no matching parameter.
pub fn validate_resolved(
    components: &[TemplateComponent],
    params: &Params,
) -> Result<(), CommandLineError> {
    for component in components {
        if let TemplateComponent::Parameter {
            name,
            original_token,
        } = component
        {
            if !params.contains_key(name) {
                return Err(CommandLineError::UnresolvedParameter {
                    token: original_token.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Validates and substitutes a parsed template.
pub fn render_template(
    components: &[TemplateComponent],
    params: &Params,
    platform: Platform,
    quoting: QuotingMode,
) -> Result<String, CommandLineError> {
    validate_reserved(components)?;
    validate_resolved(components, params)?;

    let style = platform.quote_style();
    let mut rendered = String::new();
    for component in components {
        match component {
            TemplateComponent::Literal(s) => rendered.push_str(s),
            TemplateComponent::Parameter {
                name,
                original_token,
            } => {
                let Some(value) = params.get(name) else {
                    return Err(CommandLineError::UnresolvedParameter {
                        token: original_token.clone(),
                    });
                };
                check_quotable(name, value, style, quoting)?;
                match value {
                    ParamValue::Single(s) => rendered.push_str(&quoting::quote(s, style)),
                    ParamValue::List(items) => {
                        rendered.push_str(&quoting::quote_list(items, style))
                    }
                }
            }
        }
    }
    Ok(rendered)
}

/// Double quotes are emitted without escaping; strict mode refuses values that
/// would break out of them.
fn check_quotable(
    name: &str,
    value: &ParamValue,
    style: QuoteStyle,
    quoting: QuotingMode,
) -> Result<(), CommandLineError> {
    if style != QuoteStyle::Double {
        return Ok(());
    }
    let has_quote = match value {
        ParamValue::Single(s) => s.contains('"'),
        ParamValue::List(items) => items.iter().any(|s| s.contains('"')),
    };
    if !has_quote {
        return Ok(());
    }
    match quoting {
        QuotingMode::Strict => Err(CommandLineError::UnsafeValue {
            name: name.to_string(),
        }),
        QuotingMode::Compatible => {
            log::warn!(
                "Parameter '{}' contains a double quote that cannot be escaped for cmd.exe.",
                name
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, token: &str) -> TemplateComponent {
        TemplateComponent::Parameter {
            name: name.to_string(),
            original_token: token.to_string(),
        }
    }

    fn literal(s: &str) -> TemplateComponent {
        TemplateComponent::Literal(s.to_string())
    }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), ParamValue::from(*v)))
            .collect()
    }

    // --- Tokenizer Tests ---

    #[test]
    fn test_tokenize_literal_only() {
        assert_eq!(tokenize_template("a.jpg b.png"), vec![literal("a.jpg b.png")]);
        assert!(tokenize_template("").is_empty());
    }

    #[test]
    fn test_tokenize_bare_and_braced_tokens() {
        let components = tokenize_template(":one :{two}");
        assert_eq!(
            components,
            vec![param("one", ":one"), literal(" "), param("two", ":{two}")]
        );
    }

    #[test]
    fn test_braced_token_can_touch_word_characters() {
        let components = tokenize_template(":{input}[0] :{name}_suffix");
        assert_eq!(
            components,
            vec![
                param("input", ":{input}"),
                literal("[0] "),
                param("name", ":{name}"),
                literal("_suffix"),
            ]
        );
    }

    #[test]
    fn test_bare_token_stops_at_non_word_character() {
        let components = tokenize_template("-o :out.png");
        assert_eq!(
            components,
            vec![literal("-o "), param("out", ":out"), literal(".png")]
        );
    }

    #[test]
    fn test_braced_token_inside_a_word() {
        assert_eq!(
            tokenize_template("frame_:{n}.png"),
            vec![literal("frame_"), param("n", ":{n}"), literal(".png")]
        );
        assert_eq!(
            tokenize_template("out:{fmt} xc:black"),
            vec![literal("out"), param("fmt", ":{fmt}"), literal(" xc:black")]
        );
    }

    #[test]
    fn test_colons_inside_words_stay_literal() {
        let text = "'a.jpg' xc:black 'b.jpg' a::b http://host:8080";
        assert_eq!(tokenize_template(text), vec![literal(text)]);
    }

    #[test]
    fn test_unclosed_brace_is_literal() {
        assert_eq!(tokenize_template(":{open"), vec![literal(":{open")]);
        assert_eq!(tokenize_template(": alone"), vec![literal(": alone")]);
    }

    #[test]
    fn test_token_after_punctuation() {
        let components = tokenize_template("--size=:size,(:x)");
        assert_eq!(
            components,
            vec![
                literal("--size="),
                param("size", ":size"),
                literal(",("),
                param("x", ":x"),
                literal(")"),
            ]
        );
    }

    // --- Validation Tests ---

    #[test]
    fn test_reserved_names_are_rejected() {
        for template in [":swallow_stderr", "x :{expected_outcodes}"] {
            let components = tokenize_template(template);
            let err = validate_reserved(&components).unwrap_err();
            assert!(matches!(err, CommandLineError::ReservedParameter));
        }
    }

    #[test]
    fn test_reserved_check_precedes_resolution() {
        let components = tokenize_template(":missing :swallow_stderr");
        let err = render_template(
            &components,
            &Params::new(),
            Platform::Unix,
            QuotingMode::Compatible,
        )
        .unwrap_err();
        assert!(matches!(err, CommandLineError::ReservedParameter));
    }

    #[test]
    fn test_unresolved_parameter() {
        let components = tokenize_template(":one :{two}");
        let err = validate_resolved(&components, &params(&[("one", "a")])).unwrap_err();
        assert!(
            matches!(err, CommandLineError::UnresolvedParameter { ref token } if token == ":{two}")
        );
    }

    #[test]
    fn test_unresolved_braced_token_inside_a_word() {
        let components = tokenize_template("x:{missing}");
        let err = render_template(
            &components,
            &Params::new(),
            Platform::Unix,
            QuotingMode::Compatible,
        )
        .unwrap_err();
        assert!(
            matches!(err, CommandLineError::UnresolvedParameter { ref token } if token == ":{missing}")
        );
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let components = tokenize_template(":Name");
        assert!(validate_resolved(&components, &params(&[("name", "x")])).is_err());
    }

    // --- Rendering Tests ---

    #[test]
    fn test_render_unix_and_windows() {
        let components = tokenize_template(":one :{two}");
        let p = params(&[("one", "a.jpg"), ("two", "b.png")]);
        assert_eq!(
            render_template(&components, &p, Platform::Unix, QuotingMode::Compatible).unwrap(),
            "'a.jpg' 'b.png'"
        );
        assert_eq!(
            render_template(&components, &p, Platform::Windows, QuotingMode::Compatible).unwrap(),
            "\"a.jpg\" \"b.png\""
        );
    }

    #[test]
    fn test_render_list_value() {
        let components = tokenize_template("cat :files");
        let mut p = Params::new();
        p.insert("files".into(), ParamValue::from(vec!["a b.txt", "c.txt"]));
        assert_eq!(
            render_template(&components, &p, Platform::Unix, QuotingMode::Compatible).unwrap(),
            "cat 'a b.txt' 'c.txt'"
        );
    }

    #[test]
    fn test_repeated_token_is_substituted_each_time() {
        let components = tokenize_template(":f :f");
        let p = params(&[("f", "x")]);
        assert_eq!(
            render_template(&components, &p, Platform::Unix, QuotingMode::Compatible).unwrap(),
            "'x' 'x'"
        );
    }

    #[test]
    fn test_strict_mode_rejects_double_quotes_on_windows() {
        let components = tokenize_template(":v");
        let p = params(&[("v", "say \"hi\"")]);
        let err = render_template(&components, &p, Platform::Windows, QuotingMode::Strict)
            .unwrap_err();
        assert!(matches!(err, CommandLineError::UnsafeValue { ref name } if name == "v"));

        // Compatible mode keeps the literal behaviour, unix is always safe.
        assert_eq!(
            render_template(&components, &p, Platform::Windows, QuotingMode::Compatible).unwrap(),
            "\"say \"hi\"\""
        );
        assert_eq!(
            render_template(&components, &p, Platform::Unix, QuotingMode::Strict).unwrap(),
            "'say \"hi\"'"
        );
    }
}
