//! Template substitution of `@{name}` tokens
//!
//! Substitution only ever rewrites string scalars. A token whose variable is
//! missing, or bound to anything other than a string, is left in place
//! verbatim, delimiters included. There is no failure mode.

use crate::core::{context::VariableStore, value::Value};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\{([^}]*)\}").expect("valid token regex"));

/// Substitute tokens throughout a value tree
///
/// Mapping keys are never rewritten; sequence order is preserved.
pub fn substitute(value: &Value, vars: &VariableStore) -> Value {
    match value {
        Value::String(s) => Value::String(substitute_str(s, vars).into_owned()),
        Value::Sequence(items) => {
            Value::Sequence(items.iter().map(|item| substitute(item, vars)).collect())
        }
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .map(|(key, item)| (key.clone(), substitute(item, vars)))
                .collect(),
        ),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
    }
}

/// Substitute tokens in a single string
pub fn substitute_str<'a>(input: &'a str, vars: &VariableStore) -> Cow<'a, str> {
    TOKEN.replace_all(input, |caps: &Captures| match vars.get_str(&caps[1]) {
        Some(replacement) => replacement.to_string(),
        None => caps[0].to_string(),
    })
}

/// Names of every token in a string, in order of appearance
pub fn token_names(input: &str) -> Vec<&str> {
    TOKEN
        .captures_iter(input)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
