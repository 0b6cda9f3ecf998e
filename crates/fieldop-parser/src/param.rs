//! Parameter tokenization for operator definitions.
//!
//! The parameter section of a definition is a `/`-delimited list of tokens.
//! A token starting with the reference marker `$` names a field path to be
//! resolved against the event at invocation time; any other token is a
//! literal. The parser only classifies the kind of each token; type
//! coercion (integers, regexes, CIDR networks) is the consuming builder's
//! job.

use std::fmt;

use serde::Serialize;

use crate::error::{ParseError, Result};

/// A single positional parameter of an operator definition.
///
/// Parameters are order-significant: operator semantics depend on position
/// (e.g. first parameter = mode, second = operand).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Parameter {
    /// A fixed textual value, captured verbatim (whitespace preserved).
    Literal(String),
    /// A field path to resolve against the event on every invocation.
    Reference(String),
}

impl Parameter {
    /// The literal text, if this parameter is a literal.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Parameter::Literal(s) => Some(s),
            Parameter::Reference(_) => None,
        }
    }

    /// The referenced field path, if this parameter is a reference.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Parameter::Literal(_) => None,
            Parameter::Reference(p) => Some(p),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Parameter::Reference(_))
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Literal(s) => write!(f, "{s}"),
            Parameter::Reference(p) => write!(f, "${p}"),
        }
    }
}

/// Tokenize the parameter section of a definition.
///
/// Splits on unescaped `/`. Escapes recognized inside a token: `\/`, `\$`,
/// `\\`; any other backslash sequence passes through verbatim so regex
/// literals like `id=(\d+)` survive tokenization. A trailing lone backslash
/// is unbalanced. The reference marker `$` is only significant as the first
/// character of a token. A single trailing empty token (a definition ending
/// in `/`) is dropped; interior empty tokens are preserved as empty
/// literals.
pub fn parse_params(section: &str) -> Result<Vec<Parameter>> {
    let mut params = Vec::new();
    let mut token = String::new();
    let mut is_ref = false;
    let mut at_start = true;

    let mut chars = section.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                match chars.next() {
                    Some(next @ ('/' | '$' | '\\')) => token.push(next),
                    Some(other) => {
                        token.push('\\');
                        token.push(other);
                    }
                    None => return Err(ParseError::UnbalancedEscape(section.to_string())),
                }
                at_start = false;
            }
            '/' => {
                params.push(finish_token(&mut token, is_ref)?);
                is_ref = false;
                at_start = true;
            }
            '$' if at_start => {
                is_ref = true;
                at_start = false;
            }
            _ => {
                token.push(c);
                at_start = false;
            }
        }
    }

    // A trailing `/` produces an empty final token; tolerate it.
    if !at_start || is_ref {
        params.push(finish_token(&mut token, is_ref)?);
    }

    Ok(params)
}

fn finish_token(token: &mut String, is_ref: bool) -> Result<Parameter> {
    let text = std::mem::take(token);
    if is_ref {
        if text.is_empty() {
            return Err(ParseError::EmptyReference);
        }
        Ok(Parameter::Reference(text))
    } else {
        Ok(Parameter::Literal(text))
    }
}
