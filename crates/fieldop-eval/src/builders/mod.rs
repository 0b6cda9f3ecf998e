//! Builder functions, one per operator family.
//!
//! Every builder has the uniform contract
//! `fn(&Definition) -> Result<Expression, BuildError>`: it validates the
//! parameter count and literal/reference mix at build time, coerces literal
//! types where the operator requires it, and captures the validated
//! parameter set into a compiled op. After a successful build no arity or
//! literal-type check remains on the per-event path.
//!
//! Shared here: arity checks and the parameter-resolution helpers used by
//! the compiled ops at invocation time. References are resolved fresh
//! against the event on every invocation, never cached, because an earlier
//! expression in the same pipeline may have just written the referenced
//! field.

pub(crate) mod array;
pub(crate) mod check;
pub(crate) mod int;
pub(crate) mod ip;
pub(crate) mod json;
pub(crate) mod regex;
pub(crate) mod string;

pub(crate) use array::ArrayOp;
pub(crate) use check::CheckOp;
pub(crate) use int::IntOp;
pub(crate) use ip::IpOp;
pub(crate) use json::JsonOp;
pub(crate) use regex::RegexOp;
pub(crate) use string::StringOp;

use fieldop_parser::{Definition, Parameter};
use serde_json::Value;

use crate::error::{BuildError, RuntimeError};
use crate::event::Event;

// =============================================================================
// Build-time helpers
// =============================================================================

pub(crate) fn arity_exact(
    def: &Definition,
    operator: &'static str,
    expected: usize,
) -> Result<(), BuildError> {
    if def.params.len() != expected {
        return Err(BuildError::InvalidArguments {
            operator,
            reason: format!("expected {expected} parameter(s), got {}", def.params.len()),
        });
    }
    Ok(())
}

pub(crate) fn arity_min(
    def: &Definition,
    operator: &'static str,
    min: usize,
) -> Result<(), BuildError> {
    if def.params.len() < min {
        return Err(BuildError::InvalidArguments {
            operator,
            reason: format!(
                "expected at least {min} parameter(s), got {}",
                def.params.len()
            ),
        });
    }
    Ok(())
}

pub(crate) fn arity_max(
    def: &Definition,
    operator: &'static str,
    max: usize,
) -> Result<(), BuildError> {
    if def.params.len() > max {
        return Err(BuildError::InvalidArguments {
            operator,
            reason: format!(
                "expected at most {max} parameter(s), got {}",
                def.params.len()
            ),
        });
    }
    Ok(())
}

// =============================================================================
// Separator characters
// =============================================================================

/// A single-character separator: fixed at build time, or read from a
/// referenced field on every invocation.
#[derive(Debug, Clone)]
pub(crate) enum CharSource {
    Literal(char),
    Reference(String),
}

/// Validate a separator parameter at build time. Literal separators must
/// already be a single character; references are checked per event.
pub(crate) fn char_source(
    operator: &'static str,
    param: &Parameter,
) -> Result<CharSource, BuildError> {
    match param {
        Parameter::Literal(s) => match single_char(s) {
            Some(c) => Ok(CharSource::Literal(c)),
            None => Err(BuildError::InvalidArgumentType {
                operator,
                reason: format!("separator must be a single character, got '{s}'"),
            }),
        },
        Parameter::Reference(path) => Ok(CharSource::Reference(path.clone())),
    }
}

pub(crate) fn resolve_char(source: &CharSource, event: &Event) -> Result<char, RuntimeError> {
    match source {
        CharSource::Literal(c) => Ok(*c),
        CharSource::Reference(path) => {
            let s = require_string(event, path)?;
            single_char(&s).ok_or(RuntimeError::InvalidSeparator {
                field: path.clone(),
                value: s,
            })
        }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

// =============================================================================
// Invocation-time resolution helpers
// =============================================================================

/// Read a string field, distinguishing a missing field from a wrongly
/// typed one.
pub(crate) fn require_string(event: &Event, path: &str) -> Result<String, RuntimeError> {
    match event.get(path) {
        None => Err(RuntimeError::UnresolvedReference(path.to_string())),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(RuntimeError::TypeMismatch {
            field: path.to_string(),
            expected: "a string",
        }),
    }
}

/// Read an integer field.
pub(crate) fn require_int(event: &Event, path: &str) -> Result<i64, RuntimeError> {
    match event.get(path) {
        None => Err(RuntimeError::UnresolvedReference(path.to_string())),
        Some(v) => v.as_i64().ok_or(RuntimeError::TypeMismatch {
            field: path.to_string(),
            expected: "an integer",
        }),
    }
}

/// Resolve a parameter to a string: literals verbatim, references must
/// point at a string field.
pub(crate) fn resolve_string(param: &Parameter, event: &Event) -> Result<String, RuntimeError> {
    match param {
        Parameter::Literal(s) => Ok(s.clone()),
        Parameter::Reference(path) => require_string(event, path),
    }
}

/// Resolve a parameter to the string form of a scalar: numbers and
/// booleans are stringified, not rejected; arrays, objects and null are a
/// type mismatch.
pub(crate) fn resolve_scalar(param: &Parameter, event: &Event) -> Result<String, RuntimeError> {
    let path = match param {
        Parameter::Literal(s) => return Ok(s.clone()),
        Parameter::Reference(path) => path,
    };
    match event.get(path) {
        None => Err(RuntimeError::UnresolvedReference(path.clone())),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(_) => Err(RuntimeError::TypeMismatch {
            field: path.clone(),
            expected: "a scalar",
        }),
    }
}
