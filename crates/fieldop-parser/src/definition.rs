//! Definition parsing: `<field>: <marker><operator>/<param>/...`
//!
//! A definition binds a target field path to one operator invocation. The
//! `+` marker selects the operator categories this core compiles; a value
//! without the marker is a catalog-level static assignment handled
//! elsewhere, and is rejected here.

use serde::Serialize;

use crate::error::{ParseError, Result};
use crate::param::{Parameter, parse_params};

/// A parsed per-field operator definition.
///
/// Immutable once parsed; the compiler consumes it to produce one
/// expression and then discards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    /// Target field path (dot-addressable).
    pub field: String,
    /// Operator name, e.g. `s_up` or `i_calc`.
    pub operator: String,
    /// Ordered, position-significant parameters.
    pub params: Vec<Parameter>,
}

/// Parse the definition text declared for `field`.
///
/// `text` is the mapping value from the asset, e.g. `+s_trim/both/-` or
/// `+re_extract/$message/id=(\d+)`. Surrounding whitespace is trimmed;
/// whitespace inside parameter tokens is preserved.
pub fn parse_definition(field: &str, text: &str) -> Result<Definition> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyDefinition);
    }

    let Some(rest) = text.strip_prefix('+') else {
        return Err(ParseError::MissingMarker(text.to_string()));
    };

    let (operator, params) = match rest.split_once('/') {
        Some((op, section)) => (op, parse_params(section)?),
        None => (rest, Vec::new()),
    };

    if operator.is_empty() {
        return Err(ParseError::MissingOperator(text.to_string()));
    }
    if !operator.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ParseError::InvalidOperatorName(operator.to_string()));
    }

    Ok(Definition {
        field: field.to_string(),
        operator: operator.to_string(),
        params,
    })
}

/// Parse a full definition line of the form `<field>: +<operator>/...`.
pub fn parse_definition_line(line: &str) -> Result<Definition> {
    let Some((field, text)) = line.split_once(':') else {
        return Err(ParseError::MissingFieldSeparator(line.to_string()));
    };
    let field = field.trim();
    if field.is_empty() {
        return Err(ParseError::EmptyField(line.to_string()));
    }
    parse_definition(field, text)
}
