//! Array transform operators: `a_append`, `a_append_split`.

use fieldop_parser::{Definition, Parameter};
use serde_json::Value;

use super::{CharSource, arity_exact, arity_min, char_source, require_string, resolve_char, resolve_string};
use crate::error::{BuildError, Result, RuntimeError};
use crate::event::Event;
use crate::expression::{Expression, Op};

/// Compiled array appends. The target array is created when absent.
#[derive(Debug, Clone)]
pub(crate) enum ArrayOp {
    /// Append each resolved string parameter, in order.
    Append { values: Vec<Parameter> },
    /// Split a referenced string and append every produced substring.
    AppendSplit {
        source: String,
        separator: CharSource,
    },
}

pub(crate) fn build_a_append(def: &Definition) -> Result<Expression> {
    arity_min(def, "a_append", 1)?;
    let op = ArrayOp::Append {
        values: def.params.clone(),
    };
    Ok(Expression::new("a_append", &def.field, Op::Array(op)))
}

pub(crate) fn build_a_append_split(def: &Definition) -> Result<Expression> {
    arity_exact(def, "a_append_split", 2)?;

    let Some(source) = def.params[0].as_reference() else {
        return Err(BuildError::InvalidArguments {
            operator: "a_append_split",
            reason: "first parameter must be a source field reference".to_string(),
        });
    };
    let separator = char_source("a_append_split", &def.params[1])?;

    let op = ArrayOp::AppendSplit {
        source: source.to_string(),
        separator,
    };
    Ok(Expression::new("a_append_split", &def.field, Op::Array(op)))
}

impl ArrayOp {
    pub(crate) fn apply(&self, target: &str, event: &mut Event) -> Result<(), RuntimeError> {
        let items = match self {
            ArrayOp::Append { values } => values
                .iter()
                .map(|p| resolve_string(p, event))
                .collect::<std::result::Result<Vec<_>, _>>()?,
            ArrayOp::AppendSplit { source, separator } => {
                let c = resolve_char(separator, event)?;
                let s = require_string(event, source)?;
                s.split(c).map(str::to_string).collect()
            }
        };

        let mut array = match event.get(target) {
            None => Vec::new(),
            Some(Value::Array(existing)) => existing.clone(),
            Some(_) => {
                return Err(RuntimeError::TypeMismatch {
                    field: target.to_string(),
                    expected: "an array",
                });
            }
        };
        array.extend(items.into_iter().map(Value::String));
        event.set(target, Value::Array(array));
        Ok(())
    }
}
