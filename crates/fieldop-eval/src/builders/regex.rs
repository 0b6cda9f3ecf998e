//! Regex transform operator: `re_extract`.

use fieldop_parser::Definition;
use regex::Regex;
use serde_json::Value;

use super::{arity_exact, require_string};
use crate::error::{BuildError, Result, RuntimeError};
use crate::event::Event;
use crate::expression::{Expression, Op};

/// Compiled capture-group extraction from a referenced source field.
#[derive(Debug, Clone)]
pub(crate) struct RegexOp {
    source: String,
    pattern: Regex,
}

pub(crate) fn build_re_extract(def: &Definition) -> Result<Expression> {
    arity_exact(def, "re_extract", 2)?;

    let Some(source) = def.params[0].as_reference() else {
        return Err(BuildError::InvalidArguments {
            operator: "re_extract",
            reason: "first parameter must be a source field reference".to_string(),
        });
    };
    let Some(pattern) = def.params[1].as_literal() else {
        return Err(BuildError::InvalidArguments {
            operator: "re_extract",
            reason: "second parameter must be a literal regex".to_string(),
        });
    };

    let pattern = Regex::new(pattern)?;
    // captures_len counts the implicit whole-match group 0
    if pattern.captures_len() < 2 {
        return Err(BuildError::InvalidArguments {
            operator: "re_extract",
            reason: format!("pattern '{pattern}' has no capture group"),
        });
    }

    let op = RegexOp {
        source: source.to_string(),
        pattern,
    };
    Ok(Expression::new("re_extract", &def.field, Op::Regex(op)))
}

impl RegexOp {
    pub(crate) fn apply(&self, target: &str, event: &mut Event) -> Result<(), RuntimeError> {
        let s = require_string(event, &self.source)?;
        // No match is a no-op, not an error
        if let Some(caps) = self.pattern.captures(&s)
            && let Some(m) = caps.get(1)
        {
            let captured = m.as_str().to_string();
            event.set(target, Value::String(captured));
        }
        Ok(())
    }
}
