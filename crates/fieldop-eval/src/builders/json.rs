//! Structural transform operator: `delete_field`.

use fieldop_parser::{Definition, Parameter};

use crate::error::{Result, RuntimeError};
use crate::event::Event;
use crate::expression::{Expression, Op};

/// Compiled field deletion.
///
/// With no captured paths the target field itself is deleted. Deletion is
/// idempotent: absent fields are a no-op, never a failure.
#[derive(Debug, Clone)]
pub(crate) struct JsonOp {
    paths: Vec<String>,
}

pub(crate) fn build_delete_field(def: &Definition) -> Result<Expression> {
    // Every parameter is read as a field path, with or without the
    // reference marker.
    let paths = def
        .params
        .iter()
        .map(|p| match p {
            Parameter::Literal(s) => s.clone(),
            Parameter::Reference(path) => path.clone(),
        })
        .collect();

    let op = JsonOp { paths };
    Ok(Expression::new("delete_field", &def.field, Op::Json(op)))
}

impl JsonOp {
    pub(crate) fn apply(&self, target: &str, event: &mut Event) -> Result<(), RuntimeError> {
        if self.paths.is_empty() {
            event.remove(target);
        } else {
            for path in &self.paths {
                event.remove(path);
            }
        }
        Ok(())
    }
}
