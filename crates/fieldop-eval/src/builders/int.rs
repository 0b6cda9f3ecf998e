//! Integer transform operator: `i_calc`.

use fieldop_parser::{Definition, Parameter};
use serde_json::Value;

use super::{arity_exact, require_int};
use crate::error::{BuildError, Result, RuntimeError};
use crate::event::Event;
use crate::expression::{Expression, Op};

/// Compiled arithmetic over the target field's integer value.
#[derive(Debug, Clone)]
pub(crate) struct IntOp {
    op: CalcOp,
    operand: Operand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CalcOp {
    Sum,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone)]
enum Operand {
    Literal(i64),
    Reference(String),
}

pub(crate) fn build_i_calc(def: &Definition) -> Result<Expression> {
    arity_exact(def, "i_calc", 2)?;

    let op = match def.params[0].as_literal() {
        Some("sum") => CalcOp::Sum,
        Some("sub") => CalcOp::Sub,
        Some("mul") => CalcOp::Mul,
        Some("div") => CalcOp::Div,
        _ => {
            return Err(BuildError::InvalidArguments {
                operator: "i_calc",
                reason: format!(
                    "operation must be the literal 'sum', 'sub', 'mul' or 'div', got '{}'",
                    def.params[0]
                ),
            });
        }
    };

    let operand = match &def.params[1] {
        Parameter::Reference(path) => Operand::Reference(path.clone()),
        Parameter::Literal(s) => match s.trim().parse::<i64>() {
            Ok(n) => Operand::Literal(n),
            Err(_) => {
                return Err(BuildError::InvalidArgumentType {
                    operator: "i_calc",
                    reason: format!("operand must be an integer, got '{s}'"),
                });
            }
        },
    };

    let op = IntOp { op, operand };
    Ok(Expression::new("i_calc", &def.field, Op::Int(op)))
}

impl IntOp {
    pub(crate) fn apply(&self, target: &str, event: &mut Event) -> Result<(), RuntimeError> {
        let current = require_int(event, target)?;
        let operand = match &self.operand {
            Operand::Literal(n) => *n,
            Operand::Reference(path) => require_int(event, path)?,
        };

        let result = match self.op {
            CalcOp::Sum => current.checked_add(operand),
            CalcOp::Sub => current.checked_sub(operand),
            CalcOp::Mul => current.checked_mul(operand),
            CalcOp::Div => {
                if operand == 0 {
                    return Err(RuntimeError::DivisionByZero(target.to_string()));
                }
                current.checked_div(operand)
            }
        };

        let result = result.ok_or_else(|| RuntimeError::Overflow(target.to_string()))?;
        event.set(target, Value::from(result));
        Ok(())
    }
}
