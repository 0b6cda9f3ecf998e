//! Predicate operators: `exists`, `not_exists`, `s_eq`, `ip_cidr`.
//!
//! A predicate returning `false` signals the pipeline to drop the event;
//! it is never a per-event error. Following check semantics, a missing or
//! wrongly typed field makes the comparison predicates false rather than
//! failing the invocation.

use std::net::IpAddr;

use fieldop_parser::{Definition, Parameter};
use ipnet::IpNet;

use super::arity_exact;
use crate::error::{BuildError, Result, RuntimeError};
use crate::event::Event;
use crate::expression::{Expression, Op};

/// Compiled predicates over the target field.
#[derive(Debug, Clone)]
pub(crate) enum CheckOp {
    /// Field presence. `negated` inverts the test (`not_exists`).
    Exists { negated: bool },
    /// String equality against a literal or another field.
    StringEq { expected: Parameter },
    /// IP address membership in a fixed network.
    IpCidr { network: IpNet },
}

pub(crate) fn build_exists(def: &Definition) -> Result<Expression> {
    arity_exact(def, "exists", 0)?;
    let op = CheckOp::Exists { negated: false };
    Ok(Expression::new("exists", &def.field, Op::Check(op)))
}

pub(crate) fn build_not_exists(def: &Definition) -> Result<Expression> {
    arity_exact(def, "not_exists", 0)?;
    let op = CheckOp::Exists { negated: true };
    Ok(Expression::new("not_exists", &def.field, Op::Check(op)))
}

pub(crate) fn build_s_eq(def: &Definition) -> Result<Expression> {
    arity_exact(def, "s_eq", 1)?;
    let op = CheckOp::StringEq {
        expected: def.params[0].clone(),
    };
    Ok(Expression::new("s_eq", &def.field, Op::Check(op)))
}

pub(crate) fn build_ip_cidr(def: &Definition) -> Result<Expression> {
    arity_exact(def, "ip_cidr", 1)?;

    let Some(literal) = def.params[0].as_literal() else {
        return Err(BuildError::InvalidArguments {
            operator: "ip_cidr",
            reason: "parameter must be a literal CIDR network".to_string(),
        });
    };
    let network: IpNet = literal.parse()?;

    let op = CheckOp::IpCidr { network };
    Ok(Expression::new("ip_cidr", &def.field, Op::Check(op)))
}

impl CheckOp {
    pub(crate) fn test(&self, target: &str, event: &Event) -> Result<bool, RuntimeError> {
        match self {
            CheckOp::Exists { negated } => Ok(event.contains(target) != *negated),

            CheckOp::StringEq { expected } => {
                let Some(actual) = event.get_str(target) else {
                    return Ok(false);
                };
                let expected = match expected {
                    Parameter::Literal(s) => s.as_str(),
                    Parameter::Reference(path) => match event.get_str(path) {
                        Some(s) => s,
                        None => return Ok(false),
                    },
                };
                Ok(actual == expected)
            }

            CheckOp::IpCidr { network } => Ok(event
                .get_str(target)
                .and_then(|s| s.parse::<IpAddr>().ok())
                .is_some_and(|ip| network.contains(&ip))),
        }
    }
}
