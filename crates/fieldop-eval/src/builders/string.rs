//! String transform operators: `s_up`, `s_lo`, `s_trim`, `s_concat`,
//! `s_fromArray`.

use fieldop_parser::{Definition, Parameter};
use serde_json::Value;

use super::{
    CharSource, arity_exact, arity_max, arity_min, char_source, require_string, resolve_char,
    resolve_scalar,
};
use crate::error::{BuildError, Result, RuntimeError};
use crate::event::Event;
use crate::expression::{Expression, Op};

/// Compiled string transforms.
#[derive(Debug, Clone)]
pub(crate) enum StringOp {
    /// Upper/lowercase a resolved string and write it to the target.
    /// `source: None` means the target field itself is the source.
    Case {
        source: Option<Parameter>,
        upper: bool,
    },
    /// Trim a character from the target field's value in place.
    Trim { side: TrimSide, ch: CharSource },
    /// Concatenate the string form of each resolved parameter in order.
    Concat { parts: Vec<Parameter> },
    /// Join a referenced string array with a separator.
    FromArray { source: String, separator: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrimSide {
    Begin,
    End,
    Both,
}

// =============================================================================
// Builders
// =============================================================================

pub(crate) fn build_s_up(def: &Definition) -> Result<Expression> {
    build_case(def, "s_up", true)
}

pub(crate) fn build_s_lo(def: &Definition) -> Result<Expression> {
    build_case(def, "s_lo", false)
}

fn build_case(def: &Definition, name: &'static str, upper: bool) -> Result<Expression> {
    arity_max(def, name, 1)?;
    let op = StringOp::Case {
        source: def.params.first().cloned(),
        upper,
    };
    Ok(Expression::new(name, &def.field, Op::String(op)))
}

pub(crate) fn build_s_trim(def: &Definition) -> Result<Expression> {
    arity_exact(def, "s_trim", 2)?;

    let side = match def.params[0].as_literal() {
        Some("begin") => TrimSide::Begin,
        Some("end") => TrimSide::End,
        Some("both") => TrimSide::Both,
        _ => {
            return Err(BuildError::InvalidArguments {
                operator: "s_trim",
                reason: format!(
                    "trim side must be the literal 'begin', 'end' or 'both', got '{}'",
                    def.params[0]
                ),
            });
        }
    };
    let ch = char_source("s_trim", &def.params[1])?;

    let op = StringOp::Trim { side, ch };
    Ok(Expression::new("s_trim", &def.field, Op::String(op)))
}

pub(crate) fn build_s_concat(def: &Definition) -> Result<Expression> {
    arity_min(def, "s_concat", 1)?;
    let op = StringOp::Concat {
        parts: def.params.clone(),
    };
    Ok(Expression::new("s_concat", &def.field, Op::String(op)))
}

pub(crate) fn build_s_from_array(def: &Definition) -> Result<Expression> {
    arity_exact(def, "s_fromArray", 2)?;

    let Some(source) = def.params[0].as_reference() else {
        return Err(BuildError::InvalidArguments {
            operator: "s_fromArray",
            reason: "first parameter must be an array reference".to_string(),
        });
    };
    let Some(separator) = def.params[1].as_literal() else {
        return Err(BuildError::InvalidArguments {
            operator: "s_fromArray",
            reason: "second parameter must be a literal separator".to_string(),
        });
    };

    let op = StringOp::FromArray {
        source: source.to_string(),
        separator: separator.to_string(),
    };
    Ok(Expression::new("s_fromArray", &def.field, Op::String(op)))
}

// =============================================================================
// Invocation
// =============================================================================

impl StringOp {
    pub(crate) fn apply(&self, target: &str, event: &mut Event) -> Result<(), RuntimeError> {
        match self {
            StringOp::Case { source, upper } => {
                let resolved = match source {
                    None => require_string(event, target)?,
                    Some(Parameter::Literal(s)) => s.clone(),
                    Some(Parameter::Reference(path)) => require_string(event, path)?,
                };
                let out = if *upper {
                    resolved.to_uppercase()
                } else {
                    resolved.to_lowercase()
                };
                event.set(target, Value::String(out));
                Ok(())
            }

            StringOp::Trim { side, ch } => {
                let c = resolve_char(ch, event)?;
                let s = require_string(event, target)?;
                let trimmed = match side {
                    TrimSide::Begin => s.trim_start_matches(c),
                    TrimSide::End => s.trim_end_matches(c),
                    TrimSide::Both => s.trim_matches(c),
                };
                let trimmed = trimmed.to_string();
                event.set(target, Value::String(trimmed));
                Ok(())
            }

            StringOp::Concat { parts } => {
                let mut out = String::new();
                for part in parts {
                    out.push_str(&resolve_scalar(part, event)?);
                }
                event.set(target, Value::String(out));
                Ok(())
            }

            StringOp::FromArray { source, separator } => {
                let elements = match event.get(source) {
                    None => return Err(RuntimeError::UnresolvedReference(source.clone())),
                    Some(Value::Array(items)) => items,
                    Some(_) => {
                        return Err(RuntimeError::TypeMismatch {
                            field: source.clone(),
                            expected: "an array",
                        });
                    }
                };
                let mut strings = Vec::with_capacity(elements.len());
                for item in elements {
                    match item.as_str() {
                        Some(s) => strings.push(s),
                        None => return Err(RuntimeError::NonStringElement(source.clone())),
                    }
                }
                let joined = strings.join(separator);
                event.set(target, Value::String(joined));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldop_parser::parse_definition;
    use serde_json::json;

    fn apply(text: &str, field: &str, event: &mut Value) -> Result<(), RuntimeError> {
        let def = parse_definition(field, text).unwrap();
        let expr = match def.operator.as_str() {
            "s_up" => build_s_up(&def),
            "s_lo" => build_s_lo(&def),
            "s_trim" => build_s_trim(&def),
            "s_concat" => build_s_concat(&def),
            "s_fromArray" => build_s_from_array(&def),
            other => panic!("unexpected operator {other}"),
        }
        .unwrap();
        expr.invoke(&mut Event::new(event)).map(|_| ())
    }

    #[test]
    fn test_upcase_in_place() {
        let mut event = json!({"user": "Bob"});
        apply("+s_up", "user", &mut event).unwrap();
        assert_eq!(event, json!({"user": "BOB"}));
    }

    #[test]
    fn test_downcase_from_reference() {
        let mut event = json!({"raw": "ROOT"});
        apply("+s_lo/$raw", "user", &mut event).unwrap();
        assert_eq!(event["user"], json!("root"));
        assert_eq!(event["raw"], json!("ROOT"));
    }

    #[test]
    fn test_upcase_literal_param() {
        let mut event = json!({});
        apply("+s_up/warning", "level", &mut event).unwrap();
        assert_eq!(event["level"], json!("WARNING"));
    }

    #[test]
    fn test_case_missing_source_errors() {
        let mut event = json!({});
        let err = apply("+s_up", "user", &mut event).unwrap_err();
        assert!(matches!(err, RuntimeError::UnresolvedReference(_)));
    }

    #[test]
    fn test_case_non_string_errors() {
        let mut event = json!({"user": 42});
        let err = apply("+s_up", "user", &mut event).unwrap_err();
        assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
    }

    #[test]
    fn test_trim_sides() {
        let mut event = json!({"a": "--x--", "b": "--x--", "c": "--x--"});
        apply("+s_trim/begin/-", "a", &mut event).unwrap();
        apply("+s_trim/end/-", "b", &mut event).unwrap();
        apply("+s_trim/both/-", "c", &mut event).unwrap();
        assert_eq!(event["a"], json!("x--"));
        assert_eq!(event["b"], json!("--x"));
        assert_eq!(event["c"], json!("x"));
    }

    #[test]
    fn test_trim_char_from_reference() {
        let mut event = json!({"path": "/tmp/", "sep": "/"});
        apply("+s_trim/both/$sep", "path", &mut event).unwrap();
        assert_eq!(event["path"], json!("tmp"));
    }

    #[test]
    fn test_trim_bad_side_fails_build() {
        let def = parse_definition("f", "+s_trim/middle/-").unwrap();
        let err = build_s_trim(&def).unwrap_err();
        assert!(matches!(err, BuildError::InvalidArguments { .. }));
    }

    #[test]
    fn test_concat_mixes_literals_and_references() {
        let mut event = json!({"user": "bob", "pid": 101, "elevated": true});
        apply("+s_concat/$user/:/$pid/:/$elevated", "summary", &mut event).unwrap();
        assert_eq!(event["summary"], json!("bob:101:true"));
    }

    #[test]
    fn test_concat_missing_reference_errors() {
        let mut event = json!({});
        let err = apply("+s_concat/a/$gone", "out", &mut event).unwrap_err();
        assert!(matches!(err, RuntimeError::UnresolvedReference(_)));
    }

    #[test]
    fn test_concat_requires_params() {
        let def = parse_definition("f", "+s_concat").unwrap();
        assert!(matches!(
            build_s_concat(&def).unwrap_err(),
            BuildError::InvalidArguments { .. }
        ));
    }

    #[test]
    fn test_from_array_joins_without_outer_separators() {
        let mut event = json!({"tags": ["a", "b", "c"]});
        apply("+s_fromArray/$tags/,", "joined", &mut event).unwrap();
        assert_eq!(event["joined"], json!("a,b,c"));
    }

    #[test]
    fn test_from_array_requires_reference_first() {
        let def = parse_definition("f", "+s_fromArray/tags/,").unwrap();
        assert!(matches!(
            build_s_from_array(&def).unwrap_err(),
            BuildError::InvalidArguments { .. }
        ));
    }

    #[test]
    fn test_from_array_rejects_non_string_elements() {
        let mut event = json!({"tags": ["a", 1]});
        let err = apply("+s_fromArray/$tags/,", "joined", &mut event).unwrap_err();
        assert!(matches!(err, RuntimeError::NonStringElement(_)));
    }

    #[test]
    fn test_from_array_on_non_array_errors() {
        let mut event = json!({"tags": "abc"});
        let err = apply("+s_fromArray/$tags/,", "joined", &mut event).unwrap_err();
        assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
    }
}
