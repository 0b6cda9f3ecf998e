//! Pipeline composition and short-circuit evaluation.
//!
//! A pipeline is the ordered sequence of expressions compiled from one
//! asset. Order is declaration order and is never changed: later
//! expressions may depend on fields written by earlier ones. One pipeline
//! instance is immutable after construction and is shared read-only across
//! worker threads processing independent events.

use serde_json::Value;

use crate::event::Event;
use crate::expression::Expression;
use crate::outcome::PipelineOutcome;

/// An ordered, immutable sequence of compiled expressions.
#[derive(Debug, Clone)]
pub struct Pipeline {
    name: String,
    expressions: Vec<Expression>,
}

impl Pipeline {
    /// Build a pipeline from already-compiled expressions.
    pub fn new(name: impl Into<String>, expressions: Vec<Expression>) -> Self {
        Pipeline {
            name: name.into(),
            expressions,
        }
    }

    /// Name of the asset this pipeline was compiled from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Apply every expression to the event, in declared order.
    ///
    /// Stops at the first predicate returning false (`Dropped`) or the
    /// first failing invocation (`Errored`); later expressions are not
    /// invoked. On `Continue` the event has been mutated in place, same
    /// identity, possibly different content.
    pub fn apply(&self, value: &mut Value) -> PipelineOutcome {
        let mut event = Event::new(value);
        for expr in &self.expressions {
            match expr.invoke(&mut event) {
                Ok(true) => {}
                Ok(false) => {
                    return PipelineOutcome::Dropped {
                        expression: expr.name().to_string(),
                    };
                }
                Err(e) => {
                    return PipelineOutcome::Errored {
                        expression: expr.name().to_string(),
                        field: expr.field().to_string(),
                        reason: e.to_string(),
                    };
                }
            }
        }
        PipelineOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile_asset;
    use crate::registry::Registry;
    use fieldop_parser::parse_asset_yaml;
    use serde_json::json;

    fn pipeline(yaml: &str) -> Pipeline {
        let asset = parse_asset_yaml(yaml).unwrap();
        compile_asset(&asset, &Registry::with_defaults()).unwrap()
    }

    #[test]
    fn test_expressions_run_in_declaration_order() {
        // The second operation reads the field written by the first.
        let p = pipeline(
            r#"
name: decoder/chain/0
operations:
  - upper: +s_up/$raw
  - copy: +s_concat/$upper
"#,
        );
        let mut event = json!({"raw": "abc"});
        assert!(p.apply(&mut event).is_continue());
        assert_eq!(event["upper"], json!("ABC"));
        assert_eq!(event["copy"], json!("ABC"));
    }

    #[test]
    fn test_predicate_false_short_circuits() {
        let p = pipeline(
            r#"
name: decoder/gate/0
operations:
  - action: +s_eq/login
  - user: +s_up
"#,
        );
        let mut event = json!({"action": "logout", "user": "bob"});
        let outcome = p.apply(&mut event);
        assert_eq!(
            outcome,
            PipelineOutcome::Dropped {
                expression: "s_eq".to_string()
            }
        );
        // The transform after the failed predicate never ran
        assert_eq!(event["user"], json!("bob"));
    }

    #[test]
    fn test_error_short_circuits() {
        let p = pipeline(
            r#"
name: decoder/err/0
operations:
  - missing: +s_up
  - user: +s_up
"#,
        );
        let mut event = json!({"user": "bob"});
        let outcome = p.apply(&mut event);
        assert!(outcome.is_errored());
        assert_eq!(event["user"], json!("bob"));
    }

    #[test]
    fn test_empty_pipeline_continues() {
        let p = Pipeline::new("decoder/empty/0", Vec::new());
        let mut event = json!({"a": 1});
        assert!(p.apply(&mut event).is_continue());
        assert_eq!(event, json!({"a": 1}));
    }

    #[test]
    fn test_pipeline_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pipeline>();
    }

    #[test]
    fn test_reapplying_is_deterministic() {
        let p = pipeline(
            r#"
name: decoder/idem/0
operations:
  - tmp: +delete_field
  - user: +s_up
"#,
        );
        let mut event = json!({"tmp": 1, "user": "bob"});
        assert!(p.apply(&mut event).is_continue());
        assert!(p.apply(&mut event).is_continue());
        assert_eq!(event, json!({"user": "BOB"}));
    }
}
