//! Operator registry: name-to-builder dispatch.
//!
//! The registry is populated once, before any concurrent compilation
//! starts, and is read-only afterwards: builds on multiple threads share
//! `&Registry` and resolve operators without locking.

use std::collections::HashMap;

use fieldop_parser::Definition;

use crate::builders;
use crate::error::{BuildError, Result};
use crate::expression::Expression;

/// A builder compiles one definition into one expression, or fails.
pub type BuilderFn = fn(&Definition) -> Result<Expression>;

/// Immutable-after-setup mapping from operator name to builder.
#[derive(Debug, Default)]
pub struct Registry {
    builders: HashMap<&'static str, BuilderFn>,
}

const DEFAULT_BUILDERS: &[(&str, BuilderFn)] = &[
    // String transforms
    ("s_up", builders::string::build_s_up),
    ("s_lo", builders::string::build_s_lo),
    ("s_trim", builders::string::build_s_trim),
    ("s_concat", builders::string::build_s_concat),
    ("s_fromArray", builders::string::build_s_from_array),
    // Integer transforms
    ("i_calc", builders::int::build_i_calc),
    // Structural transforms
    ("delete_field", builders::json::build_delete_field),
    // Regex transforms
    ("re_extract", builders::regex::build_re_extract),
    // Array transforms
    ("a_append", builders::array::build_a_append),
    ("a_append_split", builders::array::build_a_append_split),
    // IP transforms
    ("ip_version", builders::ip::build_ip_version),
    // Predicates
    ("exists", builders::check::build_exists),
    ("not_exists", builders::check::build_not_exists),
    ("s_eq", builders::check::build_s_eq),
    ("ip_cidr", builders::check::build_ip_cidr),
];

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry {
            builders: HashMap::new(),
        }
    }

    /// Create a registry with every built-in operator registered.
    pub fn with_defaults() -> Self {
        let mut registry = Registry::new();
        for (name, builder) in DEFAULT_BUILDERS {
            registry.builders.insert(*name, *builder);
        }
        registry
    }

    /// Register a builder under a name.
    pub fn register(&mut self, name: &'static str, builder: BuilderFn) -> Result<()> {
        if self.builders.contains_key(name) {
            return Err(BuildError::DuplicateOperator(name.to_string()));
        }
        self.builders.insert(name, builder);
        Ok(())
    }

    /// Look up the builder for an operator name.
    pub fn resolve(&self, name: &str) -> Result<BuilderFn> {
        self.builders
            .get(name)
            .copied()
            .ok_or_else(|| BuildError::UnknownOperator(name.to_string()))
    }

    /// Registered operator names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.builders.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldop_parser::parse_definition;

    #[test]
    fn test_defaults_cover_all_operators() {
        let registry = Registry::with_defaults();
        for name in [
            "s_up",
            "s_lo",
            "s_trim",
            "s_concat",
            "s_fromArray",
            "i_calc",
            "delete_field",
            "re_extract",
            "a_append",
            "a_append_split",
            "ip_version",
            "exists",
            "not_exists",
            "s_eq",
            "ip_cidr",
        ] {
            assert!(registry.resolve(name).is_ok(), "missing builder for {name}");
        }
    }

    #[test]
    fn test_unknown_operator() {
        let registry = Registry::with_defaults();
        let err = registry.resolve("s_reverse").unwrap_err();
        assert!(matches!(err, BuildError::UnknownOperator(_)));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = Registry::with_defaults();
        let count = registry.len();
        let err = registry
            .register("s_up", crate::builders::string::build_s_up)
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateOperator(_)));
        // The registry is left unaffected
        assert_eq!(registry.len(), count);
    }

    #[test]
    fn test_resolved_builder_is_invocable() {
        let registry = Registry::with_defaults();
        let builder = registry.resolve("s_up").unwrap();
        let def = parse_definition("user", "+s_up").unwrap();
        let expr = builder(&def).unwrap();
        assert_eq!(expr.name(), "s_up");
        assert_eq!(expr.field(), "user");
        assert_eq!(expr.kind(), crate::expression::ExpressionKind::Transform);
    }

    #[test]
    fn test_predicates_report_predicate_kind() {
        let registry = Registry::with_defaults();
        for text in ["+exists", "+not_exists", "+s_eq/x", "+ip_cidr/10.0.0.0\\/8"] {
            let def = parse_definition("f", text).unwrap();
            let expr = compile(&registry, &def);
            assert_eq!(
                expr.kind(),
                crate::expression::ExpressionKind::Predicate,
                "{text}"
            );
        }
    }

    fn compile(registry: &Registry, def: &Definition) -> Expression {
        registry.resolve(&def.operator).unwrap()(def).unwrap()
    }
}
