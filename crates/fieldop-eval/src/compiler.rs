//! Compile assets into pipelines; validate assets for the catalog.
//!
//! `compile_asset` is the engine-facing entry point: it builds every
//! definition of an asset and stops at the first failure. `validate_asset`
//! is the catalog-facing entry point invoked before activation: it
//! attempts every definition without executing anything and returns every
//! diagnostic found, because one bad definition must not hide the others.

use std::fmt;

use fieldop_parser::{Asset, Definition, Operation, parse_definition};
use serde::Serialize;

use crate::error::BuildError;
use crate::expression::Expression;
use crate::pipeline::Pipeline;
use crate::registry::Registry;

/// A structured build diagnostic: which field, which operator, and why.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Target field path of the offending definition.
    pub field: String,
    /// Operator name, best-effort when the definition itself is malformed.
    pub operator: String,
    /// Failure detail.
    pub reason: String,
}

impl Diagnostic {
    fn new(op: &Operation, error: &BuildError) -> Self {
        Diagnostic {
            field: op.field.clone(),
            operator: operator_hint(&op.text),
            reason: error.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}' (+{}): {}", self.field, self.operator, self.reason)
    }
}

/// Best-effort operator name for diagnostics on definitions that may not
/// parse at all.
fn operator_hint(text: &str) -> String {
    text.trim()
        .trim_start_matches('+')
        .split('/')
        .next()
        .unwrap_or("")
        .to_string()
}

/// Compile one already-parsed definition.
pub fn compile_definition(
    def: &Definition,
    registry: &Registry,
) -> Result<Expression, BuildError> {
    let builder = registry.resolve(&def.operator)?;
    builder(def)
}

/// Parse and compile one raw operation.
pub fn compile_operation(
    op: &Operation,
    registry: &Registry,
) -> Result<Expression, BuildError> {
    let def = parse_definition(&op.field, &op.text)?;
    compile_definition(&def, registry)
}

/// Compile a whole asset into a pipeline.
///
/// Fails on the first bad definition with a structured diagnostic; use
/// [`validate_asset`] to collect every error instead.
pub fn compile_asset(asset: &Asset, registry: &Registry) -> Result<Pipeline, Diagnostic> {
    let mut expressions = Vec::with_capacity(asset.operations.len());
    for op in &asset.operations {
        match compile_operation(op, registry) {
            Ok(expr) => expressions.push(expr),
            Err(e) => return Err(Diagnostic::new(op, &e)),
        }
    }
    Ok(Pipeline::new(asset.name.clone(), expressions))
}

/// Attempt to compile every definition of an asset without executing any,
/// returning all diagnostics found. An empty result means the asset is
/// valid.
pub fn validate_asset(asset: &Asset, registry: &Registry) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for op in &asset.operations {
        if let Err(e) = compile_operation(op, registry) {
            diagnostics.push(Diagnostic::new(op, &e));
        }
    }
    diagnostics
}
