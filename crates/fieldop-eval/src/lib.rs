//! # fieldop-eval
//!
//! Compiles per-field operator definitions into executable event-processing
//! pipelines.
//!
//! This crate consumes the definitions parsed by [`fieldop_parser`] and
//! turns them into [`Expression`] nodes using a compile-then-evaluate
//! model.
//!
//! ## Architecture
//!
//! - **Build time** (per asset): definition text → [`Registry`] lookup →
//!   builder → compiled [`Expression`]. Arity and literal types are fully
//!   validated here; a bad definition yields a structured [`Diagnostic`]
//!   and never a partially built pipeline.
//! - **Run time** (per event): the immutable [`Pipeline`] invokes its
//!   expressions in declaration order against a mutable JSON event. Field
//!   references are resolved fresh on every invocation, since an earlier
//!   expression may have just written the referenced field. The first
//!   predicate `false` drops the event; the first invocation failure stops
//!   with an error; neither is conflated with the other.
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldop_parser::parse_asset_yaml;
//! use fieldop_eval::{Registry, compile_asset};
//! use serde_json::json;
//!
//! let yaml = r#"
//! name: decoder/auth/0
//! operations:
//!   - user: +s_up
//!   - source.ip_version: +ip_version/$source.ip
//! "#;
//!
//! let asset = parse_asset_yaml(yaml).unwrap();
//! let registry = Registry::with_defaults();
//! let pipeline = compile_asset(&asset, &registry).unwrap();
//!
//! let mut event = json!({"user": "bob", "source": {"ip": "10.1.2.3"}});
//! let outcome = pipeline.apply(&mut event);
//! assert!(outcome.is_continue());
//! assert_eq!(event["user"], json!("BOB"));
//! assert_eq!(event["source"]["ip_version"], json!(4));
//! ```
//!
//! ## Validating for the catalog
//!
//! ```rust
//! use fieldop_parser::parse_asset_yaml;
//! use fieldop_eval::{Registry, validate_asset};
//!
//! let yaml = r#"
//! name: decoder/broken/0
//! operations:
//!   - a: +no_such_op/x
//!   - b: +s_up
//!   - c: +i_calc/mod/1
//! "#;
//!
//! let asset = parse_asset_yaml(yaml).unwrap();
//! let diagnostics = validate_asset(&asset, &Registry::with_defaults());
//! assert_eq!(diagnostics.len(), 2);
//! ```

mod builders;
pub mod compiler;
pub mod error;
pub mod event;
pub mod expression;
pub mod outcome;
pub mod pipeline;
pub mod registry;

// Re-export the most commonly used types and functions at crate root
pub use compiler::{
    Diagnostic, compile_asset, compile_definition, compile_operation, validate_asset,
};
pub use error::{BuildError, Result, RuntimeError};
pub use event::Event;
pub use expression::{Expression, ExpressionKind};
pub use outcome::PipelineOutcome;
pub use pipeline::Pipeline;
pub use registry::{BuilderFn, Registry};
