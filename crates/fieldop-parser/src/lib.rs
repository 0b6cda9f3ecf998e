//! # fieldop-parser
//!
//! Parser for per-field operator definitions embedded in decoder/rule
//! assets.
//!
//! A definition is a short line of text binding a target field to one
//! operator invocation:
//!
//! ```text
//! <field>: +<operator>/<param1>/<param2>/...
//! ```
//!
//! Parameters are positional. `/` is the delimiter; a token starting with
//! `$` is a reference to another event field, resolved at evaluation time;
//! anything else is a literal. `\/`, `\$` and `\\` escape the special
//! characters.
//!
//! This crate handles the textual layer only: tokenizing parameters,
//! classifying literal vs. reference, and loading the YAML asset envelope.
//! Operator semantics (arity, typing, runtime behavior) live in
//! `fieldop-eval`.
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldop_parser::{Parameter, parse_definition_line};
//!
//! let def = parse_definition_line("source.host: +s_concat/$agent.name/./$agent.id").unwrap();
//! assert_eq!(def.field, "source.host");
//! assert_eq!(def.operator, "s_concat");
//! assert_eq!(def.params.len(), 3);
//! assert_eq!(def.params[0], Parameter::Reference("agent.name".into()));
//! ```

pub mod asset;
pub mod definition;
pub mod error;
pub mod param;

// Re-export the most commonly used types and functions at crate root
pub use asset::{
    Asset, AssetSet, Operation, parse_asset_directory, parse_asset_file, parse_asset_yaml,
};
pub use definition::{Definition, parse_definition, parse_definition_line};
pub use error::{ParseError, Result};
pub use param::{Parameter, parse_params};
