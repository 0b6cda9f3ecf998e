//! Build-time and invocation-time error types.

use thiserror::Error;

/// Errors produced while compiling one definition into an expression.
///
/// All variants are fatal to that definition and reported back to the
/// catalog; they never affect compiling sibling definitions of the same
/// asset.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The definition text violates the operator grammar.
    #[error("malformed definition: {0}")]
    Malformed(#[from] fieldop_parser::ParseError),

    /// No builder is registered under this operator name.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// An operator name was registered twice.
    #[error("operator '{0}' is already registered")]
    DuplicateOperator(String),

    /// Parameter count or literal/reference mix does not match the
    /// operator's signature.
    #[error("invalid arguments for '{operator}': {reason}")]
    InvalidArguments {
        operator: &'static str,
        reason: String,
    },

    /// A literal parameter failed type coercion.
    #[error("invalid argument type for '{operator}': {reason}")]
    InvalidArgumentType {
        operator: &'static str,
        reason: String,
    },

    /// A regex pattern failed to compile.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// A CIDR network failed to parse.
    #[error("invalid CIDR: {0}")]
    InvalidCidr(#[from] ipnet::AddrParseError),
}

/// Errors produced while invoking an expression against one event.
///
/// These are per-event failures surfaced as `PipelineOutcome::Errored`;
/// they are never conflated with a predicate's semantic `false`.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A referenced field is absent from the event.
    #[error("field '{0}' not found")]
    UnresolvedReference(String),

    /// A field holds a value of the wrong runtime type.
    #[error("field '{field}' is not {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    /// Integer division by zero.
    #[error("division by zero on field '{0}'")]
    DivisionByZero(String),

    /// An arithmetic result does not fit in an i64.
    #[error("integer overflow on field '{0}'")]
    Overflow(String),

    /// A value does not parse as an IPv4 or IPv6 address.
    #[error("'{0}' is not a valid IP address")]
    InvalidIp(String),

    /// A separator resolved to something other than one character.
    #[error("separator from '{field}' is not a single character: '{value}'")]
    InvalidSeparator { field: String, value: String },

    /// An array element has the wrong type for the operation.
    #[error("array field '{0}' contains a non-string element")]
    NonStringElement(String),
}

/// Convenience result type for the build phase.
///
/// Defaults to [`BuildError`] so build-phase callers can write
/// `Result<Expression>`, while runtime helpers override the error type as
/// `Result<T, RuntimeError>`.
pub type Result<T, E = BuildError> = std::result::Result<T, E>;
