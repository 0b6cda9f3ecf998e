use thiserror::Error;

/// Errors that can occur while parsing definitions and assets.
///
/// Every variant except `Yaml` and `Io` describes a malformed definition:
/// text that violates the operator grammar and can never compile.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("definition is empty")]
    EmptyDefinition,

    #[error("missing '+' operator marker in '{0}'")]
    MissingMarker(String),

    #[error("missing operator name in '{0}'")]
    MissingOperator(String),

    #[error("invalid operator name '{0}'")]
    InvalidOperatorName(String),

    #[error("reference marker '$' with empty field path")]
    EmptyReference,

    #[error("unbalanced escape sequence in '{0}'")]
    UnbalancedEscape(String),

    #[error("missing ':' separator in definition line '{0}'")]
    MissingFieldSeparator(String),

    #[error("empty field path in definition line '{0}'")]
    EmptyField(String),

    #[error("invalid asset: {0}")]
    InvalidAsset(String),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ParseError>;
