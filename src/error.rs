/// Error type for the deskcalc crate
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Error while parsing an expression
    #[error("ParseError: {0}")]
    ParseError(String),
    /// The expression contains forbidden characters or does not parse
    #[error("Invalid expression")]
    InvalidExpression,
    /// An operator accepted by the character set but not by the calculator
    #[error("Unsupported operator '{0}'")]
    UnsupportedOperator(String),
    /// A division with a zero divisor
    #[error("Cannot divide by zero")]
    DivisionByZero,
    /// A string that is not a number literal
    #[error("Cannot parse '{0}' as a number")]
    InvalidNumber(String),
    /// The evaluation did not produce a finite number
    #[error("Invalid result")]
    InvalidResult,
    /// A digit key received something else than `0-9`
    #[error("Invalid digit '{0}'")]
    InvalidDigit(char),
    /// A unary function called outside of its domain
    #[error("{0}")]
    Domain(&'static str),
    /// The value is too large to be shown
    #[error("Result out of range")]
    Overflow,
}

/// Error type for configuration loading and saving
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written
    #[error("config I/O error on {path}: {source}")]
    Io {
        /// Path of the configuration file
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for [`Config`](crate::Config)
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be serialized
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A setting is outside of its allowed range
    #[error("invalid setting {key}: {message}")]
    Invalid {
        /// Name of the setting
        key: &'static str,
        /// Why the value was rejected
        message: String,
    },
}
