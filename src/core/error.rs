//! Error handling and error types for the split-search engine.
//!
//! Only structural misuse is reported through [`SplitError`]: unknown
//! variables, mismatched weight vectors, invalid parameters. A variable
//! that simply cannot be split at a node is not an error; strategies
//! report that case as `Ok(None)`.

use std::io;
use thiserror::Error;

use crate::core::types::VarKind;

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum SplitError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// A variable name that does not exist in the frame
    #[error("Unknown variable: {name}")]
    UnknownVariable { name: String },

    /// A variable whose kind is not handled by the requested operation
    #[error("Variable {name} has kind {actual}, expected {expected}")]
    VariableType {
        name: String,
        expected: String,
        actual: VarKind,
    },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Out of bounds access
    #[error("Index out of bounds: index {index}, length {length}")]
    IndexOutOfBounds { index: usize, length: usize },

    /// Frame construction errors
    #[error("Dataset error: {message}")]
    Dataset { message: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// TOML parsing errors
    #[error("TOML parse error: {source}")]
    TomlDe {
        #[from]
        source: toml::de::Error,
    },

    /// TOML serialization errors
    #[error("TOML serialization error: {source}")]
    TomlSer {
        #[from]
        source: toml::ser::Error,
    },
}

/// Type alias for Results using SplitError
pub type Result<T> = std::result::Result<T, SplitError>;

impl SplitError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        SplitError::Config {
            message: message.into(),
        }
    }

    /// Create a dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        SplitError::Dataset {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        SplitError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown variable error
    pub fn unknown_variable<S: Into<String>>(name: S) -> Self {
        SplitError::UnknownVariable { name: name.into() }
    }

    /// Create a variable kind error
    pub fn variable_type<N, E>(name: N, expected: E, actual: VarKind) -> Self
    where
        N: Into<String>,
        E: Into<String>,
    {
        SplitError::VariableType {
            name: name.into(),
            expected: expected.into(),
            actual,
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        SplitError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an index out of bounds error
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        SplitError::IndexOutOfBounds { index, length }
    }

    /// Check if this error is recoverable.
    ///
    /// Structural misuse never is: retrying the same call fails the same way.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SplitError::Config { .. } => false,
            SplitError::InvalidParameter { .. } => false,
            SplitError::UnknownVariable { .. } => false,
            SplitError::VariableType { .. } => false,
            SplitError::DimensionMismatch { .. } => false,
            SplitError::IndexOutOfBounds { .. } => false,
            SplitError::Dataset { .. } => false,
            SplitError::IO { .. } => true,
            SplitError::Json { .. } => false,
            SplitError::TomlDe { .. } => false,
            SplitError::TomlSer { .. } => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            SplitError::Config { .. } => "config",
            SplitError::InvalidParameter { .. } => "invalid_parameter",
            SplitError::UnknownVariable { .. } => "unknown_variable",
            SplitError::VariableType { .. } => "variable_type",
            SplitError::DimensionMismatch { .. } => "dimension_mismatch",
            SplitError::IndexOutOfBounds { .. } => "index_out_of_bounds",
            SplitError::Dataset { .. } => "dataset",
            SplitError::IO { .. } => "io",
            SplitError::Json { .. } => "json",
            SplitError::TomlDe { .. } => "toml",
            SplitError::TomlSer { .. } => "toml",
        }
    }
}

/// Convenience macros for error creation
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::SplitError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::SplitError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! dataset_error {
    ($msg:expr) => {
        $crate::core::error::SplitError::dataset($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::SplitError::dataset(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SplitError::config("test configuration error");
        assert_eq!(err.category(), "config");
        assert!(!err.is_recoverable());

        let err = SplitError::unknown_variable("x");
        assert_eq!(err.category(), "unknown_variable");
        assert!(err.to_string().contains('x'));
    }

    #[test]
    fn test_error_macros() {
        let err = config_error!("test error");
        assert!(matches!(err, SplitError::Config { .. }));

        let err = dataset_error!("column {} has {} rows", "x", 3);
        assert!(matches!(err, SplitError::Dataset { .. }));
        assert!(err.to_string().contains("column x has 3 rows"));
    }

    #[test]
    fn test_ensure_macro() {
        fn check(value: usize) -> Result<usize> {
            ensure!(value > 0, SplitError::invalid_parameter("min_count", "0", "must be positive"));
            Ok(value)
        }

        assert!(check(1).is_ok());
        let err = check(0).unwrap_err();
        assert_eq!(err.category(), "invalid_parameter");
    }

    #[test]
    fn test_variable_type_display() {
        let err = SplitError::variable_type("age", "nominal", VarKind::Double);
        let message = err.to_string();
        assert!(message.contains("age"));
        assert!(message.contains("nominal"));
        assert!(message.contains("double"));
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = SplitError::dimension_mismatch("10 weights", "9 weights");
        assert_eq!(err.category(), "dimension_mismatch");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: SplitError = io_err.into();
        assert!(matches!(err, SplitError::IO { .. }));
        assert_eq!(err.category(), "io");
    }
}
