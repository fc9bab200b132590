//! Error types for dispatchr
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while planning or running a query
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Query was empty or whitespace only
    #[error("Empty query")]
    EmptyQuery,

    /// No plan could be produced for the query
    #[error("Planning failed: {0}")]
    Planning(String),

    /// A tool was invoked without a required or correctly typed argument
    #[error("Invalid arguments: {0}")]
    Argument(String),

    /// A tool failed while executing
    #[error("Execution failed: {0}")]
    Execution(String),

    /// Anything that should not happen given the closed tool set
    #[error("Internal error: {0}")]
    Internal(String),

    /// A built-in pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for dispatchr operations
pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_error() {
        assert_eq!(DispatchError::EmptyQuery.to_string(), "Empty query");
    }

    #[test]
    fn test_planning_error() {
        let err = DispatchError::Planning("no stage matched".to_string());
        assert_eq!(err.to_string(), "Planning failed: no stage matched");
    }

    #[test]
    fn test_argument_error() {
        let err = DispatchError::Argument("Calculator requires 'expr' argument".to_string());
        assert_eq!(err.to_string(), "Invalid arguments: Calculator requires 'expr' argument");
    }

    #[test]
    fn test_execution_error() {
        let err = DispatchError::Execution("Cannot convert xyz to abc".to_string());
        assert_eq!(err.to_string(), "Execution failed: Cannot convert xyz to abc");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DispatchError = io_err.into();
        assert!(matches!(err, DispatchError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: DispatchError = json_err.into();
        assert!(matches!(err, DispatchError::Json(_)));
    }

    #[test]
    fn test_pattern_error_conversion() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: DispatchError = regex_err.into();
        assert!(matches!(err, DispatchError::Pattern(_)));
    }
}
