//! Structured dispatcher responses.

use serde::{Deserialize, Serialize};

use super::ToolId;

/// Category of a failed query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Query was empty or whitespace
    EmptyQuery,
    /// The planner could not produce a plan
    Planning,
    /// The selected tool rejected its arguments or failed
    ToolExecution,
    /// Anything else
    Internal,
}

impl FailureKind {
    /// User-facing sentence for this failure
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "Please provide a question or query.",
            Self::Planning => "I couldn't understand your question. Please rephrase it.",
            Self::ToolExecution => "I encountered an error while processing your request.",
            Self::Internal => "An unexpected error occurred.",
        }
    }
}

/// Outcome of processing one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub result: String,
    pub tool_used: Option<ToolId>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl Response {
    pub fn success(result: impl Into<String>, tool: ToolId) -> Self {
        Self {
            result: result.into(),
            tool_used: Some(tool),
            success: true,
            error: None,
            failure: None,
        }
    }

    pub fn failure(kind: FailureKind, error: impl Into<String>) -> Self {
        Self {
            result: kind.message().to_string(),
            tool_used: None,
            success: false,
            error: Some(error.into()),
            failure: Some(kind),
        }
    }
}
