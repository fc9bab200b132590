//! Tool execution plans
//!
//! A plan is the planner's decision for one query: which tool runs and with
//! which arguments. Plans are validated against the tool's argument contract
//! when built and cannot be modified afterwards.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ToolId;
use crate::error::{DispatchError, Result};

/// Arguments passed to a tool
pub type ToolArgs = Map<String, Value>;

/// Build tool arguments from string pairs
pub fn string_args<const N: usize>(pairs: [(&str, &str); N]) -> ToolArgs {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect()
}

/// A validated (tool, arguments) decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPlan")]
pub struct Plan {
    tool: ToolId,
    args: ToolArgs,
}

/// Wire form of a plan before its arguments are checked
#[derive(Deserialize)]
struct RawPlan {
    tool: ToolId,
    #[serde(default)]
    args: ToolArgs,
}

impl TryFrom<RawPlan> for Plan {
    type Error = DispatchError;

    fn try_from(raw: RawPlan) -> Result<Self> {
        Self::new(raw.tool, raw.args)
    }
}

impl Plan {
    /// Create a plan, checking that every required argument is present
    pub fn new(tool: ToolId, args: ToolArgs) -> Result<Self> {
        if let Some(missing) = tool.required_args().iter().find(|key| !args.contains_key(**key)) {
            return Err(DispatchError::Argument(format!(
                "Tool '{}' requires argument '{}'",
                tool, missing
            )));
        }
        Ok(Self { tool, args })
    }

    /// The knowledge-base lookup used when no stage matches
    pub fn fallback(query: &str) -> Self {
        Self {
            tool: ToolId::KnowledgeBaseLookup,
            args: string_args([("query", query)]),
        }
    }

    pub fn tool(&self) -> ToolId {
        self.tool
    }

    pub fn args(&self) -> &ToolArgs {
        &self.args
    }

    /// String argument by key, if present and a string
    pub fn arg_str(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(Value::as_str)
    }
}
