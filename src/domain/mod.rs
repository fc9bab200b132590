//! Domain types for dispatchr
//!
//! - ToolId: the closed set of tools and their argument contracts
//! - Plan: a validated (tool, arguments) decision for one query
//! - Response: the structured outcome handed back to callers

pub mod plan;
pub mod response;
pub mod tool_id;

pub use plan::{Plan, ToolArgs, string_args};
pub use response::{FailureKind, Response};
pub use tool_id::ToolId;
