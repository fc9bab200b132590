//! Dispatchr - a rule-based query dispatcher
//!
//! A free-text query is classified by a regex cascade and routed to one of
//! five mocked tools: a calculator, a weather table, a knowledge base, a unit
//! converter and a phrase translator.

pub mod dispatcher;
pub mod domain;
pub mod error;
pub mod expr;
pub mod instrument;
pub mod planner;
pub mod tools;

pub use dispatcher::Dispatcher;
pub use domain::{FailureKind, Plan, Response, ToolArgs, ToolId};
pub use error::{DispatchError, Result};
pub use planner::{PlanSource, QueryPlanner};
pub use tools::{Tool, ToolRegistry};
