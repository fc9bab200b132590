//! Tool system: the shared tool contract, the registry, and the five tools
//!
//! Every tool validates its arguments against its contract, then executes
//! over a static table. The dispatcher only ever sees `dyn Tool`.

mod calculator;
mod knowledge_base;
mod registry;
mod translator;
mod unit_converter;
mod weather;

pub use calculator::CalculatorTool;
pub use knowledge_base::{KnowledgeBaseTool, KnowledgeEntry};
pub use registry::ToolRegistry;
pub use translator::TranslatorTool;
pub use unit_converter::UnitConverterTool;
pub use weather::WeatherTool;

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{ToolArgs, ToolId};
use crate::error::{DispatchError, Result};
use crate::instrument;

/// A tool the dispatcher can run
pub trait Tool: Send + Sync {
    /// Which tool this is
    fn id(&self) -> ToolId;

    /// One-line description for tool listings
    fn description(&self) -> &'static str;

    /// Check the argument contract; by default every required key must be a string
    fn validate_args(&self, args: &ToolArgs) -> Result<()> {
        for key in self.id().required_args() {
            required_str(args, key)?;
        }
        Ok(())
    }

    /// Execute with already-validated arguments
    fn execute(&self, args: &ToolArgs) -> Result<String>;

    /// Validate then execute
    fn run(&self, args: &ToolArgs) -> Result<String> {
        instrument::timed(&format!("tool {}", self.id()), || {
            self.validate_args(args)?;
            self.execute(args)
        })
    }
}

impl<T: Tool + ?Sized> Tool for Arc<T> {
    fn id(&self) -> ToolId {
        (**self).id()
    }

    fn description(&self) -> &'static str {
        (**self).description()
    }

    fn validate_args(&self, args: &ToolArgs) -> Result<()> {
        (**self).validate_args(args)
    }

    fn execute(&self, args: &ToolArgs) -> Result<String> {
        (**self).execute(args)
    }

    fn run(&self, args: &ToolArgs) -> Result<String> {
        (**self).run(args)
    }
}

/// Fetch a required string argument
pub fn required_str<'a>(args: &'a ToolArgs, key: &str) -> Result<&'a str> {
    match args.get(key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(DispatchError::Argument(format!("Argument '{}' must be a string", key))),
        None => Err(DispatchError::Argument(format!("Missing '{}' argument", key))),
    }
}

/// Fetch an optional string argument; present but non-string is an error
pub fn optional_str<'a>(args: &'a ToolArgs, key: &str) -> Result<Option<&'a str>> {
    match args.get(key) {
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(DispatchError::Argument(format!("Argument '{}' must be a string", key))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::string_args;
    use serde_json::json;

    struct EchoTool;

    impl Tool for EchoTool {
        fn id(&self) -> ToolId {
            ToolId::KnowledgeBaseLookup
        }

        fn description(&self) -> &'static str {
            "Echoes the query"
        }

        fn execute(&self, args: &ToolArgs) -> Result<String> {
            Ok(required_str(args, "query")?.to_string())
        }
    }

    #[test]
    fn test_run_validates_then_executes() {
        let tool = EchoTool;
        assert_eq!(tool.run(&string_args([("query", "hi")])).unwrap(), "hi");
    }

    #[test]
    fn test_run_rejects_missing_argument() {
        let err = EchoTool.run(&ToolArgs::new()).unwrap_err();
        assert!(matches!(err, DispatchError::Argument(_)));
        assert!(err.to_string().contains("'query'"));
    }

    #[test]
    fn test_run_rejects_wrong_type() {
        let mut args = ToolArgs::new();
        args.insert("query".into(), json!(["not", "a", "string"]));
        let err = EchoTool.run(&args).unwrap_err();
        assert!(err.to_string().contains("must be a string"));
    }

    #[test]
    fn test_arc_forwards() {
        let tool: Arc<EchoTool> = Arc::new(EchoTool);
        assert_eq!(tool.id(), ToolId::KnowledgeBaseLookup);
        assert_eq!(tool.run(&string_args([("query", "shared")])).unwrap(), "shared");
    }

    #[test]
    fn test_optional_str() {
        let args = string_args([("query", "x")]);
        assert_eq!(optional_str(&args, "query").unwrap(), Some("x"));
        assert_eq!(optional_str(&args, "city").unwrap(), None);
    }
}
