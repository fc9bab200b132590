//! Tool registry - owns the tool instances and looks them up by id

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::{CalculatorTool, KnowledgeBaseTool, Tool, TranslatorTool, UnitConverterTool, WeatherTool};
use crate::domain::ToolId;
use crate::error::Result;

/// Holds one instance of each registered tool
pub struct ToolRegistry {
    tools: HashMap<ToolId, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create registry with the five standard tools
    pub fn standard(weather: Arc<WeatherTool>, kb: KnowledgeBaseTool) -> Result<Self> {
        let mut registry = Self::new();

        registry.register(Box::new(CalculatorTool::new()?));
        registry.register(Box::new(weather));
        registry.register(Box::new(kb));
        registry.register(Box::new(UnitConverterTool::new()?));
        registry.register(Box::new(TranslatorTool::new()));

        Ok(registry)
    }

    /// Create an empty registry (for custom tool sets)
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Add a tool, replacing any tool registered under the same id
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.id(), tool);
    }

    pub fn get(&self, id: ToolId) -> Option<&dyn Tool> {
        self.tools.get(&id).map(|tool| tool.as_ref())
    }

    pub fn has_tool(&self, id: ToolId) -> bool {
        self.tools.contains_key(&id)
    }

    /// Tool name to description, for listings
    pub fn descriptions(&self) -> BTreeMap<String, String> {
        self.tools
            .values()
            .map(|tool| (tool.id().to_string(), tool.description().to_string()))
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
