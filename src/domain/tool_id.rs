//! Tool identifiers and their argument contracts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of tools a plan can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ToolId {
    /// Arithmetic evaluation
    #[serde(rename = "calculator")]
    Arithmetic,
    /// Static weather table
    #[serde(rename = "weather")]
    WeatherLookup,
    /// Static knowledge base
    #[serde(rename = "kb")]
    KnowledgeBaseLookup,
    /// Unit and currency conversion
    #[serde(rename = "unitconv")]
    UnitConversion,
    /// Phrase translation
    #[serde(rename = "translator")]
    Translation,
}

impl ToolId {
    /// Every tool, in registry order
    pub const ALL: [ToolId; 5] = [
        ToolId::Arithmetic,
        ToolId::WeatherLookup,
        ToolId::KnowledgeBaseLookup,
        ToolId::UnitConversion,
        ToolId::Translation,
    ];

    /// Stable name used in logs, listings and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arithmetic => "calculator",
            Self::WeatherLookup => "weather",
            Self::KnowledgeBaseLookup => "kb",
            Self::UnitConversion => "unitconv",
            Self::Translation => "translator",
        }
    }

    /// Argument keys a plan for this tool must carry, in order
    pub fn required_args(&self) -> &'static [&'static str] {
        match self {
            Self::Arithmetic => &["expr"],
            Self::WeatherLookup => &["city"],
            Self::KnowledgeBaseLookup => &["query"],
            Self::UnitConversion => &["query"],
            Self::Translation => &["text", "from_lang", "to_lang"],
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
