//! Query planning and intent recognition
//!
//! A query runs through a fixed cascade of stages. The first stage that
//! produces a plan wins; a stage that errors is logged and skipped. When
//! nothing matches, the query goes to the knowledge base.

mod patterns;

pub use patterns::Patterns;

use std::fmt;

use log::{debug, warn};

use crate::domain::{Plan, ToolId, string_args};
use crate::error::Result;
use crate::instrument;
use crate::tools::WeatherTool;

/// Tokens that make a query a calculation candidate
const MATH_TOKENS: &[&str] = &[
    "%", "+", "-", "*", "/", "add", "subtract", "multiply", "divide", "average",
];

/// Words that make a query a general knowledge question
const QUESTION_WORDS: &[&str] = &["who", "what", "when", "where", "how"];

const DEFAULT_CITY: &str = "Paris";
const DEFAULT_SOURCE_LANGUAGE: &str = "english";

/// Anything that can turn a query into a plan
pub trait PlanSource: Send + Sync {
    fn plan(&self, query: &str) -> Result<Plan>;
}

/// One matcher in the planning cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStage {
    Calculation,
    UnitConversion,
    Translation,
    Weather,
    KnowledgeBase,
}

impl PlanStage {
    /// Stages in priority order
    pub const ALL: [PlanStage; 5] = [
        PlanStage::Calculation,
        PlanStage::UnitConversion,
        PlanStage::Translation,
        PlanStage::Weather,
        PlanStage::KnowledgeBase,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Calculation => "calculation",
            Self::UnitConversion => "unit_conversion",
            Self::Translation => "translation",
            Self::Weather => "weather",
            Self::KnowledgeBase => "knowledge_base",
        }
    }
}

impl fmt::Display for PlanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The two views of a query every stage sees
struct Query<'a> {
    /// trimmed and lowercased
    normalized: String,
    /// trimmed, case preserved
    original: &'a str,
}

/// Regex-cascade planner
#[derive(Debug, Clone)]
pub struct QueryPlanner {
    patterns: Patterns,
}

impl QueryPlanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: Patterns::compile()?,
        })
    }

    /// Choose a tool and arguments for `query`; never fails
    pub fn plan(&self, query: &str) -> Plan {
        instrument::observed("plan", || {
            let original = query.trim();
            let query = Query {
                normalized: original.to_lowercase(),
                original,
            };

            for stage in PlanStage::ALL {
                match self.run_stage(stage, &query) {
                    Ok(Some(plan)) => {
                        debug!("Stage {} planned tool {}", stage, plan.tool());
                        return plan;
                    }
                    Ok(None) => {}
                    Err(e) => warn!("Planner stage {} failed: {}", stage, e),
                }
            }

            debug!("No stage matched, falling back to {}", ToolId::KnowledgeBaseLookup);
            Plan::fallback(original)
        })
    }

    fn run_stage(&self, stage: PlanStage, query: &Query) -> Result<Option<Plan>> {
        match stage {
            PlanStage::Calculation => self.plan_calculation(query),
            PlanStage::UnitConversion => self.plan_unit_conversion(query),
            PlanStage::Translation => self.plan_translation(query),
            PlanStage::Weather => self.plan_weather(query),
            PlanStage::KnowledgeBase => self.plan_knowledge_base(query),
        }
    }

    fn plan_calculation(&self, query: &Query) -> Result<Option<Plan>> {
        let q = &query.normalized;
        let is_math = self.patterns.percentage.is_match(q)
            || (MATH_TOKENS.iter().any(|token| q.contains(token)) && self.patterns.math.is_match(q));
        if !is_math {
            return Ok(None);
        }
        Plan::new(ToolId::Arithmetic, string_args([("expr", query.original)])).map(Some)
    }

    fn plan_unit_conversion(&self, query: &Query) -> Result<Option<Plan>> {
        let q = &query.normalized;
        let is_conversion = self.patterns.conversion.is_match(q)
            || (q.starts_with("convert") && self.patterns.unit_word.is_match(q));
        if !is_conversion {
            return Ok(None);
        }
        Plan::new(ToolId::UnitConversion, string_args([("query", query.original)])).map(Some)
    }

    fn plan_translation(&self, query: &Query) -> Result<Option<Plan>> {
        let p = &self.patterns;
        let original = query.original;

        let parts = if let Some(caps) = p
            .translate_quoted_from
            .captures(original)
            .or_else(|| p.translate_word_from.captures(original))
        {
            Some((caps[1].to_string(), caps[2].to_lowercase(), caps[3].to_lowercase()))
        } else if let Some(caps) = p
            .translate_quoted
            .captures(original)
            .or_else(|| p.translate_word.captures(original))
        {
            Some((caps[1].to_string(), DEFAULT_SOURCE_LANGUAGE.to_string(), caps[2].to_lowercase()))
        } else {
            None
        };

        let Some((text, from_lang, to_lang)) = parts else {
            return Ok(None);
        };
        let args = string_args([
            ("text", text.as_str()),
            ("from_lang", from_lang.as_str()),
            ("to_lang", to_lang.as_str()),
        ]);
        Plan::new(ToolId::Translation, args).map(Some)
    }

    fn plan_weather(&self, query: &Query) -> Result<Option<Plan>> {
        let q = &query.normalized;
        if !self.patterns.weather.is_match(q) && !q.contains("summarize") {
            return Ok(None);
        }
        let city = self
            .patterns
            .city
            .captures(q)
            .map(|caps| city_name(&caps[1]))
            .unwrap_or_else(|| DEFAULT_CITY.to_string());
        Plan::new(
            ToolId::WeatherLookup,
            string_args([("city", city.as_str()), ("query", query.original)]),
        )
        .map(Some)
    }

    fn plan_knowledge_base(&self, query: &Query) -> Result<Option<Plan>> {
        let subject = if let Some(caps) = self.patterns.who_is.captures(query.original) {
            caps[1].trim().to_string()
        } else if QUESTION_WORDS.iter().any(|word| query.normalized.contains(word)) {
            query.original.to_string()
        } else {
            return Ok(None);
        };
        Plan::new(ToolId::KnowledgeBaseLookup, string_args([("query", subject.as_str())])).map(Some)
    }
}

impl PlanSource for QueryPlanner {
    fn plan(&self, query: &str) -> Result<Plan> {
        Ok(QueryPlanner::plan(self, query))
    }
}

/// Longest leading run of words that names a known city, else every word,
/// so `paris today` gives `Paris`
fn city_name(captured: &str) -> String {
    let words: Vec<&str> = captured.split_whitespace().collect();
    let city = (1..=words.len())
        .rev()
        .map(|n| words[..n].join(" "))
        .find(|candidate| WeatherTool::is_known_city(candidate))
        .unwrap_or_else(|| words.join(" "));
    title_case(&city)
}

/// `new york` becomes `New York`
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(query: &str) -> Plan {
        QueryPlanner::new().unwrap().plan(query)
    }

    #[test]
    fn test_percentage_is_calculation() {
        let p = plan("What is 12.5% of 243?");
        assert_eq!(p.tool(), ToolId::Arithmetic);
        assert_eq!(p.arg_str("expr"), Some("What is 12.5% of 243?"));
    }

    #[test]
    fn test_operators_are_calculation() {
        assert_eq!(plan("5 + 3").tool(), ToolId::Arithmetic);
        assert_eq!(plan("Add 10 to 5").tool(), ToolId::Arithmetic);
        assert_eq!(
            plan("Add 10 to the average temperature in Paris and London right now.").tool(),
            ToolId::Arithmetic
        );
    }

    #[test]
    fn test_math_token_without_math_pattern_declines() {
        // "average" alone with no digits or operators is not a calculation
        assert_eq!(plan("average temperature in Berlin").tool(), ToolId::WeatherLookup);
    }

    #[test]
    fn test_unit_conversion() {
        let p = plan("Convert 10 USD to EUR");
        assert_eq!(p.tool(), ToolId::UnitConversion);
        assert_eq!(p.arg_str("query"), Some("Convert 10 USD to EUR"));
        assert_eq!(plan("Convert 50 F to C").tool(), ToolId::UnitConversion);
        assert_eq!(plan("convert celsius to fahrenheit").tool(), ToolId::UnitConversion);
    }

    #[test]
    fn test_convert_without_units_declines() {
        assert_eq!(plan("convert nothing").tool(), ToolId::KnowledgeBaseLookup);
    }

    #[test]
    fn test_translation_quoted_from() {
        let p = plan(r#"Translate "hello" from English to Spanish"#);
        assert_eq!(p.tool(), ToolId::Translation);
        assert_eq!(p.arg_str("text"), Some("hello"));
        assert_eq!(p.arg_str("from_lang"), Some("english"));
        assert_eq!(p.arg_str("to_lang"), Some("spanish"));
    }

    #[test]
    fn test_translation_variants() {
        let p = plan("translate goodbye from english to french");
        assert_eq!(p.arg_str("text"), Some("goodbye"));
        assert_eq!(p.arg_str("to_lang"), Some("french"));

        let p = plan("Translate 'Thank you' to German");
        assert_eq!(p.arg_str("text"), Some("Thank you"));
        assert_eq!(p.arg_str("from_lang"), Some("english"));
        assert_eq!(p.arg_str("to_lang"), Some("german"));

        let p = plan("translate hello to italian");
        assert_eq!(p.arg_str("text"), Some("hello"));
        assert_eq!(p.arg_str("from_lang"), Some("english"));
    }

    #[test]
    fn test_weather_city_extraction() {
        let p = plan("What's the weather in Tokyo?");
        assert_eq!(p.tool(), ToolId::WeatherLookup);
        assert_eq!(p.arg_str("city"), Some("Tokyo"));
        assert_eq!(p.arg_str("query"), Some("What's the weather in Tokyo?"));

        assert_eq!(plan("temperature in new york").arg_str("city"), Some("New York"));
    }

    #[test]
    fn test_weather_city_ignores_trailing_words() {
        assert_eq!(plan("What's the weather in Paris today?").arg_str("city"), Some("Paris"));
        assert_eq!(plan("temperature in London right now?").arg_str("city"), Some("London"));
        assert_eq!(plan("weather in new york this week").arg_str("city"), Some("New York"));
        assert_eq!(plan("weather in springfield").arg_str("city"), Some("Springfield"));
    }

    #[test]
    fn test_city_name() {
        assert_eq!(city_name("tokyo  tonight"), "Tokyo");
        assert_eq!(city_name("gotham city"), "Gotham City");
    }

    #[test]
    fn test_weather_default_city() {
        assert_eq!(plan("How is the weather?").arg_str("city"), Some("Paris"));
    }

    #[test]
    fn test_summarize_is_weather() {
        let p = plan("Summarize today in Amsterdam");
        assert_eq!(p.tool(), ToolId::WeatherLookup);
        assert_eq!(p.arg_str("city"), Some("Amsterdam"));
    }

    #[test]
    fn test_who_is() {
        let p = plan("Who is Ada Lovelace?");
        assert_eq!(p.tool(), ToolId::KnowledgeBaseLookup);
        assert_eq!(p.arg_str("query"), Some("Ada Lovelace"));
    }

    #[test]
    fn test_question_word_uses_original() {
        let p = plan("Where was Alan Turing born?");
        assert_eq!(p.tool(), ToolId::KnowledgeBaseLookup);
        assert_eq!(p.arg_str("query"), Some("Where was Alan Turing born?"));
    }

    #[test]
    fn test_fallback() {
        let p = plan("  Lovelace  ");
        assert_eq!(p.tool(), ToolId::KnowledgeBaseLookup);
        assert_eq!(p.arg_str("query"), Some("Lovelace"));
    }

    #[test]
    fn test_empty_query_falls_back() {
        assert_eq!(plan(""), Plan::fallback(""));
        assert_eq!(plan("   "), Plan::fallback(""));
    }

    #[test]
    fn test_plan_source() {
        let planner = QueryPlanner::new().unwrap();
        let source: &dyn PlanSource = &planner;
        assert_eq!(source.plan("5 * 5").unwrap().tool(), ToolId::Arithmetic);
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(PlanStage::ALL[0], PlanStage::Calculation);
        assert_eq!(PlanStage::ALL[4].name(), "knowledge_base");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("new  york"), "New York");
        assert_eq!(title_case("paris"), "Paris");
    }
}
