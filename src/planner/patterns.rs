//! Compiled regex set for intent recognition
//!
//! Patterns marked case-insensitive run against the original query so
//! captured text keeps its case. The rest run against the normalized
//! (trimmed, lowercased) query.

use regex::Regex;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Patterns {
    /// `12.5% of 243`
    pub percentage: Regex,
    /// any math keyword, operator or digit
    pub math: Regex,
    pub weather: Regex,
    /// letter words after `in`, up to punctuation or end
    pub city: Regex,
    /// `convert 50 f to c`
    pub conversion: Regex,
    /// whole-word unit mention for `convert ...` queries
    pub unit_word: Regex,
    /// `translate "text" ... from LANG to LANG` (case-insensitive)
    pub translate_quoted_from: Regex,
    /// `translate word from LANG to LANG` (case-insensitive)
    pub translate_word_from: Regex,
    /// `translate "text" ... to LANG` (case-insensitive)
    pub translate_quoted: Regex,
    /// `translate word to LANG` (case-insensitive)
    pub translate_word: Regex,
    /// `who is PHRASE` (case-insensitive)
    pub who_is: Regex,
}

impl Patterns {
    pub fn compile() -> Result<Self> {
        Ok(Self {
            percentage: Regex::new(r"\d+(?:\.\d+)?%\s+of\s+\d+(?:\.\d+)?")?,
            math: Regex::new(r"(?:add|subtract|multiply|divide|\+|-|\*|/|\d)")?,
            weather: Regex::new(r"weather|temperature|temp")?,
            city: Regex::new(r"\bin\s+([a-z]+(?:\s+[a-z]+)*)")?,
            conversion: Regex::new(r"convert\s+(\d+(?:\.\d+)?)\s+(\w+)\s+to\s+(\w+)")?,
            unit_word: Regex::new(r"\b(?:usd|eur|celsius|fahrenheit|c|f)\b")?,
            translate_quoted_from: Regex::new(
                r#"(?i)translate\s+["'](.+?)["'].*?from\s+(\w+)\s+to\s+(\w+)"#,
            )?,
            translate_word_from: Regex::new(r"(?i)translate\s+(\w+)\s+from\s+(\w+)\s+to\s+(\w+)")?,
            translate_quoted: Regex::new(r#"(?i)translate\s+["'](.+?)["'].*?to\s+(\w+)"#)?,
            translate_word: Regex::new(r"(?i)translate\s+(\w+)\s+to\s+(\w+)")?,
            who_is: Regex::new(r"(?i)who\s+is\s+(.+?)(?:\?|$)")?,
        })
    }
}
