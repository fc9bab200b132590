//! unitconv tool - currency, temperature, length and weight conversion

use std::collections::{BTreeMap, HashMap};

use regex::Regex;

use super::{Tool, required_str};
use crate::domain::{ToolArgs, ToolId};
use crate::error::{DispatchError, Result};
use crate::expr::Number;

#[derive(Debug, Clone, Copy)]
enum Conversion {
    Factor(f64),
    Formula(fn(f64) -> f64),
}

impl Conversion {
    fn apply(self, value: f64) -> f64 {
        match self {
            Self::Factor(factor) => value * factor,
            Self::Formula(formula) => formula(value),
        }
    }
}

fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

const CONVERSIONS: &[(&str, &str, Conversion)] = &[
    // Currency (mock rates)
    ("usd", "eur", Conversion::Factor(0.9)),
    ("eur", "usd", Conversion::Factor(1.1)),
    ("usd", "gbp", Conversion::Factor(0.8)),
    ("gbp", "usd", Conversion::Factor(1.25)),
    ("eur", "gbp", Conversion::Factor(0.85)),
    ("gbp", "eur", Conversion::Factor(1.18)),
    // Temperature
    ("c", "f", Conversion::Formula(celsius_to_fahrenheit)),
    ("celsius", "fahrenheit", Conversion::Formula(celsius_to_fahrenheit)),
    ("f", "c", Conversion::Formula(fahrenheit_to_celsius)),
    ("fahrenheit", "celsius", Conversion::Formula(fahrenheit_to_celsius)),
    // Length
    ("m", "ft", Conversion::Factor(3.28084)),
    ("ft", "m", Conversion::Factor(0.3048)),
    ("km", "mi", Conversion::Factor(0.621371)),
    ("mi", "km", Conversion::Factor(1.60934)),
    // Weight
    ("kg", "lb", Conversion::Factor(2.20462)),
    ("lb", "kg", Conversion::Factor(0.453592)),
];

const UNITS_BY_CATEGORY: &[(&str, &[&str])] = &[
    ("currency", &["usd", "eur", "gbp"]),
    ("temperature", &["c", "f", "celsius", "fahrenheit"]),
    ("length", &["m", "ft", "km", "mi"]),
    ("weight", &["kg", "lb"]),
];

#[derive(Debug, Clone)]
pub struct UnitConverterTool {
    conversions: HashMap<(String, String), Conversion>,
    convert_pattern: Regex,
    bare_pattern: Regex,
}

impl UnitConverterTool {
    pub fn new() -> Result<Self> {
        Ok(Self {
            conversions: CONVERSIONS
                .iter()
                .map(|(from, to, conversion)| ((from.to_string(), to.to_string()), *conversion))
                .collect(),
            convert_pattern: Regex::new(r"convert\s+(\d+(?:\.\d+)?)\s+(\w+)\s+to\s+(\w+)")?,
            bare_pattern: Regex::new(r"(\d+(?:\.\d+)?)\s+(\w+)\s+to\s+(\w+)")?,
        })
    }

    /// Extract (value, from_unit, to_unit) from a conversion query
    fn parse_query(&self, query: &str) -> Result<(f64, String, String)> {
        let lowered = query.trim().to_lowercase();
        let caps = self
            .convert_pattern
            .captures(&lowered)
            .or_else(|| self.bare_pattern.captures(&lowered))
            .ok_or_else(|| {
                DispatchError::Execution(format!("Could not parse conversion query: {}", query))
            })?;

        let value = caps[1]
            .parse::<f64>()
            .map_err(|e| DispatchError::Execution(format!("Invalid number '{}': {}", &caps[1], e)))?;
        Ok((value, caps[2].to_string(), caps[3].to_string()))
    }

    /// Convert between two units
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64> {
        if from == to {
            return Ok(value);
        }
        self.conversions
            .get(&(from.to_string(), to.to_string()))
            .map(|conversion| conversion.apply(value))
            .ok_or_else(|| DispatchError::Execution(format!("Cannot convert {} to {}", from, to)))
    }

    /// Supported units by category
    pub fn supported_units(&self) -> BTreeMap<&'static str, Vec<&'static str>> {
        UNITS_BY_CATEGORY
            .iter()
            .map(|(category, units)| (*category, units.to_vec()))
            .collect()
    }
}

impl Tool for UnitConverterTool {
    fn id(&self) -> ToolId {
        ToolId::UnitConversion
    }

    fn description(&self) -> &'static str {
        "Converts between different units"
    }

    fn execute(&self, args: &ToolArgs) -> Result<String> {
        let query = required_str(args, "query")?;
        let (value, from, to) = self.parse_query(query)?;
        let converted = self.convert(value, &from, &to)?;
        Ok(Number::Float(converted).round_to(2).to_string())
    }
}
