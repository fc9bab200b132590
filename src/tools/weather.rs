//! weather tool - static temperature table

use std::collections::HashMap;

use super::{Tool, optional_str, required_str};
use crate::domain::{ToolArgs, ToolId};
use crate::error::Result;
use crate::expr::Number;

/// Temperature reported for cities missing from the table
pub const DEFAULT_TEMPERATURE: f64 = 20.0;

const CITY_TEMPERATURES: &[(&str, f64)] = &[
    ("paris", 18.0),
    ("london", 17.0),
    ("dhaka", 31.0),
    ("amsterdam", 19.5),
    ("new york", 22.0),
    ("tokyo", 25.0),
    ("berlin", 16.0),
    ("sydney", 20.0),
];

#[derive(Debug, Clone)]
pub struct WeatherTool {
    temperatures: HashMap<String, f64>,
}

impl WeatherTool {
    pub fn new() -> Self {
        Self {
            temperatures: CITY_TEMPERATURES
                .iter()
                .map(|(city, temp)| (city.to_string(), *temp))
                .collect(),
        }
    }

    /// Whether `city` has its own entry in the temperature table
    pub fn is_known_city(city: &str) -> bool {
        let city = city.trim().to_lowercase();
        CITY_TEMPERATURES.iter().any(|(name, _)| *name == city)
    }

    /// Numeric temperature for calculations, falling back to the default
    pub fn temperature_of(&self, city: &str) -> f64 {
        self.temperatures
            .get(&city.trim().to_lowercase())
            .copied()
            .unwrap_or(DEFAULT_TEMPERATURE)
    }
}

impl Default for WeatherTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for WeatherTool {
    fn id(&self) -> ToolId {
        ToolId::WeatherLookup
    }

    fn description(&self) -> &'static str {
        "Provides weather information for cities"
    }

    fn validate_args(&self, args: &ToolArgs) -> Result<()> {
        required_str(args, "city")?;
        optional_str(args, "query")?;
        Ok(())
    }

    fn execute(&self, args: &ToolArgs) -> Result<String> {
        let city = required_str(args, "city")?.trim();
        let reading = format!("{} C", Number::Float(self.temperature_of(city)));

        let wants_summary = optional_str(args, "query")?
            .is_some_and(|query| query.to_lowercase().contains("summarize"));
        if wants_summary {
            return Ok(format!("Weather summary for {}: {}", city, reading));
        }
        Ok(reading)
    }
}
