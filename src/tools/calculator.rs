//! calculator tool - rewrites everyday phrasing into an expression and evaluates it

use regex::Regex;

use super::{Tool, required_str};
use crate::domain::{ToolArgs, ToolId};
use crate::error::{DispatchError, Result};
use crate::expr;

#[derive(Debug, Clone)]
pub struct CalculatorTool {
    lead_in: Regex,
    percentage: Regex,
    add_to: Regex,
    average: Regex,
    number: Regex,
}

impl CalculatorTool {
    pub fn new() -> Result<Self> {
        Ok(Self {
            lead_in: Regex::new(r"^what\s+is\s+")?,
            percentage: Regex::new(r"(\d+(?:\.\d+)?)%\s+of\s+(\d+(?:\.\d+)?)")?,
            add_to: Regex::new(r"add\s+(\d+(?:\.\d+)?)\s+to\s+(.+)")?,
            average: Regex::new(r"average\s+(?:of\s+)?(.+)")?,
            number: Regex::new(r"\d+(?:\.\d+)?")?,
        })
    }

    /// Turn a natural-language question into an arithmetic expression
    pub fn preprocess(&self, expr: &str) -> String {
        let lowered = expr.trim().to_lowercase();
        let stripped = self.lead_in.replace(&lowered, "");
        let cleaned = stripped.trim().trim_end_matches(['?', '!', '.']).trim();

        if cleaned.contains("% of") {
            if let Some(caps) = self.percentage.captures(cleaned) {
                return format!("({} / 100) * {}", &caps[1], &caps[2]);
            }
            return cleaned.to_string();
        }

        if let Some(caps) = self.add_to.captures(cleaned) {
            let rest = &caps[2];
            let rest = if rest.contains("average") {
                self.average_of(rest).unwrap_or_else(|| rest.to_string())
            } else {
                rest.to_string()
            };
            return format!("{} + ({})", &caps[1], rest);
        }

        if cleaned.contains("average") {
            if let Some(average) = self.average_of(cleaned) {
                return average;
            }
        }

        cleaned
            .replace("plus", "+")
            .replace("minus", "-")
            .replace("times", "*")
            .replace("divided by", "/")
            .trim()
            .to_string()
    }

    /// `average of 2, 4 and 6` becomes `(2 + 4 + 6) / 3`
    fn average_of(&self, text: &str) -> Option<String> {
        let caps = self.average.captures(text)?;
        let numbers: Vec<&str> = self.number.find_iter(&caps[1]).map(|m| m.as_str()).collect();
        if numbers.len() < 2 {
            return None;
        }
        Some(format!("({}) / {}", numbers.join(" + "), numbers.len()))
    }
}

impl Tool for CalculatorTool {
    fn id(&self) -> ToolId {
        ToolId::Arithmetic
    }

    fn description(&self) -> &'static str {
        "Performs mathematical calculations"
    }

    fn execute(&self, args: &ToolArgs) -> Result<String> {
        let expression = self.preprocess(required_str(args, "expr")?);
        expr::evaluate(&expression)
            .map(|value| value.to_string())
            .map_err(|e| DispatchError::Execution(format!("Calculation failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::string_args;

    fn calc(expr: &str) -> Result<String> {
        CalculatorTool::new().unwrap().run(&string_args([("expr", expr)]))
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(calc("2 + 2").unwrap(), "4");
        assert_eq!(calc("10 - 3").unwrap(), "7");
        assert_eq!(calc("4 * 5").unwrap(), "20");
        assert_eq!(calc("15 / 3").unwrap(), "5.0");
    }

    #[test]
    fn test_percentage_calculation() {
        assert_eq!(calc("What is 12.5% of 243?").unwrap(), "30.375");
        assert_eq!(calc("25% of 100").unwrap(), "25.0");
        assert_eq!(calc("50% of 200").unwrap(), "100.0");
    }

    #[test]
    fn test_complex_expressions() {
        assert_eq!(calc("(10 + 5) * 2").unwrap(), "30");
        assert_eq!(calc("100 / (5 + 5)").unwrap(), "10.0");
    }

    #[test]
    fn test_word_operators() {
        assert_eq!(calc("What is 6 times 7?").unwrap(), "42");
        assert_eq!(calc("9 minus 4").unwrap(), "5");
        assert_eq!(calc("what is 9 divided by 3").unwrap(), "3.0");
    }

    #[test]
    fn test_add_to_phrase() {
        assert_eq!(calc("Add 10 to 5").unwrap(), "15");
        assert_eq!(calc("Add 10 to the average of 4 and 6").unwrap(), "15.0");
    }

    #[test]
    fn test_average_phrase() {
        assert_eq!(calc("What is the average of 2, 4 and 9?").unwrap(), "5.0");
    }

    #[test]
    fn test_preprocess() {
        let calculator = CalculatorTool::new().unwrap();
        assert_eq!(calculator.preprocess("What is 12.5% of 243?"), "(12.5 / 100) * 243");
        assert_eq!(calculator.preprocess("add 3 to 4"), "3 + (4)");
        assert_eq!(calculator.preprocess("2 plus 2"), "2 + 2");
    }

    #[test]
    fn test_invalid_expression() {
        let err = calc("What is 10 divided by zero?").unwrap_err();
        assert!(matches!(err, DispatchError::Execution(_)));
        assert!(err.to_string().contains("Calculation failed"));
    }

    #[test]
    fn test_division_by_zero() {
        let err = calc("5 / 0").unwrap_err();
        assert!(err.to_string().contains("division by zero"));
    }

    #[test]
    fn test_validation_error() {
        let err = CalculatorTool::new().unwrap().run(&ToolArgs::new()).unwrap_err();
        assert!(matches!(err, DispatchError::Argument(_)));
    }
}
