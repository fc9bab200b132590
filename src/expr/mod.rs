//! Restricted arithmetic expression evaluator
//!
//! Expressions are lexed and parsed into a syntax tree, then walked with a
//! fixed operator whitelist: `+ - * / % **` and unary `-` over numeric
//! literals and parentheses. The parser recognizes a wider grammar (names,
//! calls, attribute access, comparisons, bitwise and shift operators,
//! assignment) so those constructs surface as tree nodes the evaluator
//! rejects by name. There is no path from an expression to executing code.

mod ast;
mod eval;
mod lexer;
mod number;
mod parser;

pub use ast::{BinaryOp, CompareOp, Expr, UnaryOp};
pub use number::Number;

use thiserror::Error;

/// Why an expression was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Reason {
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),

    #[error("malformed number '{0}'")]
    MalformedNumber(String),

    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("expression is nested too deeply")]
    TooDeep,

    #[error("expression is too long ({0} tokens)")]
    TooLong(usize),

    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(&'static str),

    #[error("Unsupported unary operator: {0}")]
    UnsupportedUnaryOperator(&'static str),

    #[error("Unsupported expression type: {0}")]
    UnsupportedExpression(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("zero cannot be raised to a negative power")]
    ZeroToNegativePower,

    #[error("numeric overflow")]
    Overflow,

    #[error("result is not a real number")]
    NotReal,
}

/// An expression that is malformed or uses something outside the whitelist
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid expression '{expression}': {reason}")]
pub struct InvalidExpressionError {
    pub expression: String,
    pub reason: Reason,
}

/// Parse an expression into its syntax tree without evaluating it
pub fn parse(expression: &str) -> Result<Expr, InvalidExpressionError> {
    let wrap = |reason| InvalidExpressionError {
        expression: expression.to_string(),
        reason,
    };
    let tokens = lexer::tokenize(expression.trim()).map_err(wrap)?;
    parser::Parser::new(tokens).parse().map_err(wrap)
}

/// Evaluate an arithmetic expression
pub fn evaluate(expression: &str) -> Result<Number, InvalidExpressionError> {
    let tree = parse(expression)?;
    eval::eval(&tree).map_err(|reason| InvalidExpressionError {
        expression: expression.to_string(),
        reason,
    })
}
