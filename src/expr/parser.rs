//! Recursive-descent parser with Python operator precedence.
//!
//! Lowest to highest: assignment, comparison, `|`, `^`, `&`, shifts,
//! `+ -`, `* / // %`, unary `- + ~`, `**` (right-associative), then calls
//! and attribute access on atoms.

use super::ast::{BinaryOp, CompareOp, Expr, UnaryOp};
use super::lexer::Token;
use super::Reason;

const MAX_DEPTH: usize = 64;

/// Flat operator chains build one tree level per operator, so the token
/// count bounds tree height for evaluation and drop
const MAX_TOKENS: usize = 512;

type Level = fn(&mut Parser) -> Result<Expr, Reason>;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    pub fn parse(mut self) -> Result<Expr, Reason> {
        if self.tokens.len() > MAX_TOKENS {
            return Err(Reason::TooLong(self.tokens.len()));
        }
        let expr = self.statement()?;
        match self.peek() {
            Some(token) => Err(Reason::UnexpectedToken(token.text())),
            None => Ok(expr),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), Reason> {
        match self.advance() {
            Some(ref token) if token == expected => Ok(()),
            Some(token) => Err(Reason::UnexpectedToken(token.text())),
            None => Err(Reason::UnexpectedEnd),
        }
    }

    fn enter(&mut self) -> Result<(), Reason> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Reason::TooDeep);
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn statement(&mut self) -> Result<Expr, Reason> {
        let target = self.comparison()?;
        if self.eat(&Token::Assign) {
            let value = self.statement()?;
            return Ok(Expr::Assign {
                target: Box::new(target),
                value: Box::new(value),
            });
        }
        Ok(target)
    }

    fn comparison(&mut self) -> Result<Expr, Reason> {
        let mut left = self.bit_or()?;
        loop {
            let op = match self.peek() {
                Some(Token::EqEq) => CompareOp::Eq,
                Some(Token::NotEq) => CompareOp::NotEq,
                Some(Token::Lt) => CompareOp::Lt,
                Some(Token::Le) => CompareOp::LtE,
                Some(Token::Gt) => CompareOp::Gt,
                Some(Token::Ge) => CompareOp::GtE,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.bit_or()?;
            left = Expr::Compare {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    /// One left-associative binary precedence level
    fn binary_level(&mut self, next: Level, ops: &[(Token, BinaryOp)]) -> Result<Expr, Reason> {
        let mut left = next(self)?;
        'outer: loop {
            for (token, op) in ops {
                if self.eat(token) {
                    let right = next(self)?;
                    left = Expr::Binary {
                        op: *op,
                        left: Box::new(left),
                        right: Box::new(right),
                    };
                    continue 'outer;
                }
            }
            return Ok(left);
        }
    }

    fn bit_or(&mut self) -> Result<Expr, Reason> {
        self.binary_level(Self::bit_xor, &[(Token::Pipe, BinaryOp::BitOr)])
    }

    fn bit_xor(&mut self) -> Result<Expr, Reason> {
        self.binary_level(Self::bit_and, &[(Token::Caret, BinaryOp::BitXor)])
    }

    fn bit_and(&mut self) -> Result<Expr, Reason> {
        self.binary_level(Self::shift, &[(Token::Amp, BinaryOp::BitAnd)])
    }

    fn shift(&mut self) -> Result<Expr, Reason> {
        self.binary_level(
            Self::arith,
            &[(Token::Shl, BinaryOp::LShift), (Token::Shr, BinaryOp::RShift)],
        )
    }

    fn arith(&mut self) -> Result<Expr, Reason> {
        self.binary_level(
            Self::term,
            &[(Token::Plus, BinaryOp::Add), (Token::Minus, BinaryOp::Sub)],
        )
    }

    fn term(&mut self) -> Result<Expr, Reason> {
        self.binary_level(
            Self::factor,
            &[
                (Token::Star, BinaryOp::Mul),
                (Token::Slash, BinaryOp::Div),
                (Token::DoubleSlash, BinaryOp::FloorDiv),
                (Token::Percent, BinaryOp::Mod),
            ],
        )
    }

    fn factor(&mut self) -> Result<Expr, Reason> {
        let op = match self.peek() {
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Plus) => UnaryOp::Pos,
            Some(Token::Tilde) => UnaryOp::Invert,
            _ => return self.power(),
        };
        self.pos += 1;
        self.enter()?;
        let operand = self.factor()?;
        self.leave();
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn power(&mut self) -> Result<Expr, Reason> {
        let base = self.postfix()?;
        if self.eat(&Token::DoubleStar) {
            self.enter()?;
            let exponent = self.factor()?;
            self.leave();
            return Ok(Expr::Binary {
                op: BinaryOp::Pow,
                left: Box::new(base),
                right: Box::new(exponent),
            });
        }
        Ok(base)
    }

    fn postfix(&mut self) -> Result<Expr, Reason> {
        let mut expr = self.atom()?;
        loop {
            if self.eat(&Token::LParen) {
                let args = self.call_args()?;
                expr = Expr::Call {
                    func: Box::new(expr),
                    args,
                };
            } else if self.eat(&Token::Dot) {
                match self.advance() {
                    Some(Token::Ident(attr)) => {
                        expr = Expr::Attribute {
                            value: Box::new(expr),
                            attr,
                        };
                    }
                    Some(token) => return Err(Reason::UnexpectedToken(token.text())),
                    None => return Err(Reason::UnexpectedEnd),
                }
            } else {
                return Ok(expr);
            }
        }
    }

    fn call_args(&mut self) -> Result<Vec<Expr>, Reason> {
        let mut args = Vec::new();
        if self.eat(&Token::RParen) {
            return Ok(args);
        }
        self.enter()?;
        loop {
            args.push(self.comparison()?);
            if self.eat(&Token::Comma) {
                continue;
            }
            self.expect(&Token::RParen)?;
            break;
        }
        self.leave();
        Ok(args)
    }

    fn atom(&mut self) -> Result<Expr, Reason> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Ident(name)) => Ok(Expr::Name(name)),
            Some(Token::LParen) => {
                self.enter()?;
                let inner = self.comparison()?;
                self.expect(&Token::RParen)?;
                self.leave();
                Ok(inner)
            }
            Some(token) => Err(Reason::UnexpectedToken(token.text())),
            None => Err(Reason::UnexpectedEnd),
        }
    }
}
