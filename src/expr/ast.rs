//! Expression syntax tree.

use super::Number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    Invert,
}

impl UnaryOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Neg => "USub",
            Self::Pos => "UAdd",
            Self::Invert => "Invert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    LShift,
    RShift,
}

impl BinaryOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Sub => "Sub",
            Self::Mul => "Mult",
            Self::Div => "Div",
            Self::FloorDiv => "FloorDiv",
            Self::Mod => "Mod",
            Self::Pow => "Pow",
            Self::BitAnd => "BitAnd",
            Self::BitOr => "BitOr",
            Self::BitXor => "BitXor",
            Self::LShift => "LShift",
            Self::RShift => "RShift",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
}

/// A parsed expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Number),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Name(String),
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
    },
    Attribute {
        value: Box<Expr>,
        attr: String,
    },
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
}

impl Expr {
    /// Node kind, used in rejection messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "Constant",
            Self::Unary { .. } => "UnaryOp",
            Self::Binary { .. } => "BinOp",
            Self::Name(_) => "Name",
            Self::Call { .. } => "Call",
            Self::Attribute { .. } => "Attribute",
            Self::Compare { .. } => "Compare",
            Self::Assign { .. } => "Assign",
        }
    }
}
