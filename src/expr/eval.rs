//! Default-deny tree walker.

use super::ast::{BinaryOp, Expr, UnaryOp};
use super::{Number, Reason};

type BinaryFn = fn(Number, Number) -> Result<Number, Reason>;

fn binary_fn(op: BinaryOp) -> Option<BinaryFn> {
    match op {
        BinaryOp::Add => Some(Number::add),
        BinaryOp::Sub => Some(Number::sub),
        BinaryOp::Mul => Some(Number::mul),
        BinaryOp::Div => Some(Number::true_div),
        BinaryOp::Pow => Some(Number::pow),
        BinaryOp::Mod => Some(Number::modulo),
        _ => None,
    }
}

pub fn eval(expr: &Expr) -> Result<Number, Reason> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Binary { op, left, right } => {
            let apply = binary_fn(*op).ok_or(Reason::UnsupportedOperator(op.name()))?;
            let left = eval(left)?;
            let right = eval(right)?;
            apply(left, right)
        }
        Expr::Unary { op: UnaryOp::Neg, operand } => eval(operand)?.neg(),
        Expr::Unary { op, .. } => Err(Reason::UnsupportedUnaryOperator(op.name())),
        Expr::Name(name) => Err(Reason::UnsupportedExpression(format!("Name '{}'", name))),
        other => Err(Reason::UnsupportedExpression(other.kind().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_checked_before_operands() {
        let expr = Expr::Binary {
            op: BinaryOp::BitOr,
            left: Box::new(Expr::Name("secret".into())),
            right: Box::new(Expr::Number(Number::Int(1))),
        };
        assert_eq!(eval(&expr), Err(Reason::UnsupportedOperator("BitOr")));
    }

    #[test]
    fn test_name_rejected_with_identifier() {
        let err = eval(&Expr::Name("zero".into())).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported expression type: Name 'zero'");
    }
}
