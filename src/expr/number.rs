//! Numeric values and the whitelisted operations on them.
//!
//! Integer operands stay integers for `+ - * **` until the result leaves
//! i64 range, where it is computed as a float instead. `/` always produces
//! a float and `%` takes the sign of the divisor. Float results that are
//! NaN or infinite are errors.

use std::fmt;

use super::Reason;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Float(x) => x,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Self::Int(n) => n == 0,
            Self::Float(x) => x == 0.0,
        }
    }

    pub fn add(self, rhs: Self) -> Result<Self, Reason> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => a
                .checked_add(b)
                .map_or_else(|| finite(a as f64 + b as f64), |n| Ok(Self::Int(n))),
            (a, b) => finite(a.as_f64() + b.as_f64()),
        }
    }

    pub fn sub(self, rhs: Self) -> Result<Self, Reason> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => a
                .checked_sub(b)
                .map_or_else(|| finite(a as f64 - b as f64), |n| Ok(Self::Int(n))),
            (a, b) => finite(a.as_f64() - b.as_f64()),
        }
    }

    pub fn mul(self, rhs: Self) -> Result<Self, Reason> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => a
                .checked_mul(b)
                .map_or_else(|| finite(a as f64 * b as f64), |n| Ok(Self::Int(n))),
            (a, b) => finite(a.as_f64() * b.as_f64()),
        }
    }

    pub fn true_div(self, rhs: Self) -> Result<Self, Reason> {
        if rhs.is_zero() {
            return Err(Reason::DivisionByZero);
        }
        finite(self.as_f64() / rhs.as_f64())
    }

    pub fn modulo(self, rhs: Self) -> Result<Self, Reason> {
        if rhs.is_zero() {
            return Err(Reason::ModuloByZero);
        }
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => {
                // only i64::MIN % -1 overflows, and its remainder is zero
                let r = a.checked_rem(b).unwrap_or(0);
                if r != 0 && (r < 0) != (b < 0) {
                    Ok(Self::Int(r + b))
                } else {
                    Ok(Self::Int(r))
                }
            }
            (a, b) => {
                let (a, b) = (a.as_f64(), b.as_f64());
                let r = a % b;
                if r != 0.0 && (r < 0.0) != (b < 0.0) {
                    finite(r + b)
                } else {
                    finite(r)
                }
            }
        }
    }

    pub fn pow(self, rhs: Self) -> Result<Self, Reason> {
        if self.is_zero() && rhs.as_f64() < 0.0 {
            return Err(Reason::ZeroToNegativePower);
        }
        match (self, rhs) {
            (Self::Int(base), Self::Int(exp)) if exp >= 0 => u32::try_from(exp)
                .ok()
                .and_then(|e| base.checked_pow(e))
                .map_or_else(|| finite((base as f64).powf(exp as f64)), |n| Ok(Self::Int(n))),
            (base, exp) => finite(base.as_f64().powf(exp.as_f64())),
        }
    }

    pub fn neg(self) -> Result<Self, Reason> {
        match self {
            Self::Int(n) => Ok(n.checked_neg().map_or(Self::Float(-(n as f64)), Self::Int)),
            Self::Float(x) => Ok(Self::Float(-x)),
        }
    }

    /// Round to `places` decimals, yielding a float
    pub fn round_to(self, places: i32) -> Self {
        let factor = 10f64.powi(places);
        Self::Float((self.as_f64() * factor).round() / factor)
    }
}

fn finite(x: f64) -> Result<Number, Reason> {
    if x.is_nan() {
        Err(Reason::NotReal)
    } else if x.is_infinite() {
        Err(Reason::Overflow)
    } else {
        Ok(Number::Float(x))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(x) => {
                let magnitude = x.abs();
                if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
                    write_scientific(f, *x)
                } else if x.fract() == 0.0 {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
        }
    }
}

/// `1e16` as `1e+16`, `0.00001` as `1e-05`
fn write_scientific(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    let formatted = format!("{:e}", x);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => write!(f, "{}", formatted),
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}
