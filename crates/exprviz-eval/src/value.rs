//! Numeric values and their arithmetic.
//!
//! Integer literals evaluate as [`Value::Int`]; `+`, `-` and `*` stay
//! integral when both operands are, promoting to [`Value::Float`] as soon as
//! either operand is a float. Division always promotes to float, even when
//! the operands divide evenly — one explicit rule instead of
//! runtime-dependent behavior.
//!
//! Integer arithmetic is checked: overflow is an error, never a silent wrap.
//! A zero divisor (in either representation) is an error; no IEEE infinities
//! escape the evaluator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A computed numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Float(f64),
}

/// Arithmetic failure, independent of which tree node caused it.
/// The evaluator attaches the node before surfacing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    DivisionByZero,
    IntegerOverflow,
}

impl Value {
    /// This value as an `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Value::Int(n) => n as f64,
            Value::Float(x) => x,
        }
    }

    /// Returns `true` for either representation of zero.
    pub fn is_zero(self) -> bool {
        match self {
            Value::Int(n) => n == 0,
            Value::Float(x) => x == 0.0,
        }
    }

    pub fn add(self, other: Value) -> Result<Value, ArithmeticError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_add(b)
                .map(Value::Int)
                .ok_or(ArithmeticError::IntegerOverflow),
            _ => Ok(Value::Float(self.as_f64() + other.as_f64())),
        }
    }

    pub fn sub(self, other: Value) -> Result<Value, ArithmeticError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_sub(b)
                .map(Value::Int)
                .ok_or(ArithmeticError::IntegerOverflow),
            _ => Ok(Value::Float(self.as_f64() - other.as_f64())),
        }
    }

    pub fn mul(self, other: Value) -> Result<Value, ArithmeticError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_mul(b)
                .map(Value::Int)
                .ok_or(ArithmeticError::IntegerOverflow),
            _ => Ok(Value::Float(self.as_f64() * other.as_f64())),
        }
    }

    /// Division — always a float result.
    pub fn div(self, other: Value) -> Result<Value, ArithmeticError> {
        if other.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(Value::Float(self.as_f64() / other.as_f64()))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
        }
    }
}
