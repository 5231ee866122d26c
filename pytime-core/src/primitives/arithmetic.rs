// Additive arithmetic: unary -/+ and binary +/-
// Enough to write negative literals, complex literals such as (1+2j), and
// sequence concatenation.
//
// RUST CONCEPT: Numeric promotion
// int op int stays exact (i64 fast path, BigInt on overflow); anything with a
// float becomes float; anything with a complex becomes complex

use num_bigint::BigInt;
#[cfg(feature = "complex_numbers")]
use num_complex::Complex64;
use num_traits::ToPrimitive;

use crate::parser::BinaryOp;
use crate::value::{Result, RuntimeError, Value};

pub fn negate(value: &Value) -> Result<Value> {
    match value {
        Value::Bool(_) | Value::Int(_) => {
            let i = value.to_i64().unwrap_or_default();
            Ok(match i.checked_neg() {
                Some(n) => Value::Int(n),
                None => Value::from_bigint(-BigInt::from(i)),
            })
        }
        Value::BigInt(i) => Ok(Value::from_bigint(-i.clone())),
        Value::Float(x) => Ok(Value::Float(-x)),
        #[cfg(feature = "complex_numbers")]
        Value::Complex(c) => Ok(Value::Complex(-c)),
        other => Err(bad_unary("-", other)),
    }
}

pub fn positive(value: &Value) -> Result<Value> {
    match value {
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Int(_) | Value::BigInt(_) | Value::Float(_) => Ok(value.clone()),
        #[cfg(feature = "complex_numbers")]
        Value::Complex(_) => Ok(value.clone()),
        other => Err(bad_unary("+", other)),
    }
}

pub fn binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    if left.is_int_like() && right.is_int_like() {
        return Ok(integer_op(op, left, right));
    }

    #[cfg(feature = "complex_numbers")]
    if matches!(left, Value::Complex(_)) || matches!(right, Value::Complex(_)) {
        if let (Some(a), Some(b)) = (as_complex(left), as_complex(right)) {
            return Ok(Value::Complex(match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
            }));
        }
    }

    if let (Some(a), Some(b)) = (as_float(left), as_float(right)) {
        return Ok(Value::Float(match op {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
        }));
    }

    if op == BinaryOp::Add {
        match (left, right) {
            (Value::Str(a), Value::Str(b)) => return Ok(Value::str(&format!("{}{}", a, b))),
            (Value::Tuple(a), Value::Tuple(b)) => {
                return Ok(Value::tuple(a.iter().chain(b.iter()).cloned().collect()));
            }
            (Value::List(a), Value::List(b)) => {
                return Ok(Value::list(a.iter().chain(b.iter()).cloned().collect()));
            }
            (Value::Bytes(a), Value::Bytes(b)) => {
                return Ok(Value::Bytes(a.iter().chain(b.iter()).copied().collect()));
            }
            _ => {}
        }
    }

    let symbol = match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
    };
    Err(RuntimeError::TypeMismatch(format!(
        "unsupported operand type(s) for {}: '{}' and '{}'",
        symbol,
        left.type_name(),
        right.type_name()
    )))
}

fn integer_op(op: BinaryOp, left: &Value, right: &Value) -> Value {
    if let (Some(a), Some(b)) = (left.to_i64(), right.to_i64()) {
        let exact = match op {
            BinaryOp::Add => a.checked_add(b),
            BinaryOp::Sub => a.checked_sub(b),
        };
        if let Some(result) = exact {
            return Value::Int(result);
        }
    }
    let a = as_bigint(left);
    let b = as_bigint(right);
    Value::from_bigint(match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
    })
}

fn as_bigint(value: &Value) -> BigInt {
    match value {
        Value::BigInt(i) => i.clone(),
        other => BigInt::from(other.to_i64().unwrap_or_default()),
    }
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Float(x) => Some(*x),
        Value::BigInt(i) => i.to_f64(),
        other => other.to_i64().map(|i| i as f64),
    }
}

#[cfg(feature = "complex_numbers")]
fn as_complex(value: &Value) -> Option<Complex64> {
    match value {
        Value::Complex(c) => Some(*c),
        other => as_float(other).map(|re| Complex64::new(re, 0.0)),
    }
}

fn bad_unary(symbol: &str, value: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch(format!(
        "bad operand type for unary {}: '{}'",
        symbol,
        value.type_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negate() {
        assert!(negate(&Value::Int(1970)).unwrap().py_eq(&Value::Int(-1970)));
        assert!(matches!(negate(&Value::Int(i64::MIN)).unwrap(), Value::BigInt(_)));
        assert!(negate(&Value::Bool(true)).unwrap().py_eq(&Value::Int(-1)));
        assert!(negate(&Value::str("a")).is_err());
    }

    #[test]
    fn test_integer_addition_promotes_on_overflow() {
        let sum = binary(BinaryOp::Add, &Value::Int(i64::MAX), &Value::Int(1)).unwrap();
        assert!(matches!(sum, Value::BigInt(_)));
        let back = binary(BinaryOp::Sub, &sum, &Value::Int(1)).unwrap();
        assert!(matches!(back, Value::Int(i64::MAX)));
    }

    #[test]
    fn test_mixed_numeric() {
        let sum = binary(BinaryOp::Add, &Value::Int(1), &Value::Float(0.5)).unwrap();
        assert!(sum.py_eq(&Value::Float(1.5)));
    }

    #[test]
    #[cfg(feature = "complex_numbers")]
    fn test_complex_literal_arithmetic() {
        let c = binary(BinaryOp::Add, &Value::Int(1), &Value::Complex(Complex64::new(0.0, 2.0))).unwrap();
        assert_eq!(c.repr(), "(1+2j)");
    }

    #[test]
    fn test_concatenation() {
        let joined = binary(BinaryOp::Add, &Value::str("ab"), &Value::str("c")).unwrap();
        assert!(joined.py_eq(&Value::str("abc")));
        let err = binary(BinaryOp::Sub, &Value::str("ab"), &Value::str("c")).unwrap_err();
        assert_eq!(err.message(), "unsupported operand type(s) for -: 'str' and 'str'");
    }
}
