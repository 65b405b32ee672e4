use crate::{
    ast::{BinaryOperator, Pos},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Applies a binary operator to two evaluated operands.
///
/// Arithmetic is numeric with Int-to-Float widening; `+` on a string left
/// operand concatenates, coercing the right operand through its display
/// form. Relational operators are numeric-only. Equality compares
/// same-kind scalars, widens mixed numerics, and lets a string compare
/// unequal to any non-string instead of erroring. Arrays and functions
/// support no operators.
///
/// `&&` and `||` require `Bool` operands. Both operands are already
/// evaluated by the time they arrive here, so the right-hand side of a
/// logical expression always runs.
///
/// # Errors
/// `RuntimeError` for unsupported operand kinds, division or modulo by
/// zero, and mismatched-kind equality.
pub fn apply_binary(left: &Value,
                    op: BinaryOperator,
                    right: &Value,
                    pos: Pos)
                    -> EvalResult<Value> {
    match op {
        BinaryOperator::Add if matches!(left, Value::Str(_)) => {
            let Value::Str(prefix) = left else { unreachable!() };
            Ok(Value::Str(format!("{prefix}{right}")))
        },
        BinaryOperator::Add
        | BinaryOperator::Sub
        | BinaryOperator::Mul
        | BinaryOperator::Div
        | BinaryOperator::Mod => arithmetic(left, op, right, pos),
        BinaryOperator::Less
        | BinaryOperator::Greater
        | BinaryOperator::LessEqual
        | BinaryOperator::GreaterEqual => relational(left, op, right, pos),
        BinaryOperator::Equal | BinaryOperator::NotEqual => equality(left, op, right, pos),
        BinaryOperator::And | BinaryOperator::Or => {
            let left = left.as_bool(pos)?;
            let right = right.as_bool(pos)?;
            Ok(Value::Bool(if op == BinaryOperator::And {
                               left && right
                           } else {
                               left || right
                           }))
        },
    }
}

/// Rejects operand kinds that support no operators at all.
fn reject_operatorless(left: &Value,
                       op: BinaryOperator,
                       right: &Value,
                       pos: Pos)
                       -> EvalResult<()> {
    for value in [left, right] {
        if matches!(value, Value::Array(_) | Value::Function(_) | Value::Native(_)) {
            return Err(RuntimeError::UnsupportedOperator { op:        op.to_string(),
                                                           type_name: value.type_name()
                                                                           .to_string(),
                                                           pos });
        }
    }
    Ok(())
}

/// Numeric `+ - * / %`. Integer arithmetic wraps on overflow.
fn arithmetic(left: &Value,
              op: BinaryOperator,
              right: &Value,
              pos: Pos)
              -> EvalResult<Value> {
    reject_operatorless(left, op, right, pos)?;

    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        let result = match op {
            BinaryOperator::Add => a.wrapping_add(*b),
            BinaryOperator::Sub => a.wrapping_sub(*b),
            BinaryOperator::Mul => a.wrapping_mul(*b),
            BinaryOperator::Div => {
                if *b == 0 {
                    return Err(RuntimeError::DivisionByZero { pos });
                }
                a.wrapping_div(*b)
            },
            BinaryOperator::Mod => {
                if *b == 0 {
                    return Err(RuntimeError::ModuloByZero { pos });
                }
                a.wrapping_rem(*b)
            },
            _ => unreachable!("arithmetic only handles '+ - * / %'"),
        };
        return Ok(Value::Int(result));
    }

    if !left.is_numeric() || !right.is_numeric() {
        return Err(RuntimeError::TypeMismatch { details: format!("operator '{op}' requires numeric operands, found {} and {}",
                                                                 left.type_name(),
                                                                 right.type_name()),
                                                pos });
    }

    let a = left.as_float(pos)?;
    let b = right.as_float(pos)?;
    let result = match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero { pos });
            }
            a / b
        },
        BinaryOperator::Mod => {
            if b == 0.0 {
                return Err(RuntimeError::ModuloByZero { pos });
            }
            a % b
        },
        _ => unreachable!("arithmetic only handles '+ - * / %'"),
    };
    Ok(Value::Float(result))
}

/// Numeric `< > <= >=`.
fn relational(left: &Value,
              op: BinaryOperator,
              right: &Value,
              pos: Pos)
              -> EvalResult<Value> {
    reject_operatorless(left, op, right, pos)?;

    if !left.is_numeric() || !right.is_numeric() {
        return Err(RuntimeError::TypeMismatch { details: format!("operator '{op}' requires numeric operands, found {} and {}",
                                                                 left.type_name(),
                                                                 right.type_name()),
                                                pos });
    }

    let result = if let (Value::Int(a), Value::Int(b)) = (left, right) {
        match op {
            BinaryOperator::Less => a < b,
            BinaryOperator::Greater => a > b,
            BinaryOperator::LessEqual => a <= b,
            BinaryOperator::GreaterEqual => a >= b,
            _ => unreachable!("relational only handles '< > <= >='"),
        }
    } else {
        let a = left.as_float(pos)?;
        let b = right.as_float(pos)?;
        match op {
            BinaryOperator::Less => a < b,
            BinaryOperator::Greater => a > b,
            BinaryOperator::LessEqual => a <= b,
            BinaryOperator::GreaterEqual => a >= b,
            _ => unreachable!("relational only handles '< > <= >='"),
        }
    };
    Ok(Value::Bool(result))
}

/// `==` and `!=`.
///
/// A string compared to a non-string is simply unequal. Any other
/// mismatched pairing is a type error, so `1 == true` fails loudly while
/// `"1" == 1` quietly answers `false`.
fn equality(left: &Value,
            op: BinaryOperator,
            right: &Value,
            pos: Pos)
            -> EvalResult<Value> {
    let equal = match (left, right) {
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Str(_), _) | (_, Value::Str(_)) => false,
        (Value::Int(a), Value::Int(b)) => a == b,
        _ if left.is_numeric() && right.is_numeric() => {
            left.as_float(pos)? == right.as_float(pos)?
        },
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Void, Value::Void) => true,
        _ => {
            reject_operatorless(left, op, right, pos)?;
            return Err(RuntimeError::TypeMismatch { details: format!("cannot compare {} and {} with '{op}'",
                                                                     left.type_name(),
                                                                     right.type_name()),
                                                    pos });
        },
    };
    Ok(Value::Bool(if op == BinaryOperator::Equal {
                       equal
                   } else {
                       !equal
                   }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(left: Value, op: BinaryOperator, right: Value) -> EvalResult<Value> {
        apply_binary(&left, op, &right, Pos::default())
    }

    #[test]
    fn mixed_numerics_widen_to_float() {
        assert_eq!(apply(Value::Int(10), BinaryOperator::Add, Value::Float(3.0)).unwrap(),
                   Value::Float(13.0));
        assert_eq!(apply(Value::Int(10), BinaryOperator::Div, Value::Int(3)).unwrap(),
                   Value::Int(3));
    }

    #[test]
    fn division_and_modulo_by_zero_fail() {
        assert!(matches!(apply(Value::Int(1), BinaryOperator::Div, Value::Int(0)),
                         Err(RuntimeError::DivisionByZero { .. })));
        assert!(matches!(apply(Value::Int(1), BinaryOperator::Mod, Value::Int(0)),
                         Err(RuntimeError::ModuloByZero { .. })));
        assert!(matches!(apply(Value::Float(1.0), BinaryOperator::Div, Value::Float(0.0)),
                         Err(RuntimeError::DivisionByZero { .. })));
    }

    #[test]
    fn string_concatenation_coerces_the_right_operand() {
        assert_eq!(apply(Value::from("x: "), BinaryOperator::Add, Value::Int(10)).unwrap(),
                   Value::from("x: 10"));
        assert_eq!(apply(Value::from("y: "), BinaryOperator::Add, Value::Float(20.5)).unwrap(),
                   Value::from("y: 20.5"));
        assert_eq!(apply(Value::from("sum: "), BinaryOperator::Add, Value::Float(13.0)).unwrap(),
                   Value::from("sum: 13.0"));
    }

    #[test]
    fn string_equality_never_errors() {
        assert_eq!(apply(Value::from("1"), BinaryOperator::Equal, Value::Int(1)).unwrap(),
                   Value::Bool(false));
        assert_eq!(apply(Value::from("1"), BinaryOperator::NotEqual, Value::Int(1)).unwrap(),
                   Value::Bool(true));
        assert_eq!(apply(Value::from("a"), BinaryOperator::Equal, Value::from("a")).unwrap(),
                   Value::Bool(true));
    }

    #[test]
    fn mismatched_equality_is_a_type_error() {
        assert!(matches!(apply(Value::Int(1), BinaryOperator::Equal, Value::Bool(true)),
                         Err(RuntimeError::TypeMismatch { .. })));
    }

    #[test]
    fn arrays_support_no_operators() {
        let array = Value::array(vec![], Pos::default()).unwrap();
        assert!(matches!(apply(array, BinaryOperator::Add, Value::Int(1)),
                         Err(RuntimeError::UnsupportedOperator { .. })));
    }

    #[test]
    fn logic_requires_booleans() {
        assert_eq!(apply(Value::Bool(true), BinaryOperator::And, Value::Bool(false)).unwrap(),
                   Value::Bool(false));
        assert!(apply(Value::Int(1), BinaryOperator::And, Value::Bool(true)).is_err());
    }
}
