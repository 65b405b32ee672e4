use crate::{
    ast::{Pos, UnaryOperator},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Applies a unary operator to an evaluated operand.
///
/// `+` and `-` require a numeric operand; `!` requires a boolean.
///
/// # Errors
/// `RuntimeError` when the operand kind does not support the operator.
pub fn apply_unary(op: UnaryOperator, value: &Value, pos: Pos) -> EvalResult<Value> {
    if matches!(value, Value::Array(_) | Value::Function(_) | Value::Native(_)) {
        return Err(RuntimeError::UnsupportedOperator { op:        op.to_string(),
                                                       type_name: value.type_name()
                                                                       .to_string(),
                                                       pos });
    }

    match op {
        UnaryOperator::Plus => match value {
            Value::Int(v) => Ok(Value::Int(*v)),
            Value::Float(v) => Ok(Value::Float(*v)),
            other => Err(RuntimeError::TypeMismatch { details: format!("operator '+' requires a numeric operand, found {}",
                                                                       other.type_name()),
                                                      pos }),
        },
        UnaryOperator::Negate => match value {
            Value::Int(v) => Ok(Value::Int(v.wrapping_neg())),
            Value::Float(v) => Ok(Value::Float(-v)),
            other => Err(RuntimeError::TypeMismatch { details: format!("operator '-' requires a numeric operand, found {}",
                                                                       other.type_name()),
                                                      pos }),
        },
        UnaryOperator::Not => match value {
            Value::Bool(v) => Ok(Value::Bool(!v)),
            other => Err(RuntimeError::TypeMismatch { details: format!("operator '!' requires a boolean operand, found {}",
                                                                       other.type_name()),
                                                      pos }),
        },
    }
}
