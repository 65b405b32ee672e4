use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::{LiteralValue, Pos},
    error::RuntimeError,
    interpreter::value::function::{FunctionValue, NativeKind},
};

/// A runtime value.
///
/// Values form a closed tagged union. Arrays are shared through
/// `Rc<RefCell<...>>` so that assigning through one alias is visible
/// through all others (reference semantics), matching how tabular data is
/// passed around.
#[derive(Debug, Clone)]
pub enum Value {
    /// 32-bit signed integer.
    Int(i32),
    /// 32-bit floating point.
    Float(f32),
    /// Boolean.
    Bool(bool),
    /// Character string.
    Str(String),
    /// An array of values sharing one element buffer.
    Array(Rc<RefCell<Vec<Value>>>),
    /// A user-defined function.
    Function(Rc<FunctionValue>),
    /// A native function.
    Native(NativeKind),
    /// The absence of a value.
    Void,
}

impl Value {
    /// Builds an array value from elements, enforcing the shape invariant
    /// at construction time.
    ///
    /// All elements must share the same dimension and the same base element
    /// type: either every element is a scalar of one kind, or every element
    /// is itself an array of equal dimension and base type.
    ///
    /// # Errors
    /// Returns `RuntimeError::DimensionMismatch` when element dimensions
    /// disagree, or `RuntimeError::TypeMismatch` when base types do.
    pub fn array(elements: Vec<Self>, pos: Pos) -> Result<Self, RuntimeError> {
        if let Some(first) = elements.first() {
            let dim = first.dimension();
            let base = first.base_type_name();
            for element in &elements[1..] {
                if element.dimension() != dim {
                    return Err(RuntimeError::DimensionMismatch { details: format!("expected elements of dimension {dim}, found dimension {}",
                                                                                  element.dimension()),
                                                                 pos });
                }
                if element.base_type_name() != base {
                    return Err(RuntimeError::TypeMismatch { details: format!("array elements must all be {base}, found {}",
                                                                             element.base_type_name()),
                                                            pos });
                }
            }
        }
        Ok(Self::Array(Rc::new(RefCell::new(elements))))
    }

    /// The dimension of the value: 0 for scalars, 1 plus the first
    /// element's dimension for arrays.
    #[must_use]
    pub fn dimension(&self) -> usize {
        match self {
            Self::Array(elements) => {
                1 + elements.borrow().first().map_or(0, Self::dimension)
            },
            _ => 0,
        }
    }

    /// The base element type name: for arrays, the type of the innermost
    /// scalar; otherwise the value's own type name.
    #[must_use]
    pub fn base_type_name(&self) -> &'static str {
        match self {
            Self::Array(elements) => {
                elements.borrow().first().map_or("void", Self::base_type_name)
            },
            _ => self.type_name(),
        }
    }

    /// The user-facing name of the value's kind.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Function(_) | Self::Native(_) => "function",
            Self::Void => "void",
        }
    }

    /// Returns `true` for values carrying no payload.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Returns `true` for `Int` and `Float` values.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Truthiness, as used by conditions:
    /// nonzero numbers, `true`, non-empty strings and arrays, and function
    /// values are truthy; `Void` is falsy.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Int(v) => *v != 0,
            Self::Float(v) => *v != 0.0,
            Self::Bool(v) => *v,
            Self::Str(s) => !s.is_empty(),
            Self::Array(elements) => !elements.borrow().is_empty(),
            Self::Function(_) | Self::Native(_) => true,
            Self::Void => false,
        }
    }

    /// Widens the value to a float.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeMismatch` for non-numeric values.
    pub fn as_float(&self, pos: Pos) -> Result<f32, RuntimeError> {
        match self {
            Self::Int(v) => Ok(*v as f32),
            Self::Float(v) => Ok(*v),
            other => Err(RuntimeError::TypeMismatch { details: format!("expected a number, found {}",
                                                                       other.type_name()),
                                                      pos }),
        }
    }

    /// Extracts an integer value.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeMismatch` for non-`Int` values.
    pub fn as_int(&self, pos: Pos) -> Result<i32, RuntimeError> {
        match self {
            Self::Int(v) => Ok(*v),
            other => Err(RuntimeError::TypeMismatch { details: format!("expected an int, found {}",
                                                                       other.type_name()),
                                                      pos }),
        }
    }

    /// Extracts a boolean value.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeMismatch` for non-`Bool` values.
    pub fn as_bool(&self, pos: Pos) -> Result<bool, RuntimeError> {
        match self {
            Self::Bool(v) => Ok(*v),
            other => Err(RuntimeError::TypeMismatch { details: format!("expected a bool, found {}",
                                                                       other.type_name()),
                                                      pos }),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&LiteralValue> for Value {
    fn from(value: &LiteralValue) -> Self {
        match value {
            LiteralValue::Int(v) => Self::Int(*v),
            LiteralValue::Float(v) => Self::Float(*v),
            LiteralValue::Bool(v) => Self::Bool(*v),
            LiteralValue::Str(s) => Self::Str(s.clone()),
        }
    }
}

impl PartialEq for Value {
    /// Structural equality for scalars; identity for arrays and functions.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Native(a), Self::Native(b)) => a == b,
            (Self::Void, Self::Void) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            // Integral floats keep a decimal so 20.0 never prints as 20.
            Self::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{v:.1}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            },
            Self::Function(func) => write!(f, "<function {}>", func.decl.name),
            Self::Native(kind) => write!(f, "<function {}>", kind.name()),
            Self::Void => write!(f, "void"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Value {
        let rows: Vec<Value> =
            rows.iter()
                .map(|row| {
                    Value::array(row.iter().map(|c| Value::from(*c)).collect(), Pos::default())
                        .unwrap()
                })
                .collect();
        Value::array(rows, Pos::default()).unwrap()
    }

    #[test]
    fn truthiness_follows_the_value_kind() {
        assert!(Value::Int(1).truthy());
        assert!(!Value::Int(0).truthy());
        assert!(Value::Float(0.5).truthy());
        assert!(!Value::Float(0.0).truthy());
        assert!(Value::from("x").truthy());
        assert!(!Value::from("").truthy());
        assert!(!Value::Void.truthy());
    }

    #[test]
    fn float_display_keeps_a_decimal() {
        assert_eq!(Value::Float(20.0).to_string(), "20.0");
        assert_eq!(Value::Float(20.5).to_string(), "20.5");
        assert_eq!(Value::Int(20).to_string(), "20");
    }

    #[test]
    fn arrays_validate_dimensions_at_construction() {
        let row = Value::array(vec![Value::from("a")], Pos::default()).unwrap();
        let mixed = Value::array(vec![row, Value::from("b")], Pos::default());
        assert!(matches!(mixed, Err(RuntimeError::DimensionMismatch { .. })));
    }

    #[test]
    fn arrays_validate_base_types_at_construction() {
        let mixed = Value::array(vec![Value::from("a"), Value::Int(1)], Pos::default());
        assert!(matches!(mixed, Err(RuntimeError::TypeMismatch { .. })));
    }

    #[test]
    fn grid_dimension_is_two() {
        let grid = grid(&[&["a", "b"], &["c", "d"]]);
        assert_eq!(grid.dimension(), 2);
        assert_eq!(grid.base_type_name(), "string");
    }

    #[test]
    fn array_equality_is_identity() {
        let a = grid(&[&["x"]]);
        let b = grid(&[&["x"]]);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
