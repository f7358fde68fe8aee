//! Field values as seen by the comparator and the dumper.

use ndarray::{Array1, ArrayD};
use std::fmt;

/// Declared type tag shared by every string-typed attribute.
pub const STRING_TYPE: &str = "string";

/// The value of an attribute or variable.
///
/// Floating point data is widened to `f64`. Integer data is widened to `i128`
/// instead, which holds every `i64` and `u64` exactly.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A single string.
    Str(String),
    /// A list of strings.
    StrArray(Vec<String>),
    /// A single floating point number.
    Scalar(f64),
    /// A single integer.
    Integer(i128),
    /// A floating point array of any dimensionality.
    Array(ArrayD<f64>),
    /// An integer array of any dimensionality.
    IntegerArray(ArrayD<i128>),
}

impl FieldValue {
    /// Build a one-dimensional array value.
    pub fn vector(values: Vec<f64>) -> Self {
        Self::Array(Array1::from(values).into_dyn())
    }

    /// Build a one-dimensional integer array value.
    pub fn integers(values: Vec<i128>) -> Self {
        Self::IntegerArray(Array1::from(values).into_dyn())
    }

    /// Check if this value is string-typed.
    pub fn is_string(&self) -> bool {
        matches!(self, Self::Str(_) | Self::StrArray(_))
    }

    /// Shape of numeric arrays.
    pub fn shape(&self) -> Option<&[usize]> {
        match self {
            Self::Array(data) => Some(data.shape()),
            Self::IntegerArray(data) => Some(data.shape()),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::StrArray(v) => write!(f, "{:?}", v),
            Self::Scalar(v) => write!(f, "{}", v),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Array(data) => write!(f, "{}", data),
            Self::IntegerArray(data) => write!(f, "{}", data),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<ArrayD<f64>> for FieldValue {
    fn from(data: ArrayD<f64>) -> Self {
        Self::Array(data)
    }
}

/// Declared (cheap) view of an attribute: its type tag and value.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeInfo {
    /// Declared type, e.g. `"string"`, `"double"`, `"int32"`.
    pub dtype: String,
    /// Declared value.
    pub value: FieldValue,
}

impl AttributeInfo {
    /// Create a new attribute info.
    pub fn new(dtype: impl Into<String>, value: FieldValue) -> Self {
        Self {
            dtype: dtype.into(),
            value,
        }
    }

    /// Check if the declared type is string.
    pub fn is_string(&self) -> bool {
        self.dtype == STRING_TYPE
    }
}
