//! Variable data reading.

use super::FieldValue;
use crate::error::{BpError, Result};
use ndarray::{ArrayD, IxDyn};
use netcdf::types::{FloatType, IntType, NcVariableType};

/// Short type name for numeric variable types, `None` for anything else.
pub(crate) fn numeric_type_name(vartype: &NcVariableType) -> Option<&'static str> {
    match vartype {
        NcVariableType::Float(FloatType::F64) => Some("double"),
        NcVariableType::Float(FloatType::F32) => Some("float"),
        NcVariableType::Int(IntType::I64) => Some("int64"),
        NcVariableType::Int(IntType::I32) => Some("int32"),
        NcVariableType::Int(IntType::I16) => Some("int16"),
        NcVariableType::Int(IntType::I8) => Some("int8"),
        NcVariableType::Int(IntType::U64) => Some("uint64"),
        NcVariableType::Int(IntType::U32) => Some("uint32"),
        NcVariableType::Int(IntType::U16) => Some("uint16"),
        NcVariableType::Int(IntType::U8) => Some("uint8"),
        _ => None,
    }
}

/// Read a whole variable into an array of its own shape.
///
/// Floating point types are widened to `f64` and integer types to `i128`, so
/// no integer loses precision.
pub(crate) fn read_array(var: &netcdf::Variable<'_>) -> Result<FieldValue> {
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let vartype = var.vartype();

    let floats = |v: Vec<f64>| -> Result<FieldValue> {
        Ok(FieldValue::Array(ArrayD::from_shape_vec(IxDyn(&shape), v)?))
    };
    let integers = |v: Vec<i128>| -> Result<FieldValue> {
        Ok(FieldValue::IntegerArray(ArrayD::from_shape_vec(
            IxDyn(&shape),
            v,
        )?))
    };

    match vartype {
        NcVariableType::Float(FloatType::F64) => {
            let values: Vec<f64> = var.get_values(..)?;
            floats(values)
        }
        NcVariableType::Float(FloatType::F32) => {
            let values: Vec<f32> = var.get_values(..)?;
            floats(values.into_iter().map(f64::from).collect())
        }
        NcVariableType::Int(IntType::I64) => {
            let values: Vec<i64> = var.get_values(..)?;
            integers(values.into_iter().map(i128::from).collect())
        }
        NcVariableType::Int(IntType::I32) => {
            let values: Vec<i32> = var.get_values(..)?;
            integers(values.into_iter().map(i128::from).collect())
        }
        NcVariableType::Int(IntType::I16) => {
            let values: Vec<i16> = var.get_values(..)?;
            integers(values.into_iter().map(i128::from).collect())
        }
        NcVariableType::Int(IntType::I8) => {
            let values: Vec<i8> = var.get_values(..)?;
            integers(values.into_iter().map(i128::from).collect())
        }
        NcVariableType::Int(IntType::U64) => {
            let values: Vec<u64> = var.get_values(..)?;
            integers(values.into_iter().map(i128::from).collect())
        }
        NcVariableType::Int(IntType::U32) => {
            let values: Vec<u32> = var.get_values(..)?;
            integers(values.into_iter().map(i128::from).collect())
        }
        NcVariableType::Int(IntType::U16) => {
            let values: Vec<u16> = var.get_values(..)?;
            integers(values.into_iter().map(i128::from).collect())
        }
        NcVariableType::Int(IntType::U8) => {
            let values: Vec<u8> = var.get_values(..)?;
            integers(values.into_iter().map(i128::from).collect())
        }
        _ => Err(BpError::UnsupportedType {
            name: var.name().to_string(),
            dtype: format!("{:?}", vartype),
        }),
    }
}
