//! In-memory reader.

use super::{AttributeInfo, FieldValue, Reader};
use crate::error::{BpError, Result};
use ndarray::ArrayD;
use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};

/// A dataset assembled in code, readable through the same [`Reader`] seam as
/// a file.
///
/// Names registered with [`MemoryReader::with_unreadable`] are listed but fail
/// every read, which mimics a damaged field in a real output.
#[derive(Debug, Default)]
pub struct MemoryReader {
    source: String,
    attributes: BTreeMap<String, AttributeInfo>,
    variables: BTreeMap<String, FieldValue>,
    unreadable: BTreeSet<String>,
    full_reads: Cell<usize>,
}

impl MemoryReader {
    /// Create an empty dataset with the given display name.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Add an attribute with an explicit declared type.
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        dtype: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.attributes
            .insert(name.into(), AttributeInfo::new(dtype, value.into()));
        self
    }

    /// Add a string attribute.
    pub fn with_string_attribute(self, name: impl Into<String>, value: &str) -> Self {
        self.with_attribute(name, super::STRING_TYPE, value)
    }

    /// Add a floating point variable.
    pub fn with_variable(mut self, name: impl Into<String>, data: ArrayD<f64>) -> Self {
        self.variables.insert(name.into(), FieldValue::Array(data));
        self
    }

    /// Add an integer variable.
    pub fn with_integer_variable(mut self, name: impl Into<String>, data: ArrayD<i128>) -> Self {
        self.variables
            .insert(name.into(), FieldValue::IntegerArray(data));
        self
    }

    /// Make every read of `name` fail while it stays listed.
    pub fn with_unreadable(mut self, name: impl Into<String>) -> Self {
        self.unreadable.insert(name.into());
        self
    }

    /// Number of full-value attribute reads served so far.
    pub fn full_reads(&self) -> usize {
        self.full_reads.get()
    }

    fn check_readable(&self, name: &str) -> Result<()> {
        if self.unreadable.contains(name) {
            Err(BpError::NetCDF(format!("Failed to read {}", name)))
        } else {
            Ok(())
        }
    }
}

impl Reader for MemoryReader {
    fn source(&self) -> &str {
        &self.source
    }

    fn attribute_names(&self) -> Result<Vec<String>> {
        Ok(self.attributes.keys().cloned().collect())
    }

    fn variable_names(&self) -> Result<Vec<String>> {
        Ok(self.variables.keys().cloned().collect())
    }

    fn attribute(&self, name: &str) -> Result<Option<AttributeInfo>> {
        self.check_readable(name)?;
        Ok(self.attributes.get(name).cloned())
    }

    fn read_attribute(&self, name: &str) -> Result<Option<FieldValue>> {
        self.check_readable(name)?;
        self.full_reads.set(self.full_reads.get() + 1);
        Ok(self.attributes.get(name).map(|info| info.value.clone()))
    }

    fn read_variable(&self, name: &str) -> Result<Option<FieldValue>> {
        self.check_readable(name)?;
        Ok(self.variables.get(name).cloned())
    }
}
