//! Data reading and representation.
//!
//! This module defines the [`Reader`] seam the comparator and dumper consume,
//! the value types they exchange, and two readers: [`NetcdfReader`] for files
//! on disk and [`MemoryReader`] for datasets assembled in code.

mod memory;
mod reader;
mod value;
mod variable_data;

pub use memory::MemoryReader;
pub use reader::NetcdfReader;
pub use value::{AttributeInfo, FieldValue, STRING_TYPE};

use crate::error::Result;

/// Which namespace of an output a field lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Attribute (metadata, may be string-typed).
    Attribute,
    /// Variable (numeric array).
    Variable,
}

impl Role {
    /// Human-readable name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Role::Attribute => "Attribute",
            Role::Variable => "Variable",
        }
    }

    /// Report tag for a field missing from the second output.
    pub fn missing_tag(self) -> &'static str {
        match self {
            Role::Attribute => "NOATT",
            Role::Variable => "NOVAR",
        }
    }

    /// What a mismatch of this role is about.
    pub fn mismatch_kind(self) -> &'static str {
        match self {
            Role::Attribute => "types",
            Role::Variable => "shapes",
        }
    }
}

/// Read-only access to one output.
///
/// Presence is reported through `Option`: `Ok(None)` means the name does not
/// exist, `Err` means the output could not be read. Implementations release
/// their handles on drop.
pub trait Reader {
    /// Name of the output, used in reports.
    fn source(&self) -> &str;

    /// Every attribute name.
    fn attribute_names(&self) -> Result<Vec<String>>;

    /// Every variable name.
    fn variable_names(&self) -> Result<Vec<String>>;

    /// Declared type and value of an attribute (cheap lookup).
    fn attribute(&self, name: &str) -> Result<Option<AttributeInfo>>;

    /// Full-fidelity value of an attribute.
    fn read_attribute(&self, name: &str) -> Result<Option<FieldValue>>;

    /// Full data of a variable, as [`FieldValue::Array`] or
    /// [`FieldValue::IntegerArray`].
    fn read_variable(&self, name: &str) -> Result<Option<FieldValue>>;

    /// Names of the given role.
    fn names(&self, role: Role) -> Result<Vec<String>> {
        match role {
            Role::Attribute => self.attribute_names(),
            Role::Variable => self.variable_names(),
        }
    }
}
