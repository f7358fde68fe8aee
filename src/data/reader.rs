//! NetCDF file reader.
//!
//! Groups and variable attributes are flattened into slash-separated names:
//! a global attribute keeps its name, an attribute of variable `temp` becomes
//! `temp/units`, and a variable inside group `diag` becomes `diag/energy`.

use super::variable_data::{numeric_type_name, read_array};
use super::{AttributeInfo, FieldValue, Reader, STRING_TYPE};
use crate::error::Result;
use netcdf::AttributeValue;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Where an attribute is stored in the NetCDF hierarchy.
#[derive(Debug, Clone)]
enum Owner {
    Root,
    Group(String),
    Variable(String),
}

/// Reader over one NetCDF file.
pub struct NetcdfReader {
    source: String,
    file: netcdf::File,
    /// Flat name -> (owner, attribute name within the owner).
    attributes: BTreeMap<String, (Owner, String)>,
    /// Flat name -> declared type of numeric variables.
    variables: BTreeMap<String, &'static str>,
}

impl fmt::Debug for NetcdfReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetcdfReader")
            .field("source", &self.source)
            .field("attributes", &self.attributes.len())
            .field("variables", &self.variables.len())
            .finish()
    }
}

impl NetcdfReader {
    /// Open a NetCDF file and index its attributes and variables.
    pub fn open(path: &Path) -> Result<Self> {
        let file = netcdf::open(path)?;

        let mut attributes = BTreeMap::new();
        let mut variables = BTreeMap::new();

        // Global attributes
        for attr in file.attributes() {
            index_name(
                &mut attributes,
                attr.name().to_string(),
                (Owner::Root, attr.name().to_string()),
            );
        }

        // Variables at root level
        for var in file.variables() {
            Self::index_variable(&var, "", &mut attributes, &mut variables);
        }

        // Groups recursively
        if let Ok(groups) = file.groups() {
            for group in groups {
                Self::index_group(&group, "", &mut attributes, &mut variables);
            }
        }

        tracing::info!(
            "Opened {} ({} attributes, {} variables)",
            path.display(),
            attributes.len(),
            variables.len()
        );

        Ok(Self {
            source: path.display().to_string(),
            file,
            attributes,
            variables,
        })
    }

    fn index_group(
        group: &netcdf::Group<'_>,
        parent_path: &str,
        attributes: &mut BTreeMap<String, (Owner, String)>,
        variables: &mut BTreeMap<String, &'static str>,
    ) {
        let group_path = join(parent_path, &group.name());

        for attr in group.attributes() {
            index_name(
                attributes,
                join(&group_path, attr.name()),
                (Owner::Group(group_path.clone()), attr.name().to_string()),
            );
        }

        for var in group.variables() {
            Self::index_variable(&var, &group_path, attributes, variables);
        }

        for child_group in group.groups() {
            Self::index_group(&child_group, &group_path, attributes, variables);
        }
    }

    fn index_variable(
        var: &netcdf::Variable<'_>,
        parent_path: &str,
        attributes: &mut BTreeMap<String, (Owner, String)>,
        variables: &mut BTreeMap<String, &'static str>,
    ) {
        let var_path = join(parent_path, &var.name());

        for attr in var.attributes() {
            index_name(
                attributes,
                join(&var_path, attr.name()),
                (Owner::Variable(var_path.clone()), attr.name().to_string()),
            );
        }

        match numeric_type_name(&var.vartype()) {
            Some(dtype) => {
                index_name(variables, var_path, dtype);
            }
            None => tracing::debug!("Skipping non-numeric variable {}", var_path),
        }
    }

    fn attribute_value(&self, name: &str) -> Result<Option<AttributeValue>> {
        let Some((owner, attr_name)) = self.attributes.get(name) else {
            return Ok(None);
        };

        let value = match owner {
            Owner::Root => match self.file.attribute(attr_name) {
                Some(attr) => attr.value()?,
                None => return Ok(None),
            },
            Owner::Group(path) => {
                let Some(group) = self.file.group(path)? else {
                    return Ok(None);
                };
                match group.attribute(attr_name) {
                    Some(attr) => attr.value()?,
                    None => return Ok(None),
                }
            }
            Owner::Variable(path) => {
                let Some(var) = self.file.variable(path) else {
                    return Ok(None);
                };
                match var.attribute(attr_name) {
                    Some(attr) => attr.value()?,
                    None => return Ok(None),
                }
            }
        };

        Ok(Some(value))
    }
}

impl Reader for NetcdfReader {
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
        Ok(self.attribute_value(name)?.map(attribute_info))
    }

    fn read_attribute(&self, name: &str) -> Result<Option<FieldValue>> {
        Ok(self.attribute_value(name)?.map(|v| attribute_info(v).value))
    }

    fn read_variable(&self, name: &str) -> Result<Option<FieldValue>> {
        if !self.variables.contains_key(name) {
            return Ok(None);
        }
        match self.file.variable(name) {
            Some(var) => Ok(Some(read_array(&var)?)),
            None => Ok(None),
        }
    }
}

/// Record `name` unless an earlier entry already claimed it. Root-level
/// entries are indexed before group members, so they win.
fn index_name<V: fmt::Debug>(index: &mut BTreeMap<String, V>, name: String, entry: V) -> bool {
    match index.entry(name) {
        Entry::Vacant(slot) => {
            slot.insert(entry);
            true
        }
        Entry::Occupied(slot) => {
            tracing::warn!(
                "Flattened name {} is ambiguous, keeping {:?} and dropping {:?}",
                slot.key(),
                slot.get(),
                entry
            );
            false
        }
    }
}

fn join(parent_path: &str, name: &str) -> String {
    if parent_path.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent_path, name)
    }
}

fn attribute_info(value: AttributeValue) -> AttributeInfo {
    fn scalar(dtype: &str, v: f64) -> AttributeInfo {
        AttributeInfo::new(dtype, FieldValue::Scalar(v))
    }
    fn integer(dtype: &str, v: impl Into<i128>) -> AttributeInfo {
        AttributeInfo::new(dtype, FieldValue::Integer(v.into()))
    }
    fn vector(dtype: &str, v: Vec<f64>) -> AttributeInfo {
        AttributeInfo::new(dtype, FieldValue::vector(v))
    }
    fn integers<T: Into<i128>>(dtype: &str, v: Vec<T>) -> AttributeInfo {
        AttributeInfo::new(
            dtype,
            FieldValue::integers(v.into_iter().map(Into::into).collect()),
        )
    }

    match value {
        AttributeValue::Uchar(v) => integer("uint8", v),
        AttributeValue::Schar(v) => integer("int8", v),
        AttributeValue::Ushort(v) => integer("uint16", v),
        AttributeValue::Short(v) => integer("int16", v),
        AttributeValue::Uint(v) => integer("uint32", v),
        AttributeValue::Int(v) => integer("int32", v),
        AttributeValue::Ulonglong(v) => integer("uint64", v),
        AttributeValue::Longlong(v) => integer("int64", v),
        AttributeValue::Float(v) => scalar("float", f64::from(v)),
        AttributeValue::Double(v) => scalar("double", v),
        AttributeValue::Str(v) => AttributeInfo::new(STRING_TYPE, FieldValue::Str(v)),
        AttributeValue::Uchars(v) => integers("uint8", v),
        AttributeValue::Schars(v) => integers("int8", v),
        AttributeValue::Ushorts(v) => integers("uint16", v),
        AttributeValue::Shorts(v) => integers("int16", v),
        AttributeValue::Uints(v) => integers("uint32", v),
        AttributeValue::Ints(v) => integers("int32", v),
        AttributeValue::Ulonglongs(v) => integers("uint64", v),
        AttributeValue::Longlongs(v) => integers("int64", v),
        AttributeValue::Floats(v) => vector("float", v.into_iter().map(f64::from).collect()),
        AttributeValue::Doubles(v) => vector("double", v),
        AttributeValue::Strs(v) => AttributeInfo::new(STRING_TYPE, FieldValue::StrArray(v)),
    }
}
