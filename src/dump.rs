//! Listing of every field in one output.

use crate::data::{FieldValue, Reader, Role};
use crate::error::{BpError, Result};
use crate::format::pad_to_width;
use std::collections::BTreeMap;

/// Column width of field names in the listing.
pub const NAME_WIDTH: usize = 32;

/// Companion fields printed ahead of the field they describe.
const ANNOTATIONS: [&str; 2] = ["description", "units"];

/// Read every attribute (declared value) and variable into one map sorted by
/// name.
pub fn collect_fields<R: Reader + ?Sized>(reader: &R) -> Result<BTreeMap<String, FieldValue>> {
    let mut fields = BTreeMap::new();

    for name in reader.attribute_names()? {
        let info = reader
            .attribute(&name)?
            .ok_or_else(|| BpError::field_not_found(Role::Attribute.name(), &name))?;
        fields.insert(name, info.value);
    }

    for name in reader.variable_names()? {
        let data = reader
            .read_variable(&name)?
            .ok_or_else(|| BpError::field_not_found(Role::Variable.name(), &name))?;
        fields.insert(name, data);
    }

    tracing::info!("Collected {} fields from {}", fields.len(), reader.source());
    Ok(fields)
}

/// Render the listing.
///
/// Fields whose name mentions `description` or `units` are not listed on
/// their own; `<name>/description` and `<name>/units` are printed right above
/// `<name>` instead. Each entry ends with a blank line.
pub fn render_dump(fields: &BTreeMap<String, FieldValue>) -> Vec<String> {
    let mut lines = Vec::new();

    for (name, value) in fields {
        if ANNOTATIONS.iter().any(|a| name.contains(a)) {
            continue;
        }

        for annotation in ANNOTATIONS {
            let key = format!("{}/{}", name, annotation);
            if let Some(note) = fields.get(&key) {
                lines.push(entry(&key, note));
            }
        }

        lines.push(entry(name, value));
        lines.push(String::new());
    }

    lines
}

fn entry(name: &str, value: &FieldValue) -> String {
    format!("{}{}", pad_to_width(name, NAME_WIDTH), value)
}
