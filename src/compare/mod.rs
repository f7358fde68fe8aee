//! Field-by-field comparison of two outputs.
//!
//! The comparison is driven by the first output: every attribute and
//! variable it lists (minus the ignored ones) is looked up in the second
//! output and classified. Fields only the second output has are never
//! visited.

mod values;

pub use values::{
    compare_arrays, compare_integer_arrays, compare_integers, compare_scalars, compare_values,
};

use crate::config::CompareOptions;
use crate::data::{FieldValue, Reader, Role};
use crate::error::{BpError, Result};
use std::collections::HashSet;

/// How two values differ.
#[derive(Debug, Clone, PartialEq)]
pub enum Difference {
    /// Numeric difference; the largest absolute element difference.
    Magnitude(f64),
    /// Strings that are not equal.
    Text {
        /// Value in the first output.
        left: String,
        /// Value in the second output.
        right: String,
    },
}

/// Classification of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Equal (within tolerance for arrays).
    Match,
    /// Same kind and shape, different values.
    ValueDifference(Difference),
    /// Incompatible kinds or array shapes.
    ShapeOrTypeMismatch {
        /// Description of the first output's value.
        left: String,
        /// Description of the second output's value.
        right: String,
    },
    /// Listed in the first output but absent or unreadable in the second.
    MissingInOther,
}

impl Outcome {
    /// Check if the field matched.
    pub fn is_match(&self) -> bool {
        matches!(self, Outcome::Match)
    }
}

/// Outcome of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReport {
    /// Attribute or variable.
    pub role: Role,
    /// Field name.
    pub name: String,
    /// What the comparison found.
    pub outcome: Outcome,
}

/// Result of comparing two outputs.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Name of the first output.
    pub first: String,
    /// Name of the second output.
    pub second: String,
    /// Every visited field, attributes first, in enumeration order.
    pub reports: Vec<FieldReport>,
    /// Number of reports that are not a match.
    pub differences: usize,
}

impl Comparison {
    fn new(first: &str, second: &str) -> Self {
        Self {
            first: first.to_string(),
            second: second.to_string(),
            reports: Vec::new(),
            differences: 0,
        }
    }

    fn record(&mut self, role: Role, name: String, outcome: Outcome) {
        tracing::debug!("{} {}: {:?}", role.name(), name, outcome);
        if !outcome.is_match() {
            self.differences += 1;
        }
        self.reports.push(FieldReport {
            role,
            name,
            outcome,
        });
    }

    /// Check if no differences were found.
    pub fn is_identical(&self) -> bool {
        self.differences == 0
    }

    /// Find the report of a field.
    pub fn report(&self, role: Role, name: &str) -> Option<&FieldReport> {
        self.reports
            .iter()
            .find(|r| r.role == role && r.name == name)
    }
}

/// Names of `role` in `reader`, without the ignored ones.
pub fn field_names<R: Reader + ?Sized>(
    reader: &R,
    role: Role,
    ignore: &[String],
) -> Result<Vec<String>> {
    Ok(reader
        .names(role)?
        .into_iter()
        .filter(|name| !ignore.contains(name))
        .collect())
}

/// Compare every attribute and variable of `first` against `second`.
pub fn compare_files<A, B>(first: &A, second: &B, options: &CompareOptions) -> Result<Comparison>
where
    A: Reader + ?Sized,
    B: Reader + ?Sized,
{
    let mut comparison = Comparison::new(first.source(), second.source());

    compare_attributes(first, second, options, &mut comparison)?;
    compare_variables(first, second, options, &mut comparison)?;

    tracing::info!(
        "Compared {} fields, {} differences",
        comparison.reports.len(),
        comparison.differences
    );
    Ok(comparison)
}

fn compare_attributes<A, B>(
    first: &A,
    second: &B,
    options: &CompareOptions,
    comparison: &mut Comparison,
) -> Result<()>
where
    A: Reader + ?Sized,
    B: Reader + ?Sized,
{
    let role = Role::Attribute;
    let present: HashSet<String> = second.attribute_names()?.into_iter().collect();

    for name in field_names(first, role, &options.ignore_attributes)? {
        let info1 = first
            .attribute(&name)?
            .ok_or_else(|| BpError::field_not_found(role.name(), &name))?;

        let listed = present.contains(&name);
        let Some(info2) = lookup_second(listed, role, &name, || second.attribute(&name)) else {
            comparison.record(role, name, Outcome::MissingInOther);
            continue;
        };

        let outcome = if info1.is_string() {
            values::compare_text(&info1.value, &info2.value)
        } else {
            // Only non-string attributes pay for a full read.
            let v1 = first
                .read_attribute(&name)?
                .ok_or_else(|| BpError::field_not_found(role.name(), &name))?;
            match lookup_second(listed, role, &name, || second.read_attribute(&name)) {
                Some(v2) => with_values(compare_values(&v1, &v2, &options.tolerance), &v1, &v2),
                None => Outcome::MissingInOther,
            }
        };

        comparison.record(role, name, outcome);
    }

    Ok(())
}

fn compare_variables<A, B>(
    first: &A,
    second: &B,
    options: &CompareOptions,
    comparison: &mut Comparison,
) -> Result<()>
where
    A: Reader + ?Sized,
    B: Reader + ?Sized,
{
    let role = Role::Variable;
    let present: HashSet<String> = second.variable_names()?.into_iter().collect();

    for name in field_names(first, role, &options.ignore_variables)? {
        let v1 = first
            .read_variable(&name)?
            .ok_or_else(|| BpError::field_not_found(role.name(), &name))?;

        let listed = present.contains(&name);
        let outcome = match lookup_second(listed, role, &name, || second.read_variable(&name)) {
            Some(v2) => compare_values(&v1, &v2, &options.tolerance),
            None => Outcome::MissingInOther,
        };

        comparison.record(role, name, outcome);
    }

    Ok(())
}

/// Look a field up in the second output. A read failure counts as absent.
fn lookup_second<T>(
    listed: bool,
    role: Role,
    name: &str,
    read: impl FnOnce() -> Result<Option<T>>,
) -> Option<T> {
    if !listed {
        return None;
    }
    match read() {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(
                "Failed to read {} {} from second output: {}",
                role.name(),
                name,
                err
            );
            None
        }
    }
}

/// Attribute mismatches show the conflicting values rather than shapes.
fn with_values(outcome: Outcome, v1: &FieldValue, v2: &FieldValue) -> Outcome {
    match outcome {
        Outcome::ShapeOrTypeMismatch { .. } => Outcome::ShapeOrTypeMismatch {
            left: v1.to_string(),
            right: v2.to_string(),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tolerance;
    use crate::data::MemoryReader;
    use ndarray::{arr1, arr2};

    fn options(relative: f64, absolute: f64) -> CompareOptions {
        CompareOptions {
            tolerance: Tolerance::new(relative, absolute).unwrap(),
            ..CompareOptions::default()
        }
    }

    fn file_a() -> MemoryReader {
        MemoryReader::new("a.nc")
            .with_string_attribute("version", "1.0")
            .with_variable("temp", arr1(&[1.0, 2.0, 3.0]).into_dyn())
    }

    fn file_b() -> MemoryReader {
        MemoryReader::new("b.nc")
            .with_string_attribute("version", "1.0")
            .with_variable("temp", arr1(&[1.0, 2.0, 3.0001]).into_dyn())
    }

    #[test]
    fn end_to_end_example() {
        let strict = compare_files(&file_a(), &file_b(), &options(0.0, 0.0)).unwrap();
        assert_eq!(strict.differences, 1);
        assert!(!strict.is_identical());
        assert!(matches!(
            strict.report(Role::Variable, "temp").unwrap().outcome,
            Outcome::ValueDifference(Difference::Magnitude(_))
        ));
        assert!(strict
            .report(Role::Attribute, "version")
            .unwrap()
            .outcome
            .is_match());

        let loose = compare_files(&file_a(), &file_b(), &options(0.0, 0.001)).unwrap();
        assert_eq!(loose.differences, 0);
        assert!(loose.is_identical());
    }

    #[test]
    fn identical_outputs_have_no_differences() {
        let reader = file_a()
            .with_attribute("dt", "double", 0.5)
            .with_attribute("dims", "int32", FieldValue::vector(vec![4.0, 4.0]))
            .with_variable("grid", arr2(&[[1.0, f64::NAN], [3.0, 4.0]]).into_dyn());
        for (r, a) in [(0.0, 0.0), (1e-6, 0.0), (0.0, 1.0)] {
            let comparison = compare_files(&reader, &reader, &options(r, a)).unwrap();
            assert_eq!(comparison.differences, 0);
            assert_eq!(comparison.reports.len(), 5);
        }
    }

    #[test]
    fn missing_variable_is_reported_once() {
        let a = file_a().with_variable("pressure", arr1(&[101.3]).into_dyn());
        let comparison = compare_files(&a, &file_a(), &options(0.0, 0.0)).unwrap();
        assert_eq!(comparison.differences, 1);
        assert_eq!(
            comparison.report(Role::Variable, "pressure").unwrap().outcome,
            Outcome::MissingInOther
        );
    }

    #[test]
    fn fields_only_in_second_output_are_not_visited() {
        let b = file_a()
            .with_string_attribute("extra", "x")
            .with_variable("pressure", arr1(&[101.3]).into_dyn());
        let comparison = compare_files(&file_a(), &b, &options(0.0, 0.0)).unwrap();
        assert_eq!(comparison.differences, 0);
        assert!(comparison.report(Role::Variable, "pressure").is_none());
        assert!(comparison.report(Role::Attribute, "extra").is_none());
    }

    #[test]
    fn ignored_fields_are_never_visited() {
        let a = file_a().with_attribute("time", "double", 1.0);
        let b = file_b().with_attribute("time", "double", 2.0);
        let mut opts = options(0.0, 0.0);
        opts.ignore_attributes.push("time".to_string());
        opts.ignore_variables.push("temp".to_string());

        let comparison = compare_files(&a, &b, &opts).unwrap();
        assert_eq!(comparison.differences, 0);
        assert!(comparison.report(Role::Attribute, "time").is_none());
        assert!(comparison.report(Role::Variable, "temp").is_none());

        // Ignoring a field the second output lacks hides the absence too.
        let c = MemoryReader::new("c.nc").with_string_attribute("version", "1.0");
        let comparison = compare_files(&a, &c, &opts).unwrap();
        assert_eq!(comparison.differences, 0);
    }

    #[test]
    fn ignore_lists_are_per_role() {
        let a = MemoryReader::new("a.nc")
            .with_attribute("step", "int32", 1.0)
            .with_variable("step", arr1(&[1.0]).into_dyn());
        let b = MemoryReader::new("b.nc")
            .with_attribute("step", "int32", 2.0)
            .with_variable("step", arr1(&[2.0]).into_dyn());
        let mut opts = options(0.0, 0.0);
        opts.ignore_variables.push("step".to_string());

        let comparison = compare_files(&a, &b, &opts).unwrap();
        assert_eq!(comparison.differences, 1);
        assert!(comparison.report(Role::Attribute, "step").is_some());
    }

    #[test]
    fn scalar_attributes_ignore_tolerance() {
        let a = MemoryReader::new("a.nc").with_attribute("dt", "double", 0.1);
        let b = MemoryReader::new("b.nc").with_attribute("dt", "double", 0.1 + 1e-15);
        let comparison = compare_files(&a, &b, &options(0.5, 0.5)).unwrap();
        assert_eq!(comparison.differences, 1);
    }

    #[test]
    fn string_attributes_skip_full_reads() {
        let a = MemoryReader::new("a.nc")
            .with_string_attribute("title", "run")
            .with_string_attribute("code", "solver");
        let b = MemoryReader::new("b.nc")
            .with_string_attribute("title", "run")
            .with_string_attribute("code", "other");
        let comparison = compare_files(&a, &b, &options(0.0, 0.0)).unwrap();

        assert_eq!(a.full_reads(), 0);
        assert_eq!(b.full_reads(), 0);
        assert_eq!(
            comparison.report(Role::Attribute, "code").unwrap().outcome,
            Outcome::ValueDifference(Difference::Text {
                left: "solver".to_string(),
                right: "other".to_string(),
            })
        );
    }

    #[test]
    fn numeric_attributes_are_read_in_full() {
        let a = MemoryReader::new("a.nc").with_attribute("step", "int32", 3.0);
        let b = MemoryReader::new("b.nc").with_attribute("step", "int32", 3.0);
        compare_files(&a, &b, &options(0.0, 0.0)).unwrap();
        assert_eq!(a.full_reads(), 1);
        assert_eq!(b.full_reads(), 1);
    }

    #[test]
    fn attribute_type_mismatch_shows_values() {
        let a = MemoryReader::new("a.nc").with_attribute("dims", "int32", 4.0);
        let b = MemoryReader::new("b.nc")
            .with_attribute("dims", "int32", FieldValue::vector(vec![4.0, 4.0]));
        let comparison = compare_files(&a, &b, &options(0.0, 0.0)).unwrap();
        assert_eq!(
            comparison.report(Role::Attribute, "dims").unwrap().outcome,
            Outcome::ShapeOrTypeMismatch {
                left: "4".to_string(),
                right: "[4, 4]".to_string(),
            }
        );
    }

    #[test]
    fn variable_shape_mismatch_shows_shapes() {
        let a = MemoryReader::new("a.nc").with_variable("u", arr1(&[1.0, 2.0]).into_dyn());
        let b = MemoryReader::new("b.nc").with_variable("u", arr1(&[1.0, 2.0, 3.0]).into_dyn());
        let comparison = compare_files(&a, &b, &options(1.0, 1.0)).unwrap();
        assert_eq!(comparison.differences, 1);
        assert_eq!(
            comparison.report(Role::Variable, "u").unwrap().outcome,
            Outcome::ShapeOrTypeMismatch {
                left: "[2]".to_string(),
                right: "[3]".to_string(),
            }
        );
    }

    #[test]
    fn wide_integers_are_not_rounded() {
        let a = MemoryReader::new("a.nc")
            .with_attribute("stamp", "int64", FieldValue::Integer(9_007_199_254_740_993))
            .with_integer_variable("ids", arr1(&[9_007_199_254_740_993i128]).into_dyn());
        let b = MemoryReader::new("b.nc")
            .with_attribute("stamp", "int64", FieldValue::Integer(9_007_199_254_740_992))
            .with_integer_variable("ids", arr1(&[9_007_199_254_740_992i128]).into_dyn());

        let comparison = compare_files(&a, &b, &options(0.0, 0.0)).unwrap();
        assert_eq!(comparison.differences, 2);
        for (role, name) in [(Role::Attribute, "stamp"), (Role::Variable, "ids")] {
            assert_eq!(
                comparison.report(role, name).unwrap().outcome,
                Outcome::ValueDifference(Difference::Magnitude(1.0))
            );
        }
    }

    #[test]
    fn unreadable_field_in_second_output_counts_as_missing() {
        let b = file_a().with_unreadable("temp").with_unreadable("version");
        let comparison = compare_files(&file_a(), &b, &options(0.0, 0.0)).unwrap();
        assert_eq!(comparison.differences, 2);
        assert!(comparison
            .reports
            .iter()
            .all(|r| r.outcome == Outcome::MissingInOther));
    }

    #[test]
    fn unreadable_field_in_first_output_is_fatal() {
        let a = file_a().with_unreadable("temp");
        assert!(compare_files(&a, &file_a(), &options(0.0, 0.0)).is_err());
    }

    #[test]
    fn attributes_are_reported_before_variables() {
        let comparison = compare_files(&file_a(), &file_b(), &options(0.0, 0.0)).unwrap();
        let roles: Vec<Role> = comparison.reports.iter().map(|r| r.role).collect();
        assert_eq!(roles, vec![Role::Attribute, Role::Variable]);
    }

    #[test]
    fn field_names_filters_ignored() {
        let ignore = vec!["temp".to_string()];
        let names = field_names(&file_a(), Role::Variable, &ignore).unwrap();
        assert!(names.is_empty());
        let names = field_names(&file_a(), Role::Attribute, &ignore).unwrap();
        assert_eq!(names, vec!["version"]);
    }
}
