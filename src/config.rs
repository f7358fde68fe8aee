//! Comparison settings.

use crate::error::{BpError, Result};

/// Tolerances for element-wise array comparison.
///
/// Two elements `a` (first output) and `b` (second output) agree when
/// `|a - b| <= absolute + relative * |b|`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tolerance {
    /// Relative tolerance.
    pub relative: f64,
    /// Absolute tolerance.
    pub absolute: f64,
}

impl Tolerance {
    /// Create a validated tolerance.
    pub fn new(relative: f64, absolute: f64) -> Result<Self> {
        // Written so NaN is rejected too.
        if !(absolute >= 0.0) {
            return Err(BpError::InvalidTolerance {
                kind: "absolute",
                value: absolute,
            });
        }
        if !(relative >= 0.0) {
            return Err(BpError::InvalidTolerance {
                kind: "relative",
                value: relative,
            });
        }
        Ok(Self { relative, absolute })
    }

    /// Whether `a` and `b` agree within this tolerance.
    pub fn accepts(&self, a: f64, b: f64) -> bool {
        if a == b || (a.is_nan() && b.is_nan()) {
            return true;
        }
        self.accepts_difference((a - b).abs(), b)
    }

    /// Whether an absolute difference `diff` is within tolerance of `reference`,
    /// the value from the second output.
    pub fn accepts_difference(&self, diff: f64, reference: f64) -> bool {
        diff <= self.absolute + self.relative * reference.abs()
    }
}

/// How much of the comparison is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Report nothing but the summary.
    #[default]
    Silent,
    /// Report fields that differ.
    Failures,
    /// Report every field, including matches.
    All,
}

impl Verbosity {
    /// Numeric level as given on the command line.
    pub fn level(self) -> u8 {
        match self {
            Verbosity::Silent => 0,
            Verbosity::Failures => 1,
            Verbosity::All => 2,
        }
    }
}

impl TryFrom<i64> for Verbosity {
    type Error = BpError;

    fn try_from(level: i64) -> Result<Self> {
        match level {
            0 => Ok(Verbosity::Silent),
            1 => Ok(Verbosity::Failures),
            2 => Ok(Verbosity::All),
            other => Err(BpError::InvalidVerbosity(other)),
        }
    }
}

/// Everything the comparator needs besides the two outputs.
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Array tolerances.
    pub tolerance: Tolerance,
    /// Report level.
    pub verbosity: Verbosity,
    /// Attribute names that are never compared, in the order given.
    pub ignore_attributes: Vec<String>,
    /// Variable names that are never compared, in the order given.
    pub ignore_variables: Vec<String>,
}

impl CompareOptions {
    /// Build options from raw command line values, validating each one.
    pub fn from_raw(
        rtol: f64,
        atol: f64,
        verbose: i64,
        ignore_attributes: impl IntoIterator<Item = String>,
        ignore_variables: impl IntoIterator<Item = String>,
    ) -> Result<Self> {
        Ok(Self {
            tolerance: Tolerance::new(rtol, atol)?,
            verbosity: Verbosity::try_from(verbose)?,
            ignore_attributes: ignore_attributes.into_iter().collect(),
            ignore_variables: ignore_variables.into_iter().collect(),
        })
    }
}
