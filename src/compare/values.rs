//! Value-level comparison.

use super::{Difference, Outcome};
use crate::config::Tolerance;
use crate::data::FieldValue;
use crate::format::format_shape;
use ndarray::{ArrayD, Zip};

/// Compare two values read from the first and second output.
///
/// Strings must match exactly and scalars must be exactly equal. Tolerance
/// only applies to arrays, and only once their shapes agree. Integers are
/// compared as integers; an integer is only widened to `f64` when the other
/// side is floating point. Every pairing yields an outcome.
pub fn compare_values(v1: &FieldValue, v2: &FieldValue, tolerance: &Tolerance) -> Outcome {
    use FieldValue::{Array, Integer, IntegerArray, Scalar};

    match (v1, v2) {
        (Scalar(a), Scalar(b)) => compare_scalars(*a, *b),
        (Integer(a), Integer(b)) => compare_integers(*a, *b),
        (Integer(a), Scalar(b)) => compare_scalars(*a as f64, *b),
        (Scalar(a), Integer(b)) => compare_scalars(*a, *b as f64),
        (Array(a), Array(b)) => compare_arrays(a, b, tolerance),
        (IntegerArray(a), IntegerArray(b)) => compare_integer_arrays(a, b, tolerance),
        (IntegerArray(a), Array(b)) => compare_arrays(&a.mapv(|x| x as f64), b, tolerance),
        (Array(a), IntegerArray(b)) => compare_arrays(a, &b.mapv(|x| x as f64), tolerance),
        (left, right) if left.is_string() && right.is_string() => compare_text(left, right),
        (left, right) => Outcome::ShapeOrTypeMismatch {
            left: describe(left),
            right: describe(right),
        },
    }
}

/// Exact scalar comparison; the magnitude is `|b - a|`.
pub fn compare_scalars(a: f64, b: f64) -> Outcome {
    if a == b || (a.is_nan() && b.is_nan()) {
        Outcome::Match
    } else {
        Outcome::ValueDifference(Difference::Magnitude((b - a).abs()))
    }
}

/// Exact integer comparison; the magnitude is `|b - a|`.
pub fn compare_integers(a: i128, b: i128) -> Outcome {
    if a == b {
        Outcome::Match
    } else {
        Outcome::ValueDifference(Difference::Magnitude(a.abs_diff(b) as f64))
    }
}

/// Element-wise array comparison.
///
/// Differing shapes are a mismatch regardless of tolerance. Otherwise the
/// reported magnitude is the largest absolute element difference.
pub fn compare_arrays(a: &ArrayD<f64>, b: &ArrayD<f64>, tolerance: &Tolerance) -> Outcome {
    if a.shape() != b.shape() {
        return Outcome::ShapeOrTypeMismatch {
            left: format_shape(a.shape()),
            right: format_shape(b.shape()),
        };
    }

    let mut same = true;
    let mut max_diff = 0.0f64;
    Zip::from(a).and(b).for_each(|&x, &y| {
        if !tolerance.accepts(x, y) {
            same = false;
        }
        if x == y || (x.is_nan() && y.is_nan()) {
            return;
        }
        let diff = (y - x).abs();
        // Once NaN, stays NaN.
        if diff.is_nan() || diff > max_diff {
            max_diff = diff;
        }
    });

    if same {
        Outcome::Match
    } else {
        Outcome::ValueDifference(Difference::Magnitude(max_diff))
    }
}

/// Element-wise integer array comparison.
///
/// Differences are taken on the integers themselves, so values that only
/// differ past the precision of `f64` still differ.
pub fn compare_integer_arrays(
    a: &ArrayD<i128>,
    b: &ArrayD<i128>,
    tolerance: &Tolerance,
) -> Outcome {
    if a.shape() != b.shape() {
        return Outcome::ShapeOrTypeMismatch {
            left: format_shape(a.shape()),
            right: format_shape(b.shape()),
        };
    }

    let mut same = true;
    let mut max_diff = 0u128;
    Zip::from(a).and(b).for_each(|&x, &y| {
        let diff = x.abs_diff(y);
        if diff == 0 {
            return;
        }
        if !tolerance.accepts_difference(diff as f64, y as f64) {
            same = false;
        }
        max_diff = max_diff.max(diff);
    });

    if same {
        Outcome::Match
    } else {
        Outcome::ValueDifference(Difference::Magnitude(max_diff as f64))
    }
}

pub(super) fn compare_text(left: &FieldValue, right: &FieldValue) -> Outcome {
    if left == right {
        Outcome::Match
    } else {
        Outcome::ValueDifference(Difference::Text {
            left: left.to_string(),
            right: right.to_string(),
        })
    }
}

fn describe(value: &FieldValue) -> String {
    match value.shape() {
        Some(shape) => format_shape(shape),
        None => value.to_string(),
    }
}
