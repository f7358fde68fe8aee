//! Text rendering of comparison results.
//!
//! Rendering is kept apart from the comparison itself: every function here
//! takes finished data and returns lines, colored only on request.

use crate::compare::{Comparison, Difference, FieldReport, Outcome};
use crate::config::{CompareOptions, Verbosity};
use crossterm::style::{Color, Stylize};
use std::io::IsTerminal;

/// Whether report colors should be used on stdout.
pub fn stdout_supports_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Renders comparison results at a verbosity level.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    /// Which outcomes produce a line.
    pub verbosity: Verbosity,
    /// Emit ANSI colors.
    pub color: bool,
}

impl Reporter {
    /// Create a new reporter.
    pub fn new(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Bold banner line.
    pub fn banner(&self, text: &str) -> String {
        self.paint(text, None)
    }

    /// Summary of what is being compared and how.
    pub fn inputs(&self, first: &str, second: &str, options: &CompareOptions) -> Vec<String> {
        let mut lines = vec![
            format!("bp output 1: {}", first),
            format!("bp output 2: {}", second),
            format!("Absolute tolerance: {:.6e}", options.tolerance.absolute),
            format!("Relative tolerance: {:.6e}", options.tolerance.relative),
            format!("Verbose output level: {}", options.verbosity.level()),
        ];
        if !options.ignore_attributes.is_empty() {
            lines.push(format!(
                "Ignored attributes: {}",
                format_names(&options.ignore_attributes)
            ));
        }
        if !options.ignore_variables.is_empty() {
            lines.push(format!(
                "Ignored variables: {}",
                format_names(&options.ignore_variables)
            ));
        }
        lines
    }

    /// One line per reported field outcome.
    pub fn field_lines(&self, comparison: &Comparison) -> Vec<String> {
        comparison
            .reports
            .iter()
            .filter_map(|report| self.line(report, &comparison.first, &comparison.second))
            .collect()
    }

    /// The line for one field, if the verbosity shows it.
    pub fn line(&self, report: &FieldReport, first: &str, second: &str) -> Option<String> {
        let role = report.role.name();

        match &report.outcome {
            Outcome::Match => {
                if self.verbosity < Verbosity::All {
                    return None;
                }
                Some(format!(
                    "{}{} {} is the same in both outputs",
                    self.tag("PASS", Color::Blue),
                    role,
                    self.paint(&report.name, Some(Color::Blue)),
                ))
            }
            _ if self.verbosity == Verbosity::Silent => None,
            Outcome::MissingInOther => Some(format!(
                "{}{} {} found in {} but not {}",
                self.tag(report.role.missing_tag(), Color::Yellow),
                role,
                self.paint(&report.name, Some(Color::Yellow)),
                first,
                second,
            )),
            Outcome::ValueDifference(Difference::Magnitude(max_diff)) => Some(format!(
                "{}{} {} has differences, max difference: {}",
                self.tag("DIFF", Color::Red),
                role,
                self.paint(&report.name, Some(Color::Red)),
                max_diff,
            )),
            Outcome::ValueDifference(Difference::Text { left, right }) => Some(format!(
                "{}{} {} has differences: {} = {} and {} = {}",
                self.tag("DIFF", Color::Red),
                role,
                self.paint(&report.name, Some(Color::Red)),
                first,
                left,
                second,
                right,
            )),
            Outcome::ShapeOrTypeMismatch { left, right } => Some(format!(
                "{}{} {} has inconsistent {}: {} = {} and {} = {}",
                self.tag("ERROR", Color::Red),
                role,
                self.paint(&report.name, Some(Color::Red)),
                report.role.mismatch_kind(),
                first,
                left,
                second,
                right,
            )),
        }
    }

    /// Final line: identical, or how many differences.
    pub fn summary(&self, comparison: &Comparison) -> String {
        let text = if comparison.is_identical() {
            format!("{} and {} are identical", comparison.first, comparison.second)
        } else {
            format!(
                "{} differences found between {} and {}",
                comparison.differences, comparison.first, comparison.second
            )
        };
        self.paint(&text, None)
    }

    /// Tag followed by padding so messages line up, e.g. `DIFF:  `.
    fn tag(&self, label: &str, color: Color) -> String {
        let tag = format!("{}:", label);
        let padding = " ".repeat(7usize.saturating_sub(tag.len()));
        format!("{}{}", self.paint(&tag, Some(color)), padding)
    }

    fn paint(&self, text: &str, color: Option<Color>) -> String {
        if !self.color {
            return text.to_string();
        }
        match color {
            Some(color) => text.with(color).bold().to_string(),
            None => text.bold().to_string(),
        }
    }
}

fn format_names(names: &[String]) -> String {
    format!("{:?}", names)
}
