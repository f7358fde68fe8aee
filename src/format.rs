//! Shared text formatting for reports and dumps.

use unicode_width::UnicodeWidthStr;

/// Format an array shape, e.g. `[2, 3]`.
pub fn format_shape(shape: &[usize]) -> String {
    format!("{:?}", shape)
}

/// Pad `text` with spaces to `width` terminal columns.
///
/// Text already at least `width` columns wide is returned unchanged.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    let mut padded = String::with_capacity(text.len() + width.saturating_sub(used));
    padded.push_str(text);
    padded.push_str(&" ".repeat(width.saturating_sub(used)));
    padded
}
