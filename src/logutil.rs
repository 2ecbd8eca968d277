//! Helpers for logging raw player input without breaking log lines.

/// Maximum characters of input echoed into a log line.
const MAX_PREVIEW: usize = 120;

/// Flatten a typed line for logging: escape backslashes, newlines, carriage
/// returns and tabs, render other control characters as `\xNN`, and cap the
/// preview length with an ellipsis.
pub fn escape_log(input: &str) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(input.len().min(MAX_PREVIEW) + 4);
    for ch in input.chars().take(MAX_PREVIEW) {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    if input.chars().count() > MAX_PREVIEW {
        out.push('…');
    }
    out
}
