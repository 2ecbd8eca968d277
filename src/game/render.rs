//! ASCII panel rendering helpers for command output.
//!
//! Pure string formatting: double-line box-drawing panels with a fixed inner
//! width, difficulty star bars, and security-level bars. Padding counts
//! characters rather than bytes so the multi-byte glyphs line up.

/// Inner width of every panel, excluding the border characters.
pub const PANEL_WIDTH: usize = 60;

/// Right-pad (or keep) `text` to exactly `width` characters.
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let mut out = String::with_capacity(width);
    out.push_str(text);
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

/// Difficulty as filled/hollow stars, e.g. `★★★☆☆` for 3.
pub fn stars(difficulty: u8) -> String {
    let filled = difficulty.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Elapsed seconds as `1h 2m 3s`, dropping leading zero units.
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Security rating as a filled bar, e.g. `██░░░ (2/5)`.
pub fn security_bar(level: u8) -> String {
    let filled = level.min(5) as usize;
    format!("{}{} ({}/5)", "█".repeat(filled), "░".repeat(5 - filled), level)
}

/// Builder for a bordered panel.
#[derive(Debug, Default)]
pub struct Panel {
    rows: Vec<Row>,
}

#[derive(Debug)]
enum Row {
    Text(String),
    Separator,
}

impl Panel {
    pub fn new() -> Self {
        Panel::default()
    }

    /// Free-form row; truncated to the panel width if too long.
    pub fn line(mut self, text: impl Into<String>) -> Self {
        let text: String = text.into();
        let clipped: String = text.chars().take(PANEL_WIDTH - 2).collect();
        self.rows.push(Row::Text(clipped));
        self
    }

    /// `Label:  value` row with the label padded to a fixed column.
    pub fn field(self, label: &str, value: impl std::fmt::Display) -> Self {
        self.line(format!("{} {}", pad(&format!("{label}:"), 15), value))
    }

    /// Horizontal separator row.
    pub fn sep(mut self) -> Self {
        self.rows.push(Row::Separator);
        self
    }

    /// Blank row.
    pub fn blank(self) -> Self {
        self.line("")
    }

    pub fn render(&self) -> String {
        let bar = "═".repeat(PANEL_WIDTH);
        let mut out = format!("╔{bar}╗\n");
        for row in &self.rows {
            match row {
                Row::Separator => out.push_str(&format!("╠{bar}╣\n")),
                Row::Text(text) => {
                    out.push_str(&format!("║ {}║\n", pad(text, PANEL_WIDTH - 1)));
                }
            }
        }
        out.push_str(&format!("╚{bar}╝"));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_fill_and_hollow() {
        assert_eq!(stars(1), "★☆☆☆☆");
        assert_eq!(stars(5), "★★★★★");
    }

    #[test]
    fn duration_drops_leading_zero_units() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3725), "1h 2m 5s");
    }

    #[test]
    fn security_bar_shape() {
        assert_eq!(security_bar(2), "██░░░ (2/5)");
    }

    #[test]
    fn panel_rows_have_uniform_width() {
        let panel = Panel::new()
            .line("SCAN RESULTS")
            .sep()
            .field("Target", "10.0.0.5")
            .render();
        for row in panel.lines() {
            assert_eq!(row.chars().count(), PANEL_WIDTH + 2);
        }
    }

    #[test]
    fn overlong_rows_are_clipped() {
        let long = "x".repeat(200);
        let panel = Panel::new().line(long).render();
        for row in panel.lines() {
            assert_eq!(row.chars().count(), PANEL_WIDTH + 2);
        }
    }
}
