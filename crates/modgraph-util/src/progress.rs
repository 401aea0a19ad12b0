use std::io::Write;

use console::Style;

/// Width of the right-aligned label gutter.
const LABEL_WIDTH: usize = 12;

/// Outcome a status line reports; selects the label colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Done,
    Warning,
}

impl StatusKind {
    fn style(self) -> Style {
        match self {
            Self::Done => Style::new().green().bold(),
            Self::Warning => Style::new().yellow().bold(),
        }
    }
}

/// `   Assembled 3 modules, 2 dependencies`
pub fn format_status(kind: StatusKind, label: &str, message: &str) -> String {
    let label = format!("{label:>LABEL_WIDTH$}");
    format!("{} {message}", kind.style().apply_to(label))
}

/// Write a status line to stderr, keeping stdout for the report itself.
pub fn print_status(kind: StatusKind, label: &str, message: &str) {
    let _ = writeln!(std::io::stderr(), "{}", format_status(kind, label, message));
}
