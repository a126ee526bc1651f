use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::format;

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Section title, bold and underlined.
pub fn title(text: &str) -> String {
    style(text).bold().underlined().to_string()
}

/// Right-aligned numeric cell; `None` renders the unavailable marker dimmed.
pub fn value_cell(value: Option<f64>, decimals: usize) -> Cell {
    match value {
        Some(v) => {
            Cell::new(format::format_number(v, decimals)).set_alignment(CellAlignment::Right)
        }
        None => Cell::new(format::UNAVAILABLE)
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
    }
}

/// Percentage-change cell, green for gains and red for losses; `None` renders
/// the unavailable marker.
pub fn change_cell(change: Option<f64>) -> Cell {
    match change {
        Some(c) => {
            let color = if c >= 0.0 { Color::Green } else { Color::Red };
            Cell::new(format::format_pct(c))
                .fg(color)
                .set_alignment(CellAlignment::Right)
        }
        None => Cell::new(format::UNAVAILABLE)
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
    }
}

/// Cell for a source that failed outright.
pub fn error_cell() -> Cell {
    Cell::new(format::UNAVAILABLE).fg(Color::Red)
}

/// Spinner shown while the sources are being fetched.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}
