//! Report formatting utilities for terminal output
//!
//! Widths here count characters, not bytes, so accented labels line up.

use crate::analytics::Progress;
use crate::models::Money;

/// Format a money amount with color hints for terminal display
pub fn format_money_colored(amount: Money, symbol: &str) -> String {
    let text = amount.format_with_symbol(symbol);
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", text)
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", text)
    } else {
        text
    }
}

/// Create a bar of `width` cells filled in proportion to `value / max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Progress bar; the fill stops at 100% however far over the value is
pub fn format_progress_bar(progress: &Progress, width: usize) -> String {
    format_bar(progress.bar_width() as f64, 100.0, width)
}

/// Percentage label, marking values over 100
pub fn format_progress_label(progress: &Progress) -> String {
    if progress.over_threshold {
        format!("{}% !", progress.percentage)
    } else {
        format!("{}%", progress.percentage)
    }
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Widest label in a column, at least `min`
pub fn column_width<'a, I>(labels: I, min: usize) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    labels
        .into_iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(min)
        .max(min)
}
