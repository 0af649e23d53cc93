//! Dashboard helper functions

/// Share of `part` in `total` as a percentage string
pub fn percent(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 / total as f64 * 100.0)
}

/// Horizontal bar scaled so that `max` fills `width` cells
pub fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let cells = ((count * width) as f64 / max as f64).round().max(1.0) as usize;
    "█".repeat(cells.min(width))
}
