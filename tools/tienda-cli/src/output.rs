//! Output formatting for the CLI.

use chrono::{DateTime, Local};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tienda_commerce::catalog::BoxPricing;
use tienda_commerce::search::Pagination;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", truncate(col, *width), width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print a bold table header row.
    pub fn table_header(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", style(formatted.join("  ")).bold());
    }

    /// Print the "showing x-y of n" line and the page strip.
    pub fn pagination(&self, pagination: &Pagination) {
        if self.json {
            return;
        }
        if pagination.total_items == 0 {
            return;
        }
        if pagination.is_out_of_range() {
            self.warn(&format!(
                "Page {} is past the last page ({})",
                pagination.page, pagination.total_pages
            ));
            return;
        }
        println!(
            "\n  {}",
            style(format!(
                "Showing {}-{} of {}",
                pagination.start_item(),
                pagination.end_item(),
                pagination.total_items
            ))
            .dim()
        );
        if pagination.shows_controls() {
            let strip: Vec<String> = pagination
                .page_numbers(5)
                .into_iter()
                .map(|n| {
                    if n == pagination.page {
                        style(format!("[{}]", n)).bold().to_string()
                    } else {
                        n.to_string()
                    }
                })
                .collect();
            println!("  {} {}", style("Pages:").dim(), strip.join(" "));
        }
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(template);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Shorten a cell to `width` characters, marking the cut with an ellipsis.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Format a unix timestamp in local time.
pub fn format_timestamp(secs: i64) -> String {
    match DateTime::from_timestamp(secs, 0) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => "-".to_string(),
    }
}

/// Box price and size, e.g. "$1800.00 x12".
pub fn format_box(pricing: Option<&BoxPricing>) -> String {
    match pricing {
        Some(b) => format!("{} x{}", b.price.display(), b.size),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tienda_commerce::Money;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Alfajor", 10), "Alfajor");
        assert_eq!(truncate("Alfajor Triple", 8), "Alfajor…");
        assert_eq!(truncate("Ñandú", 3), "Ña…");
    }

    #[test]
    fn test_format_box() {
        let pricing = BoxPricing::new(Money::ars(1800), 12);
        assert_eq!(format_box(Some(&pricing)), "$1800.00 x12");
        assert_eq!(format_box(None), "-");
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(i64::MAX), "-");
        assert_ne!(format_timestamp(0), "-");
    }
}
