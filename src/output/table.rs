//
//  labctl
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Helpers for rendering lists as terminal tables with `comfy_table`, plus
//! small cell formatters shared by the resource views.
//!
//! ## Example
//!
//! ```rust
//! use labctl::output::TableBuilder;
//!
//! let rendered = TableBuilder::new()
//!     .color(false)
//!     .headers(["ID", "Name"])
//!     .row(["1", "my-project"])
//!     .render();
//! assert!(rendered.contains("my-project"));
//! ```

use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Creates a new table with the UTF-8 border preset and dynamic width.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// A builder for constructing formatted tables with a fluent API.
///
/// Headers are drawn in cyan when color is enabled. Color support is detected
/// on creation; use [`color`](TableBuilder::color) to override it.
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    /// Enables or disables colored headers.
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(|s| s.into()).collect();
        if self.color {
            let cells: Vec<Cell> = headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect();
            self.table.set_header(cells);
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(|s| s.into()).collect();
        self.table.add_row(row);
        self
    }

    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            self = self.row(row);
        }
        self
    }

    /// Renders the table to a string.
    pub fn render(self) -> String {
        self.table.to_string()
    }

    /// Prints the table to stdout.
    pub fn print(self) {
        println!("{}", self.table);
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a boolean as `Yes`/`No`.
pub fn format_bool(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}

/// Formats an optional timestamp as `YYYY-MM-DD HH:MM`, or `-`.
pub fn format_timestamp(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Truncates `s` to at most `max_len` characters, ending with `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let kept: String = s.chars().take(max_len - 3).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(format_timestamp(Some(&ts)), "2024-03-09 14:05");
        assert_eq!(format_timestamp(None), "-");
    }

    #[test]
    fn test_render_contains_headers_and_rows() {
        let rendered = TableBuilder::new()
            .color(false)
            .headers(["ID", "Path"])
            .rows(vec![vec!["1", "group/a"], vec!["2", "group/b"]])
            .render();
        assert!(rendered.contains("Path"));
        assert!(rendered.contains("group/a"));
        assert!(rendered.find("group/a").unwrap() < rendered.find("group/b").unwrap());
    }
}
