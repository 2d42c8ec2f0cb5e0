//
//  labctl
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Renders tagged API results either as terminal tables or as JSON.
//!
//! - **Table format**: human-readable tables for interactive use
//! - **JSON format**: the tagged results, pretty-printed, for scripting
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: the available output formats
//! - [`OutputWriter`]: main entry point for writing formatted output
//! - [`TableOutput`]: how a resource type is laid out as rows and fields
//!
//! ## Example
//!
//! ```rust,ignore
//! use labctl::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write_list(&projects)?;
//! writer.write_success("Project created");
//! ```

mod table;

pub use table::*;

use serde::Serialize;

use crate::api::{Resource, Tagged};

/// The available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable tables with optional color.
    #[default]
    Table,
    /// Pretty-printed JSON of the tagged results.
    Json,
}

/// A trait for resource types that can be shown in a table.
///
/// List views use [`headers`](TableOutput::headers) and
/// [`row`](TableOutput::row); single-item views use
/// [`title`](TableOutput::title) and [`fields`](TableOutput::fields).
pub trait TableOutput {
    /// Column headers for list views.
    fn headers() -> Vec<&'static str>;

    /// One row of cells, matching [`headers`](TableOutput::headers).
    fn row(&self) -> Vec<String>;

    /// Heading for the detail view.
    fn title(&self) -> String;

    /// Label/value pairs for the detail view.
    fn fields(&self) -> Vec<(&'static str, String)>;
}

/// Writes results and status messages in the configured format.
///
/// Everything goes to stdout; warnings are emitted through `tracing`, which
/// writes to stderr and so never corrupts JSON output.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a writer; color support is detected from the terminal.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Renders a list of tagged results.
    ///
    /// JSON output is an array of objects, each with a leading `"type"`
    /// field. An empty table view prints a "No ... found" line instead of an
    /// empty table.
    pub fn write_list<T>(&self, items: &[Tagged<T>]) -> anyhow::Result<()>
    where
        T: Serialize + TableOutput + Resource,
    {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(items)?);
            }
            OutputFormat::Table => {
                if items.is_empty() {
                    self.write_info(&format!(
                        "No {}s found",
                        T::TYPE_NAME.to_ascii_lowercase()
                    ));
                } else {
                    println!("{}", self.render_list(items));
                }
            }
        }
        Ok(())
    }

    /// Renders a single tagged result.
    pub fn write_detail<T>(&self, item: &Tagged<T>) -> anyhow::Result<()>
    where
        T: Serialize + TableOutput,
    {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(item)?);
            }
            OutputFormat::Table => {
                print_header(&item.item.title(), self.color);
                for (label, value) in item.item.fields() {
                    print_field(label, &value, self.color);
                }
            }
        }
        Ok(())
    }

    /// Writes a success message to stdout, prefixed with a check mark.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }

    /// Writes a plain informational line to stdout.
    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    fn render_list<T: TableOutput>(&self, items: &[Tagged<T>]) -> String {
        TableBuilder::new()
            .color(self.color)
            .headers(T::headers())
            .rows(items.iter().map(|tagged| tagged.item.row()))
            .render()
    }
}

/// Prints a bold header with a dashed underline.
pub fn print_header(text: &str, color: bool) {
    use console::style;
    if color {
        println!("{}", style(text).bold());
    } else {
        println!("{}", text);
    }
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a `label: value` line, dimming the label when color is enabled.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
