//! Output formatting for CLI results

use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::models::Document;
use crate::error::Result;
use crate::models::DocumentDisplay;
use crate::models::display::pretty_line;

pub mod json;
pub mod table;

/// Shown instead of an empty table
pub const NO_DOCUMENTS: &str = "No documents available.";

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;
}

impl Formattable for [&Document] {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(json::format_json(self)?),
            OutputFormat::Table => {
                let rows: Vec<DocumentDisplay> = self.iter().map(|d| DocumentDisplay::from(*d)).collect();
                Ok(table::format_table(&rows, NO_DOCUMENTS))
            }
            OutputFormat::Pretty => {
                if self.is_empty() {
                    return Ok(NO_DOCUMENTS.dimmed().to_string());
                }
                let lines: Vec<String> = self.iter().map(|d| pretty_line(d)).collect();
                Ok(lines.join("\n"))
            }
        }
    }
}

/// Format and print data to stdout
pub fn print<T: Formattable + ?Sized>(data: &T, format: OutputFormat) -> Result<()> {
    let output = data.format(format)?;
    println!("{}", output);
    Ok(())
}

#[derive(Serialize)]
struct MessageOutput<'a> {
    message: &'a str,
}

/// Print a confirmation line, or a `{"message": ...}` envelope in JSON mode
pub fn print_success(message: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(&MessageOutput { message })?),
        _ => println!("{} {}", "✓".green(), message),
    }
    Ok(())
}
