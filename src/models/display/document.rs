//! Document display model

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use super::common::{format_created_at, truncate_string};
use crate::client::models::{Document, DocumentStatus};

/// Longest file name shown in a table cell
const MAX_NAME_WIDTH: usize = 48;

/// Document display model for table output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DocumentDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "FILENAME")]
    pub file_name: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<&Document> for DocumentDisplay {
    fn from(doc: &Document) -> Self {
        Self {
            id: format!("#{}", doc.id),
            file_name: truncate_string(&doc.file_name, MAX_NAME_WIDTH),
            status: doc.status.label().to_uppercase(),
            created: doc
                .created_at
                .as_deref()
                .map(format_created_at)
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Status label colored by lifecycle state
pub fn colored_status(status: DocumentStatus) -> String {
    let label = status.label().to_uppercase();
    match status {
        DocumentStatus::Signed => label.green().bold().to_string(),
        DocumentStatus::Rejected => label.red().bold().to_string(),
        DocumentStatus::Deleted => label.dimmed().to_string(),
        DocumentStatus::Pending | DocumentStatus::Unknown => label.yellow().bold().to_string(),
    }
}

/// One human-oriented line per document
pub fn pretty_line(doc: &Document) -> String {
    format!(
        "{:>6}  {}  {}",
        format!("#{}", doc.id).dimmed(),
        colored_status(doc.status),
        doc.file_name.bold()
    )
}
