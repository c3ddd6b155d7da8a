//! Document models

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Signing lifecycle state, owned by the server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Signed,
    Rejected,
    Deleted,
    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

impl DocumentStatus {
    /// Human label; unknown states read as pending
    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::Signed => "Signed",
            DocumentStatus::Rejected => "Rejected",
            DocumentStatus::Deleted => "Deleted",
            DocumentStatus::Pending | DocumentStatus::Unknown => "Pending",
        }
    }
}

/// Document as listed by `GET /documents`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,

    pub file_name: String,

    #[serde(default)]
    pub status: DocumentStatus,

    /// MIME type recorded at upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,

    /// Server-local creation timestamp (ISO-8601 without zone)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Document {
    /// Signed documents can no longer be signed or rejected
    pub fn can_sign(&self) -> bool {
        self.status != DocumentStatus::Signed
    }

    /// Soft-deleted documents are still returned by the server but not shown
    pub fn is_visible(&self) -> bool {
        self.status != DocumentStatus::Deleted
    }
}

/// Body of `POST /documents/{id}/comments`
#[derive(Debug, Clone, Serialize)]
pub struct CommentRequest {
    pub message: String,
}

/// Binary payload returned by `GET /documents/{id}/download`
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    /// Name from the `Content-Disposition` header, if any
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl DownloadedFile {
    /// File name to save under, always ending in `.pdf`
    pub fn suggested_name(&self, id: i64) -> String {
        // Only the final path component; never let the server pick a directory
        let name = self
            .file_name
            .as_deref()
            .and_then(|n| Path::new(n).file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("document-{}", id));
        ensure_pdf_extension(&name)
    }
}

/// Append `.pdf` unless the name already ends with it (case-insensitive)
pub fn ensure_pdf_extension(name: &str) -> String {
    if name.to_lowercase().ends_with(".pdf") {
        name.to_string()
    } else {
        format!("{}.pdf", name)
    }
}
