//! Document API trait

use async_trait::async_trait;

use crate::client::models::{Document, DownloadedFile};
use crate::client::upload::PdfUpload;
use crate::error::Result;

/// Document operations for the DocSign API
///
/// Mutating calls return the server's plain-text confirmation.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// List documents visible to the current user (admins see all)
    async fn list_documents(&self) -> Result<Vec<Document>>;

    /// Upload an already validated PDF
    async fn upload_document(&self, upload: &PdfUpload) -> Result<String>;

    /// Sign a document, optionally under a display name
    async fn sign_document(&self, id: i64, custom_name: Option<&str>) -> Result<String>;

    async fn reject_document(&self, id: i64) -> Result<String>;

    /// Attach a note to a document
    async fn comment_document(&self, id: i64, message: &str) -> Result<String>;

    async fn delete_document(&self, id: i64) -> Result<String>;

    async fn download_document(&self, id: i64) -> Result<DownloadedFile>;
}
