//! Mock DocSign API client for testing
//!
//! Keeps an in-memory document list and applies mutations to it the way
//! the server does, so view-state logic can be tested without HTTP.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::api::{AuthApi, DocumentApi};
use super::models::{Document, DocumentStatus, DownloadedFile, RegisterRequest};
use super::upload::PdfUpload;
use crate::error::{ApiError, Result};
use crate::session::Session;

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockDocSignClient::new().with_documents(vec![doc(1, "a.pdf")]).await;
/// let docs = mock.list_documents().await?;
/// ```
#[derive(Default)]
pub struct MockDocSignClient {
    /// Server-side document state
    documents: Arc<Mutex<Vec<Document>>>,
    /// Session returned from login
    session: Arc<Mutex<Option<Session>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// When set, every list call fails while mutations still succeed
    listing_down: Arc<Mutex<bool>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub login: usize,
    pub list_documents: usize,
    pub upload_document: usize,
    pub sign_document: usize,
    pub reject_document: usize,
    pub comment_document: usize,
    pub delete_document: usize,
    pub download_document: usize,
}

impl MockDocSignClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the documents the server holds.
    pub async fn with_documents(self, documents: Vec<Document>) -> Self {
        *self.documents.lock().await = documents;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Make every following `list_documents` call fail with a network error.
    pub async fn with_listing_down(self) -> Self {
        *self.listing_down.lock().await = true;
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Current server-side documents, including soft-deleted ones.
    pub async fn server_documents(&self) -> Vec<Document> {
        self.documents.lock().await.clone()
    }

    async fn check_error(&self) -> Result<()> {
        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn set_status(&self, id: i64, status: DocumentStatus) -> Result<()> {
        let mut docs = self.documents.lock().await;
        let doc = docs
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Document {}", id)))?;
        doc.status = status;
        Ok(())
    }
}

#[async_trait]
impl AuthApi for MockDocSignClient {
    async fn register(&self, request: &RegisterRequest) -> Result<String> {
        self.check_error().await?;
        Ok(format!("User {} registered successfully", request.username))
    }

    async fn login(&self, identifier: &str, _password: &str) -> Result<Session> {
        self.check_error().await?;
        self.call_count.lock().await.login += 1;

        let session = Session {
            username: identifier.to_string(),
            token: "mock-token".to_string(),
            role: None,
            email: None,
        };
        *self.session.lock().await = Some(session.clone());
        Ok(session)
    }

    async fn logout(&self) -> Result<()> {
        self.session.lock().await.take();
        Ok(())
    }
}

#[async_trait]
impl DocumentApi for MockDocSignClient {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        self.check_error().await?;
        self.call_count.lock().await.list_documents += 1;
        if *self.listing_down.lock().await {
            return Err(ApiError::Network("down".to_string()).into());
        }
        Ok(self.documents.lock().await.clone())
    }

    async fn upload_document(&self, upload: &PdfUpload) -> Result<String> {
        self.check_error().await?;
        self.call_count.lock().await.upload_document += 1;

        let mut docs = self.documents.lock().await;
        let id = docs.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        docs.push(Document {
            id,
            file_name: upload.file_name().to_string(),
            status: DocumentStatus::Pending,
            file_type: Some(super::upload::PDF_MIME.to_string()),
            created_at: None,
        });
        Ok(format!("Document uploaded successfully! ID: {}", id))
    }

    async fn sign_document(&self, id: i64, custom_name: Option<&str>) -> Result<String> {
        self.check_error().await?;
        self.call_count.lock().await.sign_document += 1;
        self.set_status(id, DocumentStatus::Signed).await?;
        Ok(format!(
            "Document signed successfully as: {}",
            custom_name.unwrap_or("user")
        ))
    }

    async fn reject_document(&self, id: i64) -> Result<String> {
        self.check_error().await?;
        self.call_count.lock().await.reject_document += 1;
        self.set_status(id, DocumentStatus::Rejected).await?;
        Ok("Document rejected.".to_string())
    }

    async fn comment_document(&self, id: i64, _message: &str) -> Result<String> {
        self.check_error().await?;
        self.call_count.lock().await.comment_document += 1;
        if !self.documents.lock().await.iter().any(|d| d.id == id) {
            return Err(ApiError::NotFound(format!("Document {}", id)).into());
        }
        Ok("Comment saved".to_string())
    }

    async fn delete_document(&self, id: i64) -> Result<String> {
        self.check_error().await?;
        self.call_count.lock().await.delete_document += 1;
        self.set_status(id, DocumentStatus::Deleted).await?;
        Ok("Document deleted successfully".to_string())
    }

    async fn download_document(&self, id: i64) -> Result<DownloadedFile> {
        self.check_error().await?;
        self.call_count.lock().await.download_document += 1;

        let docs = self.documents.lock().await;
        let doc = docs
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Document {}", id)))?;
        Ok(DownloadedFile {
            file_name: Some(doc.file_name.clone()),
            bytes: b"%PDF-1.4\n%%EOF\n".to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: i64, name: &str) -> Document {
        Document {
            id,
            file_name: name.to_string(),
            status: DocumentStatus::Pending,
            file_type: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockDocSignClient::new();
        assert!(mock.list_documents().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_client_applies_mutations() {
        let mock = MockDocSignClient::new()
            .with_documents(vec![doc(1, "a.pdf"), doc(2, "b.pdf")])
            .await;

        mock.sign_document(1, Some("Alice")).await.unwrap();
        mock.reject_document(2).await.unwrap();

        let docs = mock.list_documents().await.unwrap();
        assert_eq!(docs[0].status, DocumentStatus::Signed);
        assert_eq!(docs[1].status, DocumentStatus::Rejected);
    }

    #[tokio::test]
    async fn test_mock_client_with_error() {
        let mock = MockDocSignClient::new()
            .with_error(ApiError::Unauthorized("expired".to_string()))
            .await;

        assert!(mock.list_documents().await.is_err());

        // Error is consumed, next call succeeds
        assert!(mock.list_documents().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_client_call_counts() {
        let mock = MockDocSignClient::new().with_documents(vec![doc(1, "a.pdf")]).await;

        mock.list_documents().await.unwrap();
        mock.list_documents().await.unwrap();
        mock.delete_document(1).await.unwrap();

        let counts = mock.call_counts().await;
        assert_eq!(counts.list_documents, 2);
        assert_eq!(counts.delete_document, 1);
        assert_eq!(counts.login, 0);
    }

    #[tokio::test]
    async fn test_mock_client_missing_document() {
        let mock = MockDocSignClient::new();
        assert!(matches!(
            mock.sign_document(99, None).await,
            Err(crate::error::Error::Api(ApiError::NotFound(_)))
        ));
    }
}
