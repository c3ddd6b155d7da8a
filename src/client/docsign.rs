//! DocSign API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, HeaderMap};
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::api::{AuthApi, DocumentApi};
use super::models::{CommentRequest, Document, DownloadedFile, LoginRequest, RegisterRequest};
use super::upload::PdfUpload;
use crate::error::{ApiError, Result};
use crate::session::{Session, SessionProvider, SessionRecord};

/// Per-request timeout
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// DocSign API client.
///
/// Every document request reads the current session from the injected
/// [`SessionProvider`] and, when one exists, carries
/// `Authorization: Bearer <token>`. Without a session the request goes out
/// unauthenticated and the server decides.
pub struct DocSignClient {
    http: HttpClient,
    base_url: String,
    sessions: Arc<dyn SessionProvider>,
}

impl DocSignClient {
    /// Create a client for `base_url` (including the `/api` prefix)
    pub fn new(base_url: impl Into<String>, sessions: Arc<dyn SessionProvider>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            sessions,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request that carries the bearer token, if any
    fn authorized(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.sessions.load() {
            Some(session) => {
                log::debug!("Attaching bearer token for {}", session.display_name());
                builder.bearer_auth(&session.token)
            }
            None => {
                log::warn!("No session stored, sending {} unauthenticated", path);
                builder
            }
        }
    }

    /// Send and map non-success statuses to [`ApiError`]
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(ApiError::from)?;
        let status = response.status();
        log::debug!("{} {}", status.as_u16(), response.url().path());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body);

        let err = match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message.unwrap_or_else(|| {
                "missing or expired token. Run `docsign login <identifier>`".to_string()
            })),
            StatusCode::FORBIDDEN => ApiError::Forbidden(
                message.unwrap_or_else(|| "not permitted for this account".to_string()),
            ),
            StatusCode::NOT_FOUND => {
                ApiError::NotFound(message.unwrap_or_else(|| "Resource not found".to_string()))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(message.unwrap_or_else(|| "Bad request".to_string()))
            }
            status if status.is_server_error() => ApiError::ServerError(
                message.unwrap_or_else(|| format!("Server error: {}", status)),
            ),
            status => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
        };
        Err(err.into())
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;
        Ok(data)
    }

    async fn send_text(&self, builder: RequestBuilder) -> Result<String> {
        let response = self.send(builder).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;
        Ok(text.trim().to_string())
    }
}

/// Message carried by an error body: the JSON `message` field, else the raw text
fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        {
            return Some(msg.to_string());
        }
    }

    Some(body.to_string())
}

/// File name from `Content-Disposition: attachment; filename="x.pdf"`
fn attachment_file_name(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[async_trait]
impl AuthApi for DocSignClient {
    async fn register(&self, request: &RegisterRequest) -> Result<String> {
        let builder = self
            .http
            .post(self.url("/auth/register"))
            .json(request);
        self.send_text(builder).await
    }

    async fn login(&self, identifier: &str, password: &str) -> Result<Session> {
        let builder = self.http.post(self.url("/auth/login")).json(&LoginRequest {
            identifier: identifier.to_string(),
            password: password.to_string(),
        });

        let record: SessionRecord = self.send_json(builder).await?;
        let session = record.into_session(Some(identifier)).map_err(|e| {
            ApiError::InvalidResponse(format!("Login response unusable: {}", e))
        })?;

        self.sessions.save(&session)?;
        log::info!("Logged in as {}", session.display_name());
        Ok(session)
    }

    async fn logout(&self) -> Result<()> {
        self.sessions.clear()
    }
}

#[async_trait]
impl DocumentApi for DocSignClient {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        self.send_json(self.authorized(Method::GET, "/documents"))
            .await
    }

    async fn upload_document(&self, upload: &PdfUpload) -> Result<String> {
        let builder = self
            .authorized(Method::POST, "/documents/upload")
            .multipart(upload.to_form()?);
        self.send_text(builder).await
    }

    async fn sign_document(&self, id: i64, custom_name: Option<&str>) -> Result<String> {
        let path = format!("/documents/{}/sign", id);
        let mut builder = self.authorized(Method::POST, &path);
        if let Some(name) = custom_name.map(str::trim).filter(|n| !n.is_empty()) {
            builder = builder.query(&[("customName", name)]);
        }
        self.send_text(builder).await
    }

    async fn reject_document(&self, id: i64) -> Result<String> {
        let path = format!("/documents/{}/reject", id);
        self.send_text(self.authorized(Method::POST, &path)).await
    }

    async fn comment_document(&self, id: i64, message: &str) -> Result<String> {
        let path = format!("/documents/{}/comments", id);
        let builder = self.authorized(Method::POST, &path).json(&CommentRequest {
            message: message.to_string(),
        });
        self.send_text(builder).await
    }

    async fn delete_document(&self, id: i64) -> Result<String> {
        let path = format!("/documents/delete/{}", id);
        self.send_text(self.authorized(Method::DELETE, &path)).await
    }

    async fn download_document(&self, id: i64) -> Result<DownloadedFile> {
        let path = format!("/documents/{}/download", id);
        let response = self.send(self.authorized(Method::GET, &path)).await?;

        let file_name = attachment_file_name(response.headers());
        let bytes = response.bytes().await.map_err(ApiError::from)?;

        Ok(DownloadedFile {
            file_name,
            bytes: bytes.to_vec(),
        })
    }
}
