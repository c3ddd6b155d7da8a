//! DocSign API data models
//!
//! Request bodies and resources exchanged with the DocSign API,
//! organized by resource type.

mod auth;
mod document;

pub use auth::{LoginRequest, RegisterRequest, Role};
pub use document::{CommentRequest, Document, DocumentStatus, DownloadedFile};
