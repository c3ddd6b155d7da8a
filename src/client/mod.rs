//! DocSign API client
//!
//! The client is split into:
//! - [`api`] - Trait definitions for the API surface
//! - [`models`] - Request and resource types
//! - [`docsign`] - The reqwest-backed implementation
//! - [`upload`] - Client-side PDF validation

pub mod api;
pub mod docsign;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod upload;

pub use api::{AuthApi, DocumentApi};
pub use docsign::DocSignClient;
#[cfg(test)]
pub use mock::MockDocSignClient;
pub use upload::PdfUpload;

/// Complete DocSign API surface
pub trait DocSignApi: AuthApi + DocumentApi {}

impl<T: AuthApi + DocumentApi> DocSignApi for T {}
