//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::RegisterRequest;
use crate::error::Result;
use crate::session::Session;

/// Account operations for the DocSign API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Create an account; returns the server's confirmation message
    async fn register(&self, request: &RegisterRequest) -> Result<String>;

    /// Authenticate and persist the resulting session
    async fn login(&self, identifier: &str, password: &str) -> Result<Session>;

    /// Forget the stored session
    async fn logout(&self) -> Result<()>;
}
