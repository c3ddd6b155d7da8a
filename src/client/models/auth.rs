//! Authentication models

use serde::{Deserialize, Serialize};

/// Account role chosen at registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular user, sees own documents
    #[default]
    User,
    /// Administrator, sees all documents
    Admin,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Body of `POST /auth/login`; `identifier` is a username or an email
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}
