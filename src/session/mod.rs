//! Session persistence for the logged-in user
//!
//! A [`Session`] is created from a successful login and handed to a
//! [`SessionProvider`], which the API client consults before every request.
//! Token field aliasing (`token` vs. the legacy `accessToken`) is resolved
//! here, once, when a session is built from the wire or from storage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod jwt;
#[cfg(test)]
mod memory;
mod store;

pub use jwt::TokenClaims;
#[cfg(test)]
pub use memory::MemorySessionStore;
pub use store::FileSessionStore;

/// Fixed storage key the session is persisted under
pub const SESSION_KEY: &str = "user";

/// Authenticated user identity and bearer credential
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct Session {
    /// Username shown to the user and used as the default signature name.
    /// Empty when neither the record nor the token's `sub` claim names one.
    pub username: String,

    /// Bearer token; never empty
    pub token: String,

    /// Account role as reported by the server (USER, ADMIN)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Account email, when the server reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Session {
    /// Decode the token's JWT claims, if the token is a JWT
    pub fn claims(&self) -> Option<TokenClaims> {
        jwt::decode_claims(&self.token).ok()
    }

    /// Name to show in messages
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            "unknown user"
        } else {
            &self.username
        }
    }

    /// Username to sign under by default, if known
    pub fn signer_name(&self) -> Option<&str> {
        Some(self.username.as_str()).filter(|u| !u.is_empty())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .field("email", &self.email)
            .finish()
    }
}

/// Loose shape shared by login responses and stored sessions.
///
/// Either token field may be present; the first non-empty one wins. The
/// token alone decides whether the record is a usable session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, rename = "accessToken")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl SessionRecord {
    /// The bearer token carried by this record, under either field name
    pub fn bearer_token(&self) -> Option<&str> {
        [self.token.as_deref(), self.access_token.as_deref()]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
    }

    /// Build a session.
    ///
    /// The username comes from the record, then `fallback_username`, then the
    /// token's `sub` claim, and is left empty when none of them has one.
    pub fn into_session(
        self,
        fallback_username: Option<&str>,
    ) -> std::result::Result<Session, String> {
        let token = self
            .bearer_token()
            .ok_or_else(|| "no token or accessToken field".to_string())?
            .to_string();

        let username = self
            .username
            .filter(|u| !u.trim().is_empty())
            .or_else(|| fallback_username.map(str::to_string))
            .or_else(|| jwt::decode_claims(&token).ok().and_then(|c| c.sub))
            .unwrap_or_default();

        Ok(Session {
            username,
            token,
            role: self.role,
            email: self.email,
        })
    }
}

impl TryFrom<SessionRecord> for Session {
    type Error = String;

    fn try_from(record: SessionRecord) -> std::result::Result<Self, Self::Error> {
        record.into_session(None)
    }
}

/// Source of the current session, injected into the API client.
pub trait SessionProvider: Send + Sync {
    /// Current session; `None` when absent or unreadable. Never fails.
    fn load(&self) -> Option<Session>;

    /// Persist `session`, replacing any previous one
    fn save(&self, session: &Session) -> Result<()>;

    /// Remove the stored session. Clearing an absent session is a no-op.
    fn clear(&self) -> Result<()>;
}
