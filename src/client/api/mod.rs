//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - Registration, login and logout
//! - [`DocumentApi`] - Document listing and actions
//!
//! The [`DocSignApi`](super::DocSignApi) super-trait combines both.

mod auth;
mod documents;

pub use auth::AuthApi;
pub use documents::DocumentApi;
