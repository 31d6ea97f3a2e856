//! Authentication for the signature API.
//!
//! Users register with an email and password and log in to receive a signed session token (an
//! HS256 JWT). Every resource endpoint expects that token in an `Authorization: Bearer <token>`
//! header.
//!
//! # Modules
//!
//! - [`password`]: Argon2id hashing and verification
//! - [`session`]: Token creation and verification
//! - [`current_user`]: The [`CurrentUser`](crate::api::models::users::CurrentUser) extractor
//! - [`middleware`]: Route guard applied to all protected routes
//!
//! # Usage in Handlers
//!
//! ```ignore
//! use sigtrack::api::models::users::CurrentUser;
//!
//! async fn protected_handler(current_user: CurrentUser) -> String {
//!     format!("Hello, {}!", current_user.id)
//! }
//! ```
//!
//! Handlers behind [`middleware::require_session`] read the caller the guard already verified;
//! used elsewhere the extractor verifies the header itself.

pub mod current_user;
pub mod middleware;
pub mod password;
pub mod session;
