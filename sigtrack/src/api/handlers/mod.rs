//! HTTP request handlers for all API endpoints.
//!
//! Each handler parses its input, checks ownership where the resource belongs to a user, runs
//! the repository calls from [`crate::db::handlers`] and shapes the JSON (or HTML) response.
//!
//! # Handler Modules
//!
//! - [`auth`]: Registration and login
//! - [`users`]: The caller's profile
//! - [`signatures`]: Signature CRUD, rendering and the cascading delete
//! - [`links`]: Link creation, counts and per-link clicks
//! - [`clicks`]: Click tracking
//! - [`analytics`]: Per-link click aggregation and the global click count
//!
//! # Authentication
//!
//! Handlers take a [`CurrentUser`](crate::api::models::users::CurrentUser) argument; the route
//! guard in [`crate::auth::middleware`] has already verified the bearer token by then.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, crate::errors::Error>`; the error type turns itself into a JSON
//! body with the right status code.

pub mod analytics;
pub mod auth;
pub mod clicks;
pub mod links;
pub mod signatures;
pub mod users;
