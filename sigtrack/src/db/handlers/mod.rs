//! Repository implementations for database access.
//!
//! Each repository wraps a `&mut PgConnection` (a pooled connection or an open transaction),
//! binds parameters for every statement and returns models from [`crate::db::models`].
//!
//! # Available Repositories
//!
//! - [`Users`]: Account creation and credential lookup
//! - [`Signatures`]: Signature templates, owner scoping and the cascading delete
//! - [`Links`]: Trackable links under a signature
//! - [`Clicks`]: Click events
//! - [`Analytics`]: Per-link click aggregation
//!
//! # Common Pattern
//!
//! ```ignore
//! use sigtrack::db::handlers::{Repository, Signatures};
//!
//! let mut conn = pool.acquire().await?;
//! let mut repo = Signatures::new(&mut conn);
//! let signature = repo.get_by_id(id).await?;
//! ```
//!
//! Ownership is never implied by a lookup: handlers compare `user_id` themselves or call the
//! `*_owned` / `*_for_user` variants, which put the owner into the `WHERE` clause.

pub mod analytics;
pub mod clicks;
pub mod links;
pub mod repository;
pub mod signatures;
pub mod users;

pub use analytics::Analytics;
pub use clicks::Clicks;
pub use links::Links;
pub use repository::Repository;
pub use signatures::Signatures;
pub use users::Users;
