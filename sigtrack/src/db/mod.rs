//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//! It follows the Repository pattern to provide clean abstractions over database operations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries, ownership filters, transactions)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations, one per table
//! - [`models`]: Request/response structures crossing the repository boundary
//! - [`errors`]: Database-specific error types
//!
//! # Schema
//!
//! Four tables, created by the migrations in `migrations/`:
//!
//! - `users`: accounts (`email` is unique, only an argon2 hash of the password is stored)
//! - `signatures`: template documents (`template_data` is JSONB) owned by a user
//! - `links`: trackable URLs belonging to a signature
//! - `clicks`: one row per tracked click, keyed by link id without a foreign key
//!
//! # Usage
//!
//! ```ignore
//! use sigtrack::db::handlers::{Repository, Signatures};
//!
//! let mut conn = pool.acquire().await?;
//! let mut signatures = Signatures::new(&mut conn);
//! let owned = signatures.list(&SignatureFilter::for_user(user_id)).await?;
//! ```

pub mod errors;
pub mod handlers;
pub mod models;
