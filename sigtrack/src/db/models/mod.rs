//! Database record models.
//!
//! Request structs (`*CreateDBRequest`) carry the data a repository needs to insert a row;
//! response structs (`*DBResponse`) are what repositories hand back. Both are kept apart from the
//! API models in [`crate::api::models`] so storage and wire formats can evolve independently, with
//! `From` conversions bridging the two.

pub mod analytics;
pub mod clicks;
pub mod links;
pub mod signatures;
pub mod users;
