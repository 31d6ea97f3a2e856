//! Common type definitions.
//!
//! All entity IDs are UUIDs wrapped in type aliases so signatures read by intent:
//!
//! - [`UserId`]: User account identifier
//! - [`SignatureId`]: Stored signature template identifier
//! - [`LinkId`]: Trackable link identifier
//! - [`ClickId`]: Recorded click identifier
//!
//! [`abbrev_uuid`] shortens UUIDs to their first 8 chars for logging.

use uuid::Uuid;

// Type aliases for IDs
pub type UserId = Uuid;
pub type SignatureId = Uuid;
pub type LinkId = Uuid;
pub type ClickId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}
