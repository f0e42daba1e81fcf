//! mindscale-core
//!
//! Pure domain records shared across the Mindscale system. These are the
//! shapes the assessment engine hands to persistence and audit; nothing in
//! this crate performs I/O.

pub mod error;
pub mod models;

use uuid::Uuid;

use error::CoreError;

/// Parse a user identifier supplied as text (CLI flag, request header).
pub fn parse_user_id(raw: &str) -> Result<Uuid, CoreError> {
    Ok(Uuid::parse_str(raw.trim())?)
}
