// src/profile/mod.rs
// =============================================================================
// Profile identifiers and the records we build for each visited profile.
//
// Submodules:
// - id: turns a profile URL into its canonical identifier
// - record: ProfileDetails and ProfileRecord
// =============================================================================

mod id;
mod record;

pub use id::{extract_id, profile_url};
pub use record::{ProfileDetails, ProfileRecord, DEFAULT_PICTURE_URL};
