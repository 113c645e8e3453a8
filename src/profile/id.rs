// src/profile/id.rs
// =============================================================================
// Turns a profile reference (a URL like "https://site.com/in/jane-doe/") into
// the canonical identifier we key everything on ("jane-doe").
//
// Rules:
// - Everything up to and including the "/in/" marker is dropped
// - Query strings and fragments are dropped
// - A single trailing '/' is dropped
// - An empty identifier (or no marker at all) is not an identifier
//
// The same identifier is produced whether the page linked to the profile with
// an absolute or a relative URL, which is what makes the visited set work.
// =============================================================================

/// Path segment that precedes every profile identifier
pub const PROFILE_MARKER: &str = "/in/";

// Extracts the identifier from a profile reference
//
// Returns None when the reference is not a profile link.
//
// Examples:
//   "https://site.com/in/jane-doe/"        -> Some("jane-doe")
//   "/in/jane-doe/?trk=people_also_viewed" -> Some("jane-doe")
//   "https://site.com/company/acme/"       -> None
pub fn extract_id(reference: &str) -> Option<String> {
    let start = reference.find(PROFILE_MARKER)? + PROFILE_MARKER.len();
    let rest = &reference[start..];

    // Stop at the query string or fragment, whichever comes first
    let end = rest.find(|c: char| c == '?' || c == '#').unwrap_or(rest.len());
    let id = rest[..end].strip_suffix('/').unwrap_or(&rest[..end]);

    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

// Builds the URL of a profile page from its identifier
//
// The inverse of extract_id: extract_id(&profile_url(base, id)) == Some(id)
pub fn profile_url(base_url: &str, id: &str) -> String {
    format!("{}{}{}/", base_url.trim_end_matches('/'), PROFILE_MARKER, id)
}
