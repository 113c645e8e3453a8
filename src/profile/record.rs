// src/profile/record.rs
// =============================================================================
// The data we keep about every profile we visit.
//
// A record is created exactly once, when its page is fetched, and never
// changes afterwards. The values derived after the crawl (which references
// point at visited profiles, and the graph degree) live next to the store,
// not inside the record, so nothing can edit what was observed.
// =============================================================================

use std::collections::BTreeSet;

/// Picture shown for profiles whose page had no photo
pub const DEFAULT_PICTURE_URL: &str = "https://i2.wp.com/molddrsusa.com/wp-content/uploads/2015/11/profile-empty.png.250x250_q85_crop.jpg?ssl=1";

/// Descriptive fields scraped from a profile page
///
/// Every field is optional: a missing page element is recorded as None
/// instead of failing the fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDetails {
    pub name: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub school: Option<String>,
    pub picture: Option<String>,
}

impl ProfileDetails {
    /// Short "title @ company" line used by the node/edge export
    pub fn description(&self) -> String {
        format!(
            "{} @ {}",
            self.title.as_deref().unwrap_or("-"),
            self.company.as_deref().unwrap_or("-")
        )
    }

    /// Picture URL, falling back to the placeholder
    pub fn picture_or_default(&self) -> &str {
        self.picture.as_deref().unwrap_or(DEFAULT_PICTURE_URL)
    }
}

/// One visited profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    /// Profile that led us here (None for the root)
    pub source_id: Option<String>,
    /// This profile's identifier, unique within a store
    pub dest_id: String,
    pub details: ProfileDetails,
    /// Every profile identifier referenced on the page, unfiltered
    pub dest_childs: BTreeSet<String>,
    /// Crawl level at which the profile was fetched (root = 0)
    pub tree_degree: usize,
}

impl ProfileRecord {
    /// A record for a page we could not read
    ///
    /// It still takes part in the post-crawl passes, it just has no
    /// references and no descriptive fields.
    pub fn unreadable(source_id: Option<String>, dest_id: String, tree_degree: usize) -> Self {
        Self {
            source_id,
            dest_id,
            details: ProfileDetails::default(),
            dest_childs: BTreeSet::new(),
            tree_degree,
        }
    }

    pub fn is_root(&self) -> bool {
        self.source_id.is_none()
    }
}
