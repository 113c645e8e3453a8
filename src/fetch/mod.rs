// src/fetch/mod.rs
// =============================================================================
// This module turns a profile identifier into a profile record.
//
// Submodules:
// - page: pulls names, background and related profiles out of profile HTML
// - session: logs in and downloads profile pages over one HTTP session
//
// The crawl scheduler only sees the PageFetcher trait, so its tests can feed
// it a scripted in-memory graph instead of a website.
//
// Rust concepts:
// - Traits: the seam between "how to crawl" and "where pages come from"
// - Lifetimes: ExpansionRequest borrows the visited set instead of copying it
// =============================================================================

mod page;
mod session;

use crate::crawl::VisitedSet;
use crate::error::FetchError;
use crate::profile::ProfileDetails;
use std::collections::BTreeSet;

pub use session::ProfileSession;

/// Most related profiles a page ever shows, whatever the user asks for
pub const MAX_RELATED_PROFILES: usize = 10;

/// Asks the fetcher to also pick profiles to visit next
#[derive(Debug, Clone, Copy)]
pub struct ExpansionRequest<'a> {
    /// How many new profiles to pick, at most
    pub cap: usize,
    /// Profiles already visited are never picked
    pub visited: &'a VisitedSet,
}

/// Everything read from one profile page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    pub details: ProfileDetails,
    /// Every profile identifier referenced on the page
    pub references: BTreeSet<String>,
    /// Profiles to visit next
    ///
    /// None when expansion was not requested or the page had no related
    /// profiles section; Some(empty) when the section had nothing new.
    pub expansion: Option<Vec<String>>,
}

/// Source of profile pages
///
/// Takes &mut self: a fetcher drives one session and is never shared between
/// concurrent callers.
pub trait PageFetcher {
    async fn fetch(
        &mut self,
        id: &str,
        expansion: Option<ExpansionRequest<'_>>,
    ) -> Result<FetchedPage, FetchError>;
}
