// src/crawl/mod.rs
// =============================================================================
// This module handles the profile crawl.
//
// Features:
// - Breadth-first crawling starting from one root profile
// - Configurable depth and fanout limits
// - Every profile is fetched at most once (visited set)
// - Hands back a read-only ProfileStore for the post-crawl passes
//
// Rust concepts:
// - Ownership: CrawlState is mutable while crawling, ProfileStore is not
// - Collections: HashMap for the visited set, Vec for level queues
// =============================================================================

mod queue;
mod state;

// Re-export the crawl API
pub use queue::{CrawlLimits, Scheduler};
pub use state::{CrawlState, ProfileStore, VisitedSet};
