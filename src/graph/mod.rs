// src/graph/mod.rs
// =============================================================================
// Post-crawl analysis. Nothing in here fetches pages: both passes only read a
// finished ProfileStore.
//
// Submodules:
// - connect: which references point at visited profiles (graph edges)
// - degree: breadth-first distance from the root over those edges
// =============================================================================

mod connect;
mod degree;

pub use connect::Connections;
pub use degree::compute_degrees;
