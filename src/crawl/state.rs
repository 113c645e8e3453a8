// src/crawl/state.rs
// =============================================================================
// Who owns the crawl data, and when.
//
// - CrawlState: owned mutably by the scheduler while crawling. Records can only
//   be appended, and only for identifiers not seen before.
// - ProfileStore: what CrawlState turns into once the crawl is over. It has no
//   mutating methods, so the post-crawl passes can only read it.
//
// The visited set maps each identifier to its position in the store. It is
// the only thing that decides whether a profile has been seen before.
// =============================================================================

use crate::error::TableError;
use crate::profile::ProfileRecord;
use std::collections::HashMap;

/// Every identifier added to the store, with its position
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    index: HashMap<String, usize>,
}

impl VisitedSet {
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }
}

/// Crawl-phase state: append-only records plus the visited set
#[derive(Debug, Default)]
pub struct CrawlState {
    records: Vec<ProfileRecord>,
    visited: VisitedSet,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Appends a record and marks its identifier as visited
    ///
    /// Returns false (and stores nothing) if the identifier was already visited.
    pub fn record(&mut self, record: ProfileRecord) -> bool {
        if self.visited.contains(&record.dest_id) {
            return false;
        }
        self.visited
            .index
            .insert(record.dest_id.clone(), self.records.len());
        self.records.push(record);
        true
    }

    /// Ends the crawl phase
    pub fn finish(self) -> ProfileStore {
        ProfileStore {
            records: self.records,
            visited: self.visited,
        }
    }
}

/// Read-only view of a finished crawl
#[derive(Debug, Clone)]
pub struct ProfileStore {
    records: Vec<ProfileRecord>,
    visited: VisitedSet,
}

impl ProfileStore {
    /// Rebuilds a store from records loaded off disk
    pub fn from_records(records: Vec<ProfileRecord>) -> Result<Self, TableError> {
        let mut state = CrawlState::new();
        for record in records {
            let id = record.dest_id.clone();
            if !state.record(record) {
                return Err(TableError::DuplicateProfile(id));
            }
        }
        Ok(state.finish())
    }

    pub fn records(&self) -> &[ProfileRecord] {
        &self.records
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, id: &str) -> Option<&ProfileRecord> {
        self.visited.index_of(id).map(|i| &self.records[i])
    }

    /// Position of the root record (the one nobody led us to)
    pub fn root_index(&self) -> Option<usize> {
        self.records.iter().position(|r| r.is_root())
    }

    /// Deepest crawl level that actually got stored
    pub fn max_tree_degree(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.tree_degree)
            .max()
            .unwrap_or(0)
    }
}
