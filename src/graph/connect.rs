// src/graph/connect.rs
// =============================================================================
// Builds the co-reference graph from a finished crawl.
//
// Every page lists the profiles it references, visited or not. Keeping only
// the references that point at visited profiles (and dropping self-references)
// gives each profile its neighbours in the graph we actually observed.
//
// An empty neighbour set is stored as None: the profile table writes both the
// same way (an empty cell), and readers must treat them the same.
// =============================================================================

use crate::crawl::ProfileStore;
use std::collections::BTreeSet;

/// Visited neighbours of every record, by store position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connections {
    connected: Vec<Option<BTreeSet<String>>>,
}

impl Connections {
    // Intersects each record's references with the visited set
    //
    // One pass over all references, with a hash lookup per reference.
    pub fn resolve(store: &ProfileStore) -> Self {
        let visited = store.visited();

        let connected = store
            .records()
            .iter()
            .map(|record| {
                let neighbours: BTreeSet<String> = record
                    .dest_childs
                    .iter()
                    .filter(|id| **id != record.dest_id && visited.contains(id))
                    .cloned()
                    .collect();

                if neighbours.is_empty() {
                    None
                } else {
                    Some(neighbours)
                }
            })
            .collect();

        Self { connected }
    }

    /// Neighbours of the record at `index` (None when it has none)
    pub fn of(&self, index: usize) -> Option<&BTreeSet<String>> {
        self.connected.get(index).and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::CrawlState;
    use crate::profile::ProfileRecord;

    fn record(id: &str, source: Option<&str>, childs: &str) -> ProfileRecord {
        let mut record = ProfileRecord::unreadable(source.map(str::to_string), id.to_string(), 0);
        record.dest_childs = childs.split_whitespace().map(str::to_string).collect();
        record
    }

    fn store(records: Vec<ProfileRecord>) -> ProfileStore {
        let mut state = CrawlState::new();
        for r in records {
            state.record(r);
        }
        state.finish()
    }

    fn set(ids: &str) -> BTreeSet<String> {
        ids.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_keeps_only_visited_references() {
        let store = store(vec![
            record("root", None, "a b stranger"),
            record("a", Some("root"), "root nobody"),
            record("b", Some("root"), ""),
        ]);
        let connections = Connections::resolve(&store);

        assert_eq!(connections.of(0), Some(&set("a b")));
        assert_eq!(connections.of(1), Some(&set("root")));
        assert_eq!(connections.of(2), None);
    }

    #[test]
    fn test_self_reference_is_dropped() {
        let store = store(vec![record("root", None, "root")]);
        let connections = Connections::resolve(&store);
        assert_eq!(connections.of(0), None);
    }

    #[test]
    fn test_connected_is_subset_of_childs_and_visited() {
        let store = store(vec![
            record("root", None, "a b x"),
            record("a", Some("root"), "a b y"),
            record("b", Some("root"), "root a z"),
        ]);
        let connections = Connections::resolve(&store);

        for (i, r) in store.records().iter().enumerate() {
            if let Some(connected) = connections.of(i) {
                assert!(connected.is_subset(&r.dest_childs));
                assert!(connected.iter().all(|id| store.visited().contains(id)));
                assert!(!connected.contains(&r.dest_id));
            }
        }
    }
}
