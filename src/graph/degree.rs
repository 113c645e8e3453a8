// src/graph/degree.rs
// =============================================================================
// Measures how far each visited profile really is from the root.
//
// The crawl's tree_degree only says *when* the crawler reached a profile. The
// graph degree is the breadth-first distance from the root over the
// co-reference graph (see connect.rs), which we can only build once every
// page has been read.
//
// Algorithm:
// 1. The root gets degree 0; its neighbours form the first frontier
// 2. For level 1..max_depth: every profile in the frontier gets that level
//    (unless it already has one), and its neighbours that were never in any
//    frontier form the next frontier
// 3. Whoever is left without a degree gets max_depth: present in the crawl,
//    but not reachable within the levels we explored
//
// max_depth is the deepest tree_degree in the store, so the "unreachable"
// value follows how deep the crawl actually went.
// =============================================================================

use super::Connections;
use crate::crawl::ProfileStore;
use std::collections::{BTreeSet, HashSet};

// Computes the graph degree of every record, by store position
//
// Returns None when root_index is not a position in the store.
pub fn compute_degrees(
    store: &ProfileStore,
    connections: &Connections,
    root_index: usize,
) -> Option<Vec<usize>> {
    label_levels(store, connections, root_index, store.max_tree_degree())
}

// Same as compute_degrees with an explicit level bound
fn label_levels(
    store: &ProfileStore,
    connections: &Connections,
    root_index: usize,
    max_depth: usize,
) -> Option<Vec<usize>> {
    let root = store.records().get(root_index)?;

    let mut degrees: Vec<Option<usize>> = vec![None; store.len()];
    degrees[root_index] = Some(0);

    let mut frontier: BTreeSet<&str> = neighbours(connections, root_index).collect();
    let mut placed: HashSet<&str> = frontier.iter().copied().collect();
    placed.insert(root.dest_id.as_str());

    for level in 1..max_depth {
        let mut next: BTreeSet<&str> = BTreeSet::new();

        for id in &frontier {
            let Some(index) = store.visited().index_of(id) else {
                continue;
            };
            if degrees[index].is_none() {
                degrees[index] = Some(level);
            }
            next.extend(neighbours(connections, index).filter(|n| !placed.contains(n)));
        }

        if next.is_empty() {
            break;
        }
        placed.extend(next.iter().copied());
        frontier = next;
    }

    Some(
        degrees
            .into_iter()
            .map(|degree| degree.unwrap_or(max_depth))
            .collect(),
    )
}

fn neighbours(connections: &Connections, index: usize) -> impl Iterator<Item = &str> {
    connections
        .of(index)
        .into_iter()
        .flat_map(|set| set.iter().map(String::as_str))
}
