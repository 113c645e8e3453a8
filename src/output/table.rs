// src/output/table.rs
// =============================================================================
// The profile table: one row per visited profile, saved as CSV.
//
// Columns:
//   source_id, dest_id, dest_name, dest_title, dest_company, dest_location,
//   dest_school, dest_pic, dest_childs, tree_degree, dest_connected,
//   graph_degree
//
// Identifier sets (dest_childs, dest_connected) are written as one
// comma-separated cell. Empty sets and missing values are empty cells.
//
// Building the table is also where post-processing happens:
// - dest_connected is always filled in (Intersection of references and
//   visited profiles)
// - with post-processing on, missing pictures get the placeholder and
//   graph_degree is computed
// =============================================================================

use crate::crawl::ProfileStore;
use crate::error::TableError;
use crate::graph::{compute_degrees, Connections};
use crate::profile::{ProfileDetails, ProfileRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::{Read, Write};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub source_id: Option<String>,
    pub dest_id: String,
    pub dest_name: Option<String>,
    pub dest_title: Option<String>,
    pub dest_company: Option<String>,
    pub dest_location: Option<String>,
    pub dest_school: Option<String>,
    pub dest_pic: Option<String>,
    pub dest_childs: Option<String>,
    pub tree_degree: usize,
    pub dest_connected: Option<String>,
    pub graph_degree: Option<usize>,
}

impl ProfileRow {
    /// Identifiers in dest_connected
    pub fn connected_ids(&self) -> impl Iterator<Item = &str> {
        split_ids(self.dest_connected.as_deref())
    }

    /// Turns the row back into the record it was built from
    pub fn to_record(&self) -> ProfileRecord {
        ProfileRecord {
            source_id: self.source_id.clone(),
            dest_id: self.dest_id.clone(),
            details: ProfileDetails {
                name: self.dest_name.clone(),
                title: self.dest_title.clone(),
                company: self.dest_company.clone(),
                location: self.dest_location.clone(),
                school: self.dest_school.clone(),
                picture: self.dest_pic.clone(),
            },
            dest_childs: split_ids(self.dest_childs.as_deref())
                .map(str::to_string)
                .collect(),
            tree_degree: self.tree_degree,
        }
    }
}

// Builds the table for a finished crawl
//
// Parameters:
//   store: the crawled profiles
//   post_process: fill in placeholder pictures and graph degrees
pub fn build_table(store: &ProfileStore, post_process: bool) -> Vec<ProfileRow> {
    let connections = Connections::resolve(store);

    let degrees = if post_process {
        let degrees = store
            .root_index()
            .and_then(|root| compute_degrees(store, &connections, root));
        if degrees.is_none() {
            warn!("No root profile in the table; graph degrees left empty");
        }
        degrees
    } else {
        None
    };

    store
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let details = &record.details;
            let picture = if post_process {
                Some(details.picture_or_default().to_string())
            } else {
                details.picture.clone()
            };

            ProfileRow {
                source_id: record.source_id.clone(),
                dest_id: record.dest_id.clone(),
                dest_name: details.name.clone(),
                dest_title: details.title.clone(),
                dest_company: details.company.clone(),
                dest_location: details.location.clone(),
                dest_school: details.school.clone(),
                dest_pic: picture,
                dest_childs: join_ids(&record.dest_childs),
                tree_degree: record.tree_degree,
                dest_connected: connections.of(i).and_then(join_ids),
                graph_degree: degrees.as_ref().map(|d| d[i]),
            }
        })
        .collect()
}

// Rebuilds a store from saved rows
pub fn rows_to_store(rows: &[ProfileRow]) -> Result<ProfileStore, TableError> {
    if rows.is_empty() {
        return Err(TableError::Empty);
    }
    ProfileStore::from_records(rows.iter().map(ProfileRow::to_record).collect())
}

pub fn write_rows<W: Write>(writer: W, rows: &[ProfileRow]) -> Result<(), TableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn read_rows<R: Read>(reader: R) -> Result<Vec<ProfileRow>, TableError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for row in csv_reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

pub fn save_table(path: &Path, rows: &[ProfileRow]) -> Result<(), TableError> {
    let file = std::fs::File::create(path)?;
    write_rows(file, rows)
}

pub fn load_table(path: &Path) -> Result<Vec<ProfileRow>, TableError> {
    let file = std::fs::File::open(path)?;
    read_rows(file)
}

fn join_ids(ids: &BTreeSet<String>) -> Option<String> {
    if ids.is_empty() {
        None
    } else {
        Some(ids.iter().map(String::as_str).collect::<Vec<_>>().join(","))
    }
}

fn split_ids(cell: Option<&str>) -> impl Iterator<Item = &str> {
    cell.unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::CrawlState;
    use crate::profile::DEFAULT_PICTURE_URL;

    fn sample_store() -> ProfileStore {
        let mut state = CrawlState::new();
        let rows = [
            ("R", None, 0, "A B outsider"),
            ("A", Some("R"), 1, "R C"),
            ("B", Some("R"), 1, ""),
            ("C", Some("A"), 2, "A"),
        ];
        for (id, source, degree, childs) in rows {
            let mut record = ProfileRecord::unreadable(source.map(str::to_string), id.to_string(), degree);
            record.dest_childs = childs.split_whitespace().map(str::to_string).collect();
            record.details.name = Some(format!("{} name", id));
            state.record(record);
        }
        state.finish()
    }

    #[test]
    fn test_build_table_with_post_processing() {
        let rows = build_table(&sample_store(), true);

        assert_eq!(rows[0].dest_childs.as_deref(), Some("A,B,outsider"));
        assert_eq!(rows[0].dest_connected.as_deref(), Some("A,B"));
        assert_eq!(rows[2].dest_connected, None);
        assert_eq!(rows[0].dest_pic.as_deref(), Some(DEFAULT_PICTURE_URL));

        let degrees: Vec<Option<usize>> = rows.iter().map(|r| r.graph_degree).collect();
        assert_eq!(degrees, vec![Some(0), Some(1), Some(1), Some(2)]);
    }

    #[test]
    fn test_build_table_without_post_processing() {
        let rows = build_table(&sample_store(), false);

        // dest_connected is always computed
        assert_eq!(rows[1].dest_connected.as_deref(), Some("C,R"));
        assert!(rows.iter().all(|r| r.graph_degree.is_none()));
        assert!(rows.iter().all(|r| r.dest_pic.is_none()));
    }

    #[test]
    fn test_csv_header_and_empty_cells() {
        let rows = build_table(&sample_store(), false);
        let mut buffer = Vec::new();
        write_rows(&mut buffer, &rows).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("source_id,dest_id,dest_name,dest_title,dest_company,dest_location,dest_school,dest_pic,dest_childs,tree_degree,dest_connected,graph_degree")
        );
        assert_eq!(lines.next(), Some(",R,R name,,,,,,\"A,B,outsider\",0,\"A,B\","));
    }

    #[test]
    fn test_saved_table_can_be_post_processed_later() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.csv");

        save_table(&path, &build_table(&sample_store(), false)).unwrap();
        let loaded = load_table(&path).unwrap();
        let store = rows_to_store(&loaded).unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(store.get("A").map(|r| r.dest_childs.len()), Some(2));
        assert_eq!(build_table(&store, true), build_table(&sample_store(), true));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(matches!(rows_to_store(&[]), Err(TableError::Empty)));
    }
}
