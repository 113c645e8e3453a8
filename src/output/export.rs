// src/output/export.rs
// =============================================================================
// Node/edge export of a profile table, for graph visualisation tools.
//
// Two views of the same table:
// - graph: edges are the co-reference links (dest_connected), node levels
//   are graph degrees
// - tree: edges follow the crawl (source_id -> dest_id), node levels are
//   tree degrees
//
// We only produce the JSON document; drawing it is someone else's job.
// =============================================================================

use super::table::ProfileRow;
use crate::profile::DEFAULT_PICTURE_URL;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// Co-reference graph, levelled by graph degree
    Graph,
    /// Crawl tree, levelled by tree degree
    Tree,
}

#[derive(Debug, Serialize)]
pub struct GraphExport {
    pub directed: bool,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Serialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub image: String,
    /// "title @ company" hover text
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

pub fn export_graph(rows: &[ProfileRow], kind: ExportKind) -> GraphExport {
    let nodes = rows
        .iter()
        .map(|row| {
            let details = row.to_record().details;
            Node {
                id: row.dest_id.clone(),
                label: details.name.clone().unwrap_or_else(|| row.dest_id.clone()),
                image: row.dest_pic.clone().unwrap_or_else(|| DEFAULT_PICTURE_URL.to_string()),
                title: details.description(),
                level: match kind {
                    ExportKind::Graph => row.graph_degree,
                    ExportKind::Tree => Some(row.tree_degree),
                },
            }
        })
        .collect();

    let edges = match kind {
        ExportKind::Graph => rows
            .iter()
            .flat_map(|row| {
                row.connected_ids().map(move |to| Edge {
                    from: row.dest_id.clone(),
                    to: to.to_string(),
                })
            })
            .collect(),
        ExportKind::Tree => rows
            .iter()
            .filter_map(|row| {
                Some(Edge {
                    from: row.source_id.clone()?,
                    to: row.dest_id.clone(),
                })
            })
            .collect(),
    };

    GraphExport {
        directed: kind == ExportKind::Tree,
        nodes,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, source: Option<&str>, tree: usize, connected: Option<&str>, graph: Option<usize>) -> ProfileRow {
        ProfileRow {
            source_id: source.map(str::to_string),
            dest_id: id.to_string(),
            dest_name: Some(format!("Name {}", id)),
            dest_title: Some("Engineer".to_string()),
            dest_company: Some("Acme".to_string()),
            dest_location: None,
            dest_school: None,
            dest_pic: None,
            dest_childs: connected.map(str::to_string),
            tree_degree: tree,
            dest_connected: connected.map(str::to_string),
            graph_degree: graph,
        }
    }

    fn edge(from: &str, to: &str) -> Edge {
        Edge {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    fn sample() -> Vec<ProfileRow> {
        vec![
            row("R", None, 0, Some("A,B"), Some(0)),
            row("A", Some("R"), 1, Some("B"), Some(1)),
            row("B", Some("A"), 2, None, Some(1)),
        ]
    }

    #[test]
    fn test_graph_export_uses_connections() {
        let export = export_graph(&sample(), ExportKind::Graph);

        assert!(!export.directed);
        assert_eq!(export.edges, vec![edge("R", "A"), edge("R", "B"), edge("A", "B")]);
        assert_eq!(export.nodes[2].level, Some(1));
        assert_eq!(export.nodes[0].title, "Engineer @ Acme");
        assert_eq!(export.nodes[0].image, DEFAULT_PICTURE_URL);
    }

    #[test]
    fn test_tree_export_follows_the_crawl() {
        let export = export_graph(&sample(), ExportKind::Tree);

        assert!(export.directed);
        assert_eq!(export.edges, vec![edge("R", "A"), edge("A", "B")]);
        assert_eq!(export.nodes[2].level, Some(2));
    }

    #[test]
    fn test_unprocessed_table_has_no_graph_levels() {
        let mut rows = sample();
        rows.iter_mut().for_each(|r| r.graph_degree = None);
        let json = serde_json::to_value(export_graph(&rows, ExportKind::Graph)).unwrap();
        assert!(json["nodes"][0].get("level").is_none());
    }
}
