// src/output/mod.rs
// =============================================================================
// Everything that leaves the program: the CSV profile table, the node/edge
// export, and the terminal summary.
//
// Submodules:
// - table: builds, saves and loads the profile table
// - export: JSON nodes/edges for visualisation tools
// - summary: human-readable table printed after a run
// =============================================================================

mod export;
mod summary;
mod table;

pub use export::{export_graph, ExportKind};
pub use summary::print_summary;
pub use table::{build_table, load_table, rows_to_store, save_table, ProfileRow};
