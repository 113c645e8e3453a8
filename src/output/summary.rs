// src/output/summary.rs
// =============================================================================
// Prints the profile table as a human-readable table in the terminal.
// =============================================================================

use super::table::ProfileRow;
use std::collections::BTreeMap;

pub fn print_summary(rows: &[ProfileRow]) {
    // Print table header
    println!("{:<32} {:<28} {:<6} {:<6} {:<8}", "PROFILE", "NAME", "TREE", "GRAPH", "LINKS");
    println!("{}", "=".repeat(84));

    for row in rows {
        let name = row.dest_name.as_deref().unwrap_or("?");
        let graph = row
            .graph_degree
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let links = row.connected_ids().count();

        println!(
            "{:<32} {:<28} {:<6} {:<6} {:<8}",
            truncate(&row.dest_id, 32),
            truncate(name, 28),
            row.tree_degree,
            graph,
            links
        );
    }

    println!();

    // Profiles per graph degree (or per tree degree when graph degrees
    // were not computed)
    let mut per_level: BTreeMap<usize, usize> = BTreeMap::new();
    for row in rows {
        *per_level.entry(row.graph_degree.unwrap_or(row.tree_degree)).or_default() += 1;
    }

    println!("📊 Summary:");
    for (level, count) in &per_level {
        println!("   Degree {}: {}", level, count);
    }
    println!("   📋 Total: {}", rows.len());
}

// Shortens a cell so the columns stay aligned
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
