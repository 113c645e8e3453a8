// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - crawl: log in, crawl profiles from a start profile, save the table
// - degrees: recompute graph degrees for a table saved earlier
// - export: turn a saved table into nodes/edges JSON for a graph viewer
//
// Rust concepts:
// - Derive macros: clap generates the parser from these types
// - Enums: one variant per subcommand
// =============================================================================

use crate::config::DEFAULT_CONFIG_PATH;
use crate::output::ExportKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "profile-crawler",
    version,
    about = "Crawl a profile network and measure how far each profile is from the start",
    long_about = "profile-crawler starts from one profile, follows the 'People also viewed' links \
                  breadth-first, and records every visited profile in a CSV table. Afterwards it \
                  computes each profile's real distance from the start profile within the crawled graph."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl profiles starting from one profile
    ///
    /// Example: profile-crawler crawl https://www.example.com/in/jane-doe/ --max-depth 3
    Crawl(CrawlArgs),

    /// Recompute graph degrees for a saved profile table
    ///
    /// Example: profile-crawler degrees profiles.csv
    Degrees {
        /// Profile table written by `crawl`
        table: PathBuf,

        /// Where to write the processed table (default: overwrite the input)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print the rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export a saved profile table as nodes and edges (JSON)
    ///
    /// Example: profile-crawler export profiles.csv --kind tree
    Export {
        /// Profile table written by `crawl` or `degrees`
        table: PathBuf,

        /// Which edges to export
        #[arg(long, value_enum, default_value_t = ExportKind::Graph)]
        kind: ExportKind,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Start profile: a profile URL (https://site/in/<id>/) or a bare identifier
    pub start: String,

    /// Number of levels to store, the start profile included
    #[arg(long, default_value_t = 3)]
    pub max_depth: usize,

    /// Related profiles to follow per profile (at most 10)
    #[arg(long, default_value_t = 3)]
    pub max_fanout: usize,

    /// Where to save the profile table
    #[arg(long, short, default_value = "profiles.csv")]
    pub output: PathBuf,

    /// Do not save the profile table
    #[arg(long)]
    pub no_save: bool,

    /// Skip post-processing (placeholder pictures and graph degrees)
    #[arg(long)]
    pub no_process: bool,

    /// Print the rows as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Session configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}
