// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (RUST_LOG, warnings only by default)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 2 = error)
//
// Rust concepts used:
// - async/await: reqwest and the politeness delay are async
// - Result<T, E> with anyhow: errors bubble up with context attached
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - session configuration file
mod crawl;    // src/crawl/ - breadth-first profile crawl
mod error;    // src/error.rs - typed errors
mod fetch;    // src/fetch/ - login session and page extraction
mod graph;    // src/graph/ - post-crawl graph analysis
mod output;   // src/output/ - CSV table, export, terminal summary
mod profile;  // src/profile/ - identifiers and records

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::{Cli, Commands, CrawlArgs};
use config::Config;
use crawl::{CrawlLimits, Scheduler};
use fetch::{ProfileSession, MAX_RELATED_PROFILES};
use output::{ExportKind, ProfileRow};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics go to stderr so they never mix with table or JSON output
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl(args) => handle_crawl(args).await,
        Commands::Degrees { table, output, json } => handle_degrees(&table, output, json),
        Commands::Export { table, kind, output } => handle_export(&table, kind, output.as_deref()),
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(args: CrawlArgs) -> Result<i32> {
    let root_id = start_id(&args.start)?;
    let limits = CrawlLimits::new(args.max_depth, args.max_fanout);
    let chatty = !args.json;

    if chatty {
        println!("🔍 Crawling profiles from: {}", root_id);
        println!("📊 Max depth: {}, max fanout: {}", limits.max_depth, limits.max_fanout);
        if args.max_fanout > MAX_RELATED_PROFILES {
            println!("   (pages list at most {} related profiles)", MAX_RELATED_PROFILES);
        }
    }

    // Logging in is the only step that can stop the crawl
    let config = Config::load(&args.config)
        .with_context(|| format!("Could not load session config {}", args.config.display()))?;
    let session = ProfileSession::connect(&config.session)
        .await
        .context("Could not log in")?;

    let started = Instant::now();
    let store = Scheduler::new(session, limits)
        .with_progress(chatty)
        .run(&root_id)
        .await;

    if chatty {
        println!(
            "📄 Crawled {} profile(s) in {:.1?}",
            store.len(),
            started.elapsed()
        );
    }

    let rows = output::build_table(&store, !args.no_process);

    if !args.no_save {
        output::save_table(&args.output, &rows)
            .with_context(|| format!("Could not save {}", args.output.display()))?;
        if chatty {
            println!("💾 Saved profile table to {}", args.output.display());
        }
    }

    print_results(&rows, args.json)?;
    Ok(0)
}

// Handles the 'degrees' subcommand
fn handle_degrees(table: &Path, destination: Option<PathBuf>, json: bool) -> Result<i32> {
    let rows = output::load_table(table)
        .with_context(|| format!("Could not read {}", table.display()))?;
    let store = output::rows_to_store(&rows)
        .with_context(|| format!("Invalid profile table {}", table.display()))?;

    let rows = output::build_table(&store, true);

    let target = destination.unwrap_or_else(|| table.to_path_buf());
    output::save_table(&target, &rows)
        .with_context(|| format!("Could not save {}", target.display()))?;
    if !json {
        println!("💾 Saved processed table to {}", target.display());
    }

    print_results(&rows, json)?;
    Ok(0)
}

// Handles the 'export' subcommand
fn handle_export(table: &Path, kind: ExportKind, destination: Option<&Path>) -> Result<i32> {
    let rows = output::load_table(table)
        .with_context(|| format!("Could not read {}", table.display()))?;

    let export = output::export_graph(&rows, kind);
    let json = serde_json::to_string_pretty(&export)?;

    match destination {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Could not write {}", path.display()))?;
            println!(
                "🕸️  Exported {} node(s) and {} edge(s) to {}",
                export.nodes.len(),
                export.edges.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(0)
}

// Accepts either a profile URL or a bare identifier
fn start_id(start: &str) -> Result<String> {
    if let Some(id) = profile::extract_id(start) {
        return Ok(id);
    }

    let bare = start.trim().trim_matches('/');
    if bare.is_empty() || bare.contains('/') {
        return Err(anyhow!("Not a profile URL or identifier: {}", start));
    }
    Ok(bare.to_string())
}

// Prints the rows either as a table or JSON
fn print_results(rows: &[ProfileRow], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(rows)?;
        println!("{}", json_output);
    } else {
        println!();
        output::print_summary(rows);
    }
    Ok(())
}
