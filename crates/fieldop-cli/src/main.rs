use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use fieldop_eval::{Pipeline, PipelineOutcome, Registry, compile_asset, validate_asset};
use fieldop_parser::{Asset, parse_asset_directory, parse_asset_file, parse_definition};

#[derive(Parser)]
#[command(name = "fieldop")]
#[command(about = "Parse, validate, and run per-field operator assets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single asset YAML file and print the parsed definitions as JSON
    Parse {
        /// Path to an asset YAML file
        path: PathBuf,

        /// Pretty-print JSON output
        #[arg(short, long, default_value_t = true)]
        pretty: bool,
    },

    /// Compile every definition in an asset file or directory and report diagnostics
    Validate {
        /// Path to an asset YAML file or a directory of assets
        path: PathBuf,

        /// Show each compiled operator, not just the summary
        #[arg(short, long)]
        verbose: bool,
    },

    /// Compile an asset and apply it to JSON events
    ///
    /// Events can be provided as a single JSON string (--event) or as
    /// NDJSON (newline-delimited JSON) from stdin. Transformed events are
    /// printed to stdout; dropped and errored events are reported on
    /// stderr.
    Run {
        /// Path to an asset YAML file
        #[arg(short, long)]
        asset: PathBuf,

        /// A single event as a JSON string (if omitted, reads NDJSON from stdin)
        #[arg(short, long)]
        event: Option<String>,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { path, pretty } => cmd_parse(path, pretty),
        Commands::Validate { path, verbose } => cmd_validate(path, verbose),
        Commands::Run {
            asset,
            event,
            pretty,
        } => cmd_run(asset, event, pretty),
    }
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

fn cmd_parse(path: PathBuf, pretty: bool) {
    let asset = load_asset(&path);

    let mut definitions = Vec::new();
    let mut errors = Vec::new();
    for op in &asset.operations {
        match parse_definition(&op.field, &op.text) {
            Ok(def) => definitions.push(def),
            Err(e) => errors.push(format!("{}: {e}", op.field)),
        }
    }

    if !errors.is_empty() {
        eprintln!("Warnings:");
        for err in &errors {
            eprintln!("  - {err}");
        }
    }
    print_json(&definitions, pretty);
}

fn cmd_validate(path: PathBuf, verbose: bool) {
    let registry = Registry::with_defaults();
    let (assets, load_errors) = load_assets(&path);

    let mut total_defs = 0usize;
    let mut diagnostics = Vec::new();
    for asset in &assets {
        total_defs += asset.operations.len();
        for diag in validate_asset(asset, &registry) {
            diagnostics.push((asset.name.clone(), diag));
        }
    }

    println!("Validated {} asset(s) from {}", assets.len(), path.display());
    println!("  Definitions:  {total_defs}");
    println!("  Load errors:  {}", load_errors.len());
    println!("  Diagnostics:  {}", diagnostics.len());

    for err in &load_errors {
        eprintln!("load error: {err}");
    }
    for (asset_name, diag) in &diagnostics {
        eprintln!("{asset_name}: {diag}");
    }

    if verbose {
        for asset in &assets {
            if let Ok(pipeline) = compile_asset(asset, &registry) {
                println!("\n{} compiles to {} expression(s):", asset.name, pipeline.len());
                for expr in pipeline.expressions() {
                    println!("  {} -> {}", expr.name(), expr.field());
                }
            }
        }
    }

    if !load_errors.is_empty() || !diagnostics.is_empty() {
        process::exit(1);
    }
}

fn cmd_run(asset_path: PathBuf, event_json: Option<String>, pretty: bool) {
    let asset = load_asset(&asset_path);
    let registry = Registry::with_defaults();

    let pipeline = match compile_asset(&asset, &registry) {
        Ok(p) => p,
        Err(diag) => {
            eprintln!("Error compiling {}: {diag}", asset.name);
            process::exit(1);
        }
    };

    eprintln!(
        "Loaded {} with {} expression(s) from {}",
        pipeline.name(),
        pipeline.len(),
        asset_path.display()
    );

    if let Some(json_str) = event_json {
        let mut event: serde_json::Value = match serde_json::from_str(&json_str) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("Invalid JSON event: {e}");
                process::exit(1);
            }
        };

        match pipeline.apply(&mut event) {
            PipelineOutcome::Continue => print_json(&event, pretty),
            PipelineOutcome::Dropped { expression } => {
                eprintln!("Event dropped by '{expression}'.");
            }
            PipelineOutcome::Errored {
                expression,
                field,
                reason,
            } => {
                eprintln!("Event errored in '{expression}' on field '{field}': {reason}");
                process::exit(1);
            }
        }
    } else {
        run_ndjson(&pipeline, pretty);
    }
}

/// Apply the pipeline to NDJSON events from stdin, one per line.
fn run_ndjson(pipeline: &Pipeline, pretty: bool) {
    let stdin = io::stdin();
    let mut line_num = 0u64;
    let mut continued = 0u64;
    let mut dropped = 0u64;
    let mut errored = 0u64;

    for line in stdin.lock().lines() {
        line_num += 1;
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading line {line_num}: {e}");
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let mut event: serde_json::Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("Invalid JSON on line {line_num}: {e}");
                continue;
            }
        };

        match pipeline.apply(&mut event) {
            PipelineOutcome::Continue => {
                continued += 1;
                print_json(&event, pretty);
            }
            PipelineOutcome::Dropped { .. } => dropped += 1,
            PipelineOutcome::Errored {
                expression,
                field,
                reason,
            } => {
                errored += 1;
                eprintln!("line {line_num}: '{expression}' on '{field}': {reason}");
            }
        }
    }

    eprintln!(
        "Processed {line_num} events: {continued} passed, {dropped} dropped, {errored} errored."
    );
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_asset(path: &PathBuf) -> Asset {
    match parse_asset_file(path) {
        Ok(asset) => asset,
        Err(e) => {
            eprintln!("Error parsing {}: {e}", path.display());
            process::exit(1);
        }
    }
}

fn load_assets(path: &PathBuf) -> (Vec<Asset>, Vec<String>) {
    if path.is_dir() {
        match parse_asset_directory(path) {
            Ok(set) => (set.assets, set.errors),
            Err(e) => {
                eprintln!("Error loading assets from {}: {e}", path.display());
                process::exit(1);
            }
        }
    } else {
        (vec![load_asset(path)], Vec::new())
    }
}

fn print_json(value: &impl serde::Serialize, pretty: bool) {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match json {
        Ok(j) => println!("{j}"),
        Err(e) => {
            eprintln!("JSON serialization error: {e}");
            process::exit(1);
        }
    }
}
