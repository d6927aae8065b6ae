//! dirgraph - render a directory hierarchy as a directed graph image.
//!
//! Usage:
//!   dirgraph [DIR]                       Render DIR (default: .) to graph.png
//!   dirgraph -i -o tree.svg [DIR]        Include files, write SVG
//!   dirgraph -n "My Project" [DIR]       Set the graph title
//!   dirgraph --help                      Show help

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use dirgraph_render::{DotGraph, GraphEmitter, GraphSink, RenderConfig};
use dirgraph_scan::{ScanConfig, Scanner};

#[derive(Parser)]
#[command(
    name = "dirgraph",
    version,
    about = "Generate a graph of directories",
    long_about = "dirgraph scans a directory tree and renders it as a directed \
                  graph image via Graphviz.\n\nThe output format is inferred \
                  from the output file extension (png, svg, pdf, ...)."
)]
struct Cli {
    /// The directory for which to generate the graph
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// The fill color of the nodes in the graph
    #[arg(short, long, default_value = dirgraph_render::DEFAULT_COLOR)]
    color: String,

    /// The name of the graph, shown as its title
    #[arg(short, long, default_value = "")]
    name: String,

    /// Include files in the generated graph
    #[arg(short, long)]
    include_files: bool,

    /// The name of the generated file
    #[arg(short, long, default_value = "graph.png")]
    output: PathBuf,

    /// The separation between the layers of the graph
    #[arg(short, long, default_value_t = 1.0)]
    separation: f64,

    /// Maximum directory depth to scan
    #[arg(long)]
    max_depth: Option<u32>,

    /// Entry names to ignore (repeatable; exact, `*suffix` or `prefix*`)
    #[arg(long = "ignore", value_name = "PATTERN")]
    ignore_patterns: Vec<String>,

    /// Skip hidden entries (dotfiles)
    #[arg(long)]
    no_hidden: bool,

    /// Also write the DOT source to this path
    #[arg(long, value_name = "PATH")]
    emit_dot: Option<PathBuf>,

    /// Export the scanned tree as JSON to this path
    #[arg(long, value_name = "PATH")]
    export_json: Option<PathBuf>,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let dir = cli.dir.canonicalize().context("Invalid directory")?;

    let scan_config = ScanConfig::builder()
        .root(dir)
        .max_depth(cli.max_depth)
        .include_hidden(!cli.no_hidden)
        .ignore_patterns(cli.ignore_patterns)
        .build()
        .context("Invalid scan configuration")?;

    let tree = Scanner::new().scan(&scan_config).context("Scan failed")?;

    if tree.has_warnings() {
        eprintln!("{} warning(s) during scan", tree.warnings.len());
    }

    let render_config = RenderConfig::builder()
        .color(cli.color)
        .title(cli.name)
        .include_files(cli.include_files)
        .separation(cli.separation)
        .build()
        .context("Invalid render configuration")?;

    let mut graph = DotGraph::new();
    GraphEmitter::with_config(render_config).emit(&tree, &mut graph);

    if let Some(path) = cli.emit_dot {
        fs::write(&path, graph.dot_source())
            .with_context(|| format!("Failed to write DOT source to {}", path.display()))?;
        eprintln!("Wrote DOT source to {}", path.display());
    }

    if let Some(path) = cli.export_json {
        let json = serde_json::to_string_pretty(&tree)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to export JSON to {}", path.display()))?;
        eprintln!("Exported scan to {}", path.display());
    }

    graph.render(&cli.output).context("Render failed")?;

    eprintln!(
        "{} directories, {} files ({:.2}s) -> {}",
        tree.total_dirs(),
        tree.total_files(),
        tree.scan_duration.as_secs_f64(),
        cli.output.display()
    );

    Ok(())
}

/// Route tracing output to stderr; RUST_LOG overrides the -v flags.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
