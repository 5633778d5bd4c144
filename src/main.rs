//! diskweight - explore a scanned disk usage tree.
//!
//! Usage:
//!   diskweight SCAN.json                   Scan metadata and counters
//!   diskweight SCAN.json stats --node ID   Counters below one node
//!   diskweight SCAN.json find ID           Show one node
//!   diskweight SCAN.json path ID           Breadcrumbs from the root
//!   diskweight SCAN.json treemap           Ranked children for a treemap
//!   diskweight SCAN.json sunburst          Ring segments for a sunburst
//!   diskweight SCAN.json prune ID          Drop a deleted node from a scan
//!   diskweight view [treemap|sunburst]     Show or set the preferred chart

mod settings;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use diskweight_core::{LayoutConfig, Node, NodeId, ScanResult};
use diskweight_layout::{
    DeletionOutcome, NodeStats, SunburstLayout, ViewSession, locate, node_stats, path_to,
    project,
};

use settings::{ViewKind, ViewPreference};

#[derive(Parser)]
#[command(
    name = "diskweight",
    version,
    about = "Explore a scanned disk usage tree",
    long_about = "diskweight reads a scan export (JSON) and derives statistics, \
                  breadcrumbs, treemap items and sunburst geometry from it."
)]
struct Cli {
    /// Scan export to read
    scan: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show scan metadata and counters for the root (default)
    Summary,

    /// Count files and directories below a node
    Stats {
        /// Node to count below (defaults to the root)
        #[arg(long)]
        node: Option<String>,
    },

    /// Show a single node
    Find {
        /// Node identifier
        id: String,
    },

    /// Show the path from the root to a node
    Path {
        /// Node identifier
        id: String,
    },

    /// Rank a node's children for a treemap
    Treemap {
        /// Node to project (defaults to the root)
        #[arg(long)]
        node: Option<String>,

        /// Maximum number of items
        #[arg(short = 'n', long, default_value = "20")]
        max_items: usize,
    },

    /// Compute sunburst ring segments for a node
    Sunburst {
        /// Node at the centre (defaults to the root)
        #[arg(long)]
        node: Option<String>,

        /// Deepest level to expand
        #[arg(short = 'l', long, default_value = "4")]
        max_level: u32,

        /// Hide segments narrower than this many degrees
        #[arg(long, default_value = "0")]
        min_sweep: f64,
    },

    /// Remove a deleted node from a scan export
    Prune {
        /// Identifier of the deleted node
        id: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Subtract the removed size from every ancestor
        #[arg(long)]
        resize: bool,
    },

    /// Show or set the preferred chart
    View {
        /// Chart to remember
        kind: Option<ViewKind>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let scan = || load_scan(cli.scan.as_deref());

    match cli.command.unwrap_or(Command::Summary) {
        Command::Summary => run_summary(&scan()?, cli.format)?,
        Command::Stats { node } => run_stats(&scan()?, node.as_deref(), cli.format)?,
        Command::Find { id } => run_find(&scan()?, &id, cli.format)?,
        Command::Path { id } => run_path(&scan()?, &id, cli.format)?,
        Command::Treemap { node, max_items } => {
            run_treemap(&scan()?, node.as_deref(), max_items, cli.format)?
        }
        Command::Sunburst {
            node,
            max_level,
            min_sweep,
        } => run_sunburst(&scan()?, node.as_deref(), max_level, min_sweep, cli.format)?,
        Command::Prune { id, output, resize } => run_prune(&scan()?, &id, output, resize)?,
        Command::View { kind } => run_view(kind, cli.format)?,
    }

    Ok(())
}

/// Install a stderr subscriber; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// Read the scan export named on the command line.
fn load_scan(path: Option<&Path>) -> Result<ScanResult> {
    let path =
        path.ok_or_else(|| eyre!("No scan export given; usage: diskweight <SCAN_JSON> [COMMAND]"))?;
    let file = File::open(path).wrap_err_with(|| format!("Cannot open {}", path.display()))?;
    let scan = ScanResult::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("Invalid scan export {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        files = scan.total_files,
        directories = scan.total_directories,
        "Loaded scan"
    );
    Ok(scan)
}

/// Resolve `--node`, defaulting to the root.
fn select_node(scan: &ScanResult, id: Option<&str>) -> Result<Arc<Node>> {
    match id {
        None => Ok(Arc::clone(&scan.root)),
        Some(id) => locate(Some(&scan.root), &NodeId::new(id))
            .ok_or_else(|| eyre!("Node not found: {}", id)),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    root: &'a str,
    path: &'a str,
    total_size: u64,
    total_files: u64,
    total_directories: u64,
    scan_started_at: String,
    scan_duration_ms: u64,
    root_stats: NodeStats,
    view: &'static str,
}

/// Print scan metadata.
fn run_summary(scan: &ScanResult, format: OutputFormat) -> Result<()> {
    let view = ViewPreference::load().view;
    let root_stats = node_stats(Some(&scan.root));

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(60));
            println!(" {} - {}", scan.root.path, format_size(scan.total_size));
            println!(
                " {} files, {} directories",
                scan.total_files, scan.total_directories
            );
            println!(
                " Root holds {} files, {} directories below it",
                root_stats.total_files, root_stats.total_directories
            );
            println!(
                " Scanned {} in {:.2}s",
                scan.scan_started_at.format("%Y-%m-%d %H:%M:%S UTC"),
                scan.scan_duration().as_secs_f64()
            );
            println!(" Preferred view: {}", view.as_str());
            println!("{}", "─".repeat(60));
            println!();
        }
        OutputFormat::Json => print_json(&SummaryOutput {
            root: scan.root.id.as_str(),
            path: scan.root.path.as_str(),
            total_size: scan.total_size,
            total_files: scan.total_files,
            total_directories: scan.total_directories,
            scan_started_at: scan.scan_started_at.to_rfc3339(),
            scan_duration_ms: scan.scan_duration_ms,
            root_stats,
            view: view.as_str(),
        })?,
    }

    Ok(())
}

/// Print descendant counters for a node.
fn run_stats(scan: &ScanResult, node: Option<&str>, format: OutputFormat) -> Result<()> {
    let node = select_node(scan, node)?;
    let stats = node_stats(Some(&node));

    match format {
        OutputFormat::Text => {
            println!(" {} ({})", node.name, node.path);
            println!("   Size:        {}", format_size(stats.total_size));
            println!("   Files:       {}", stats.total_files);
            println!("   Directories: {}", stats.total_directories);
        }
        OutputFormat::Json => print_json(&stats)?,
    }

    Ok(())
}

#[derive(Serialize)]
struct NodeRow<'a> {
    id: &'a str,
    name: &'a str,
    path: &'a str,
    size: u64,
    kind: &'static str,
    children: usize,
    hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified_at: Option<String>,
}

impl<'a> NodeRow<'a> {
    fn new(node: &'a Node) -> Self {
        Self {
            id: node.id.as_str(),
            name: node.name.as_str(),
            path: node.path.as_str(),
            size: node.size,
            kind: if node.is_dir() { "directory" } else { "file" },
            children: node.child_count(),
            hidden: node.hidden,
            modified_at: node.modified_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Print one node.
fn run_find(scan: &ScanResult, id: &str, format: OutputFormat) -> Result<()> {
    let node = locate(Some(&scan.root), &NodeId::new(id))
        .ok_or_else(|| eyre!("Node not found: {}", id))?;
    let row = NodeRow::new(&node);

    match format {
        OutputFormat::Text => {
            println!(" {}{}", row.name, if node.is_dir() { "/" } else { "" });
            println!("   Id:       {}", row.id);
            println!("   Path:     {}", row.path);
            println!("   Size:     {}", format_size(row.size));
            println!("   Kind:     {}", row.kind);
            println!("   Children: {}", row.children);
            if let Some(modified) = &row.modified_at {
                println!("   Modified: {modified}");
            }
            if row.hidden {
                println!("   Hidden");
            }
        }
        OutputFormat::Json => print_json(&row)?,
    }

    Ok(())
}

/// Print breadcrumbs from the root to a node.
fn run_path(scan: &ScanResult, id: &str, format: OutputFormat) -> Result<()> {
    let path = path_to(Some(&scan.root), &NodeId::new(id));
    if path.is_empty() {
        return Err(eyre!("Node not found: {}", id));
    }

    match format {
        OutputFormat::Text => {
            let names: Vec<&str> = path.iter().map(|n| n.name.as_str()).collect();
            println!(" {}", names.join(" › "));
        }
        OutputFormat::Json => {
            let rows: Vec<NodeRow> = path.iter().map(|n| NodeRow::new(n)).collect();
            print_json(&rows)?;
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct TreemapRow<'a> {
    id: &'a str,
    name: &'a str,
    size: u64,
    share: f64,
}

/// Print ranked children of a node.
fn run_treemap(
    scan: &ScanResult,
    node: Option<&str>,
    max_items: usize,
    format: OutputFormat,
) -> Result<()> {
    let node = select_node(scan, node)?;
    let view = project(Some(&node), max_items);

    match format {
        OutputFormat::Text => {
            println!();
            println!(" {} - {}", node.name, format_size(view.total_size));
            println!("{}", "─".repeat(70));
            if view.is_empty() {
                println!(" Nothing to show.");
            }
            for item in &view.items {
                let ratio = item.size as f64 / view.max_item_size.max(1) as f64;
                println!(
                    " {:<36} {:>10} {:>5.1}% {}",
                    truncate(&item.name, 36),
                    format_size(item.size),
                    item.share_of(view.total_size),
                    make_bar(ratio, 12)
                );
            }
            let shown: u64 = view.items.iter().map(|i| i.size).sum();
            if shown < view.total_size {
                println!(
                    " {:<36} {:>10} (not shown)",
                    "…",
                    format_size(view.total_size - shown)
                );
            }
        }
        OutputFormat::Json => {
            let rows: Vec<TreemapRow> = view
                .items
                .iter()
                .map(|item| TreemapRow {
                    id: item.id().as_str(),
                    name: item.name.as_str(),
                    size: item.size,
                    share: item.share_of(view.total_size),
                })
                .collect();
            print_json(&serde_json::json!({
                "items": rows,
                "maxItemSize": view.max_item_size,
                "totalSize": view.total_size,
            }))?;
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct SegmentRow<'a> {
    id: &'a str,
    name: &'a str,
    size: u64,
    level: u32,
    start_angle: f64,
    end_angle: f64,
    inner_radius: f64,
    outer_radius: f64,
}

/// Print sunburst segments for a node.
fn run_sunburst(
    scan: &ScanResult,
    node: Option<&str>,
    max_level: u32,
    min_sweep: f64,
    format: OutputFormat,
) -> Result<()> {
    let node = select_node(scan, node)?;

    let config = LayoutConfig::builder()
        .max_level(max_level)
        .build()
        .wrap_err("Invalid layout options")?;
    let segments = SunburstLayout::from(&config)
        .layout_root(&node)
        .wrap_err("Cannot lay out sunburst")?;
    let visible = segments.iter().filter(|s| s.sweep() >= min_sweep);

    match format {
        OutputFormat::Text => {
            for segment in visible {
                let indent = "  ".repeat(segment.level as usize);
                println!(
                    "{}{:<30} {:>10}  {:>7.2}°..{:>7.2}°  r {:>6.1}..{:>6.1}",
                    indent,
                    truncate(&segment.node.name, 30),
                    format_size(segment.node.size),
                    segment.start_angle,
                    segment.end_angle,
                    segment.inner_radius,
                    segment.outer_radius
                );
            }
        }
        OutputFormat::Json => {
            let rows: Vec<SegmentRow> = visible
                .map(|s| SegmentRow {
                    id: s.node.id.as_str(),
                    name: s.node.name.as_str(),
                    size: s.node.size,
                    level: s.level,
                    start_angle: s.start_angle,
                    end_angle: s.end_angle,
                    inner_radius: s.inner_radius,
                    outer_radius: s.outer_radius,
                })
                .collect();
            print_json(&rows)?;
        }
    }

    Ok(())
}

/// Drop a node from a scan export after it was deleted on disk.
fn run_prune(scan: &ScanResult, id: &str, output: Option<PathBuf>, resize: bool) -> Result<()> {
    let pruned = prune_scan(scan, &NodeId::new(id), resize)?;

    match output {
        Some(output_path) => {
            let file = File::create(&output_path)
                .wrap_err_with(|| format!("Cannot create {}", output_path.display()))?;
            let mut writer = BufWriter::new(file);
            pruned.to_writer(&mut writer)?;
            writer.flush()?;
            eprintln!("Wrote {}", output_path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            pruned.to_writer(&mut lock)?;
            writeln!(lock)?;
        }
    }

    Ok(())
}

/// Remove `target` from the tree and subtract its subtree from the scan counters.
fn prune_scan(scan: &ScanResult, target: &NodeId, resize: bool) -> Result<ScanResult> {
    let removed = locate(Some(&scan.root), target)
        .ok_or_else(|| eyre!("Node not found: {}", target))?;
    let below = node_stats(Some(&removed));

    let config = LayoutConfig::builder()
        .resize_on_prune(resize)
        .build()
        .wrap_err("Invalid layout options")?;
    let mut session = ViewSession::with_config(Arc::clone(&scan.root), config);
    session
        .apply_deletion(target, DeletionOutcome::Deleted)
        .wrap_err("Cannot prune node")?;

    Ok(scan.after_removal(
        Arc::clone(session.root()),
        removed.size,
        below.total_files + u64::from(removed.is_file()),
        below.total_directories + u64::from(removed.is_dir()),
    ))
}

/// Show or persist the preferred chart.
fn run_view(kind: Option<ViewKind>, format: OutputFormat) -> Result<()> {
    let mut prefs = ViewPreference::load();

    if let Some(kind) = kind {
        prefs.view = kind;
        let path = prefs.save().wrap_err("Failed to save settings")?;
        tracing::info!(path = %path.display(), view = kind.as_str(), "Saved view preference");
    }

    match format {
        OutputFormat::Text => println!("{}", prefs.view.as_str()),
        OutputFormat::Json => print_json(&prefs)?,
    }

    Ok(())
}

/// Create a simple bar.
fn make_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Truncate a string to at most `max_len` characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
