use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use topoviz_core::{Fetcher, TopologyGraph};
use topoviz_render::{LayoutKind, RenderOptions, Renderer, export_snapshot, save_png};
use tracing::{Level, info};
use url::Url;

/// Everything one run needs, gathered from the command line
#[derive(Debug, Clone)]
pub struct VisualizeOptions {
    pub source: Url,
    pub output: PathBuf,
    pub export_json: Option<PathBuf>,
    pub show: bool,
    pub expand_unknown: bool,
    pub quiet: bool,
    pub verbosity: u8,
    pub render: RenderOptions,
}

impl VisualizeOptions {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let source = matches
            .get_one::<Url>("URL")
            .cloned()
            .ok_or_else(|| anyhow!("No source URL given"))?;
        let output = matches
            .get_one::<String>("output")
            .map(|raw| resolve_output_path(raw))
            .ok_or_else(|| anyhow!("No output path given"))?;
        let layout_name = matches
            .get_one::<String>("layout")
            .map(String::as_str)
            .unwrap_or("spring");
        let layout = LayoutKind::from_str(layout_name)
            .ok_or_else(|| anyhow!("Unknown layout '{}'", layout_name))?;

        let defaults = RenderOptions::default();
        let render = RenderOptions {
            width_in: matches.get_one::<f64>("width").copied().unwrap_or(defaults.width_in),
            height_in: matches.get_one::<f64>("height").copied().unwrap_or(defaults.height_in),
            dpi: matches.get_one::<u32>("dpi").copied().unwrap_or(defaults.dpi),
            font_size: matches.get_one::<f64>("font-size").copied().unwrap_or(defaults.font_size),
            scale: matches.get_one::<f64>("scale").copied().unwrap_or(defaults.scale),
            layout,
            seed: matches.get_one::<u64>("seed").copied(),
        };

        Ok(Self {
            source,
            output,
            export_json: matches
                .get_one::<PathBuf>("export-json")
                .map(|path| resolve_output_path(&path.to_string_lossy())),
            show: !matches.get_flag("no-show"),
            expand_unknown: matches.get_flag("expand-unknown"),
            quiet: matches.get_flag("quiet"),
            verbosity: matches.get_count("verbose"),
            render,
        })
    }
}

/// Expand a leading `~` in a user-supplied output path
pub fn resolve_output_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub fn log_level(quiet: bool, verbosity: u8) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

pub fn init_tracing(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub source: Url,
    pub routes: usize,
    pub nodes: usize,
    pub edges: usize,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub export_json: Option<PathBuf>,
}

fn fetch_spinner(enabled: bool, source: &Url) -> ProgressBar {
    if !enabled || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Fetching routes from {}", source));
    spinner
}

/// Fetch, build, lay out, rasterize and save. Nothing is written unless the
/// document was fetched and validated.
pub async fn handle_visualize(options: &VisualizeOptions) -> Result<RunSummary> {
    let renderer = Renderer::new(options.render.clone()).context("Invalid render options")?;
    let fetcher = Fetcher::new().context("Failed to build HTTP client")?;

    let spinner = fetch_spinner(!options.quiet, &options.source);
    let fetched = fetcher.fetch_document(&options.source).await;
    spinner.finish_and_clear();
    let mut document = fetched
        .with_context(|| format!("Failed to fetch route document from {}", options.source))?;

    if options.expand_unknown {
        document = document.with_expanded_unknown_hops();
    }

    let graph = TopologyGraph::from_routes(&document);
    let image = renderer.render(&graph);
    save_png(&image, &options.output)
        .with_context(|| format!("Failed to write image to {}", options.output.display()))?;

    if let Some(path) = &options.export_json {
        export_snapshot(&graph.snapshot(), path)
            .with_context(|| format!("Failed to export graph to {}", path.display()))?;
    }

    info!("Done with {}", options.source);
    Ok(RunSummary {
        source: options.source.clone(),
        routes: document.len(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        output: options.output.clone(),
        width: image.width(),
        height: image.height(),
        export_json: options.export_json.clone(),
    })
}

fn print_path(label: &str, path: &Path) {
    println!(
        "  {} {:<8} {}",
        "→".blue(),
        label,
        path.display().to_string().bright_white()
    );
}

pub fn print_summary(summary: &RunSummary) {
    println!("{} Topology from {}", "✓".green().bold(), summary.source);
    println!(
        "  {} {} routes, {} nodes, {} edges",
        "•".cyan(),
        summary.routes,
        summary.nodes,
        summary.edges
    );
    print_path("image", &summary.output);
    println!("  {} {}x{} px", " ".repeat(10), summary.width, summary.height);
    if let Some(path) = &summary.export_json {
        print_path("json", path);
    }
}

/// Report the run and hand the saved image to `viewer`. Runs only after
/// `handle_visualize` has saved the image. Returns whether a viewer opened;
/// a viewer failure never fails the run.
pub fn finish<F>(summary: &RunSummary, quiet: bool, show: bool, viewer: F) -> bool
where
    F: FnOnce(&Path) -> bool,
{
    if !quiet {
        print_summary(summary);
    }
    if !show {
        return false;
    }
    viewer(&summary.output)
}

pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "✗".red().bold(), err);
}
