mod app;
mod bibtex;
mod ui;

use std::fs::{self, File};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use bibmerge_core::{
    BibEntry, DiffHighlightMode, DiffView, LEFT_DEFAULT_HEADER, RIGHT_DEFAULT_HEADER,
    ShowDiffConfig, ThreeWayMergeView,
};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bibmerge", about = "Merge two BibTeX entries field by field")]
struct Cli {
    /// BibTeX file holding the left entry
    left: PathBuf,

    /// BibTeX file holding the right entry
    right: PathBuf,

    /// Column title for the left entry
    #[arg(long, default_value = LEFT_DEFAULT_HEADER)]
    left_header: String,

    /// Column title for the right entry
    #[arg(long, default_value = RIGHT_DEFAULT_HEADER)]
    right_header: String,

    /// Start with differences highlighted
    #[arg(long, default_value_t = false)]
    diff: bool,

    /// Diff layout
    #[arg(long, value_enum, default_value_t = CliDiffView::Unified)]
    diff_view: CliDiffView,

    /// Diff granularity
    #[arg(long, value_enum, default_value_t = CliHighlight::Words)]
    highlight: CliHighlight,

    /// Take every field from one side before merging
    #[arg(long, value_enum)]
    select: Option<CliSide>,

    /// Union the groups of both entries
    #[arg(long, default_value_t = false)]
    merge_groups: bool,

    /// Write the merged entry here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum, default_value_t = CliTheme::Auto)]
    theme: CliTheme,

    /// Disable ANSI color
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Append diagnostics to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum CliTheme {
    Auto,
    Default,
    HighContrast,
    Light,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum CliDiffView {
    Unified,
    Split,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum CliHighlight {
    Words,
    #[value(alias = "characters")]
    Chars,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum CliSide {
    Left,
    Right,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let left = read_entry(&cli.left)?;
    let right = read_entry(&cli.right)?;
    let mut view = ThreeWayMergeView::with_headers(
        &left,
        &right,
        cli.left_header.as_str(),
        cli.right_header.as_str(),
    );
    apply_merge_flags(&mut view, &cli);

    let force_tui = std::env::var("BIBMERGE_FORCE_TUI").ok().as_deref() == Some("1");
    if (!io::stdin().is_terminal() || !io::stdout().is_terminal()) && !force_tui {
        return write_result(&view, &left, &right, cli.output.as_deref());
    }

    let mut app = app::App::new(view);
    app.set_theme(theme_choice(cli.theme));
    app.set_no_color(cli.no_color);
    match app.run()? {
        app::Outcome::Accepted => {
            info!("merge accepted");
            write_result(&app.into_view(), &left, &right, cli.output.as_deref())
        }
        app::Outcome::Cancelled => {
            info!("merge cancelled");
            eprintln!("bibmerge: merge cancelled, nothing written");
            Ok(())
        }
    }
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bibmerge_core=info,bibmerge=info"));
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_env_filter(filter)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn read_entry(path: &Path) -> Result<BibEntry> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    bibtex::parse_entry(&text).with_context(|| format!("parse {}", path.display()))
}

fn apply_merge_flags(view: &mut ThreeWayMergeView, cli: &Cli) {
    match cli.select {
        Some(CliSide::Left) => view.select_left_entry_values(),
        Some(CliSide::Right) => view.select_right_entry_values(),
        None => {}
    }
    if cli.merge_groups {
        view.merge_groups();
    }
    if cli.diff {
        view.show_diff(diff_config(cli.diff_view, cli.highlight));
    }
}

fn diff_config(diff_view: CliDiffView, highlight: CliHighlight) -> ShowDiffConfig {
    let diff_view = match diff_view {
        CliDiffView::Unified => DiffView::Unified,
        CliDiffView::Split => DiffView::Split,
    };
    let highlight = match highlight {
        CliHighlight::Words => DiffHighlightMode::Words,
        CliHighlight::Chars => DiffHighlightMode::Chars,
    };
    ShowDiffConfig::new(diff_view, highlight)
}

fn theme_choice(theme: CliTheme) -> app::ThemeChoice {
    match theme {
        CliTheme::Auto => app::ThemeChoice::Auto,
        CliTheme::Default => app::ThemeChoice::Default,
        CliTheme::HighContrast => app::ThemeChoice::HighContrast,
        CliTheme::Light => app::ThemeChoice::Light,
    }
}

/// The merged entry keeps the left citation key, or the right one when the
/// left entry has none.
fn merged_output(view: &ThreeWayMergeView, left: &BibEntry, right: &BibEntry) -> String {
    let mut merged = view.merged_entry().clone();
    merged.set_citation_key(
        left.citation_key()
            .or(right.citation_key())
            .unwrap_or_default(),
    );
    bibtex::write_entry(&merged)
}

fn write_result(
    view: &ThreeWayMergeView,
    left: &BibEntry,
    right: &BibEntry,
    output: Option<&Path>,
) -> Result<()> {
    let text = merged_output(view, left, right);
    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "merged entry written");
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            write_to(&text, io::BufWriter::new(stdout.lock()))?;
            Ok(())
        }
    }
}

fn write_to<W: Write>(text: &str, mut out: W) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}
