//! CLI binary for spellbook-split.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `SpellbookConfig`, wires the class prompt to the terminal and prints
//! per-page progress and a summary.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use spellbook_split::pipeline::input::resolve_local;
use spellbook_split::{
    process_deck, BatchProgressCallback, ClassPrompt, CollectionOutcome, LevelPolicy,
    NameOnlyPolicy, NoPrompt, PdfiumEngine, SidecarPrompt, SpellClass, SpellbookConfig,
    SpellbookError, TerminalPrompt,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Progress bar anchored at the bottom of the terminal, with one log line
/// per accepted or skipped page printed above it.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new(visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_pages: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        self.bar.set_length(total_pages as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Splitting");
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Processing {total_pages} pages…"))
        ));
    }

    fn on_page_accepted(&self, page_num: usize, _total_pages: usize, name: &str) {
        self.bar
            .println(format!("  {} [{page_num}] {name}", green("✓")));
        self.bar.inc(1);
    }

    fn on_page_skipped(&self, page_num: usize, _total_pages: usize, reason: &str) {
        self.bar.println(format!(
            "  {} Page {page_num}: {reason} — skipping",
            yellow("⚠")
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, _accepted: usize, _skipped: usize) {
        self.bar.finish_and_clear();
    }
}

/// Terminal prompt that hides the progress bar while waiting for input.
struct SuspendingPrompt {
    bar: ProgressBar,
    inner: TerminalPrompt<io::StdinLock<'static>, io::Stderr>,
}

impl ClassPrompt for SuspendingPrompt {
    fn collect_classes(&mut self, spell_name: &str) -> Result<Vec<SpellClass>, SpellbookError> {
        let inner = &mut self.inner;
        self.bar.suspend(|| inner.collect_classes(spell_name))
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Split a deck into spells/, images/, high_res_images/ and data/spells.js
  spellbook-split cards.pdf

  # Write everything under ./site instead of the working directory
  spellbook-split --output-root site cards.pdf

  # Unattended: classes from a JSON sidecar, summary as JSON
  spellbook-split --classes-file classes.json --json cards.pdf > run.json

  # Stop at the first card with an unreadable level
  spellbook-split --strict-levels cards.pdf

CLASS MENU:
  [1]Barbarian  [2]Bard  [3]Cleric  [4]Druid  [5]Fighter  [6]Monk  [7]Paladin
  [8]Ranger  [9]Rogue  [10]Sorcerer  [11]Warlock  [12]Wizard  [13]Artificer
  Answer with numbers separated by anything, e.g. "10 12". Empty = none.

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Path to libpdfium (file or directory)
  RUST_LOG          Override the log filter (e.g. spellbook_split=debug)
"#;

/// Split a spell-card PDF into per-spell PDFs, images and spells.js entries.
#[derive(Parser, Debug)]
#[command(
    name = "spellbook-split",
    version,
    about = "Split a spell-card PDF into per-spell PDFs, images and spells.js entries",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the input PDF (one spell card per page).
    input: PathBuf,

    /// Root directory for spells/, images/, high_res_images/ and data/spells.js.
    #[arg(long, env = "SPELLBOOK_OUTPUT_ROOT")]
    output_root: Option<PathBuf>,

    /// Directory for split single-page PDFs.
    #[arg(long, env = "SPELLBOOK_SPELLS_DIR")]
    spells_dir: Option<PathBuf>,

    /// Directory for WebP display images.
    #[arg(long, env = "SPELLBOOK_IMAGES_DIR")]
    images_dir: Option<PathBuf>,

    /// Directory for high-res PNG print images.
    #[arg(long, env = "SPELLBOOK_HIRES_DIR")]
    hires_dir: Option<PathBuf>,

    /// The spells.js collection to append to.
    #[arg(long, env = "SPELLBOOK_COLLECTION")]
    collection: Option<PathBuf>,

    /// WebP quality (1–100).
    #[arg(long, env = "SPELLBOOK_QUALITY", default_value_t = spellbook_split::config::DEFAULT_DISPLAY_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Resolution of WebP display images.
    #[arg(long, env = "SPELLBOOK_DISPLAY_DPI", default_value_t = spellbook_split::config::DEFAULT_DISPLAY_DPI)]
    display_dpi: u32,

    /// Resolution of PNG print images.
    #[arg(long, env = "SPELLBOOK_HIRES_DPI", default_value_t = spellbook_split::config::DEFAULT_HIGH_RES_DPI)]
    hires_dpi: u32,

    /// Resolution of the raster embedded in split PDFs.
    #[arg(long, env = "SPELLBOOK_SPLIT_DPI", default_value_t = spellbook_split::config::DEFAULT_SPLIT_DOCUMENT_DPI)]
    split_dpi: u32,

    /// Abort the run on a card with a missing or non-numeric level.
    #[arg(long, env = "SPELLBOOK_STRICT_LEVELS")]
    strict_levels: bool,

    /// Give name-only cards the school, level and classes of the previous full card.
    #[arg(long, env = "SPELLBOOK_INHERIT_NAME_ONLY")]
    inherit_name_only: bool,

    /// Do not ask for classes; every spell gets none.
    #[arg(long, conflicts_with = "classes_file")]
    no_prompt: bool,

    /// JSON file mapping spell names to class lists, used instead of asking.
    #[arg(long, env = "SPELLBOOK_CLASSES_FILE")]
    classes_file: Option<PathBuf>,

    /// Print the run summary as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "SPELLBOOK_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors and prompts.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar carries per-page feedback, so library INFO logs are
    // only shown when it is off.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // Fail on a bad path before touching the PDF engine.
    let input = resolve_local(&cli.input).context("Cannot open input")?;

    let config = build_config(&cli)?;
    let engine = PdfiumEngine::bind().context("PDF engine unavailable")?;
    let progress = CliProgressCallback::new(show_progress);

    let mut prompt: Box<dyn ClassPrompt> = if let Some(ref path) = cli.classes_file {
        Box::new(SidecarPrompt::from_file(path).context("Failed to load classes file")?)
    } else if cli.no_prompt {
        Box::new(NoPrompt)
    } else {
        Box::new(SuspendingPrompt {
            bar: progress.bar.clone(),
            inner: TerminalPrompt::new(io::stdin().lock(), io::stderr()),
        })
    };

    if !cli.quiet {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        eprintln!("\n🔮 Processing {}\n", bold(&name));
    }

    let outcome = process_deck(&input, &config, &engine, prompt.as_mut(), &progress)
        .context("Processing failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("Failed to serialise summary")?
        );
    }

    if !cli.quiet {
        match outcome.collection {
            CollectionOutcome::Appended(n) => eprintln!(
                "\n  {} Added {} spells to {}",
                green("✔"),
                n,
                config.collection_path.display()
            ),
            CollectionOutcome::FormatNotFound => eprintln!(
                "\n  {} Could not find '];' in {} — nothing appended",
                red("✘"),
                config.collection_path.display()
            ),
            CollectionOutcome::NothingToAppend => {}
        }
        eprintln!(
            "\n🏁 Done! {} spells processed, {} skipped.\n",
            bold(&outcome.accepted_count().to_string()),
            outcome.skipped_count()
        );
    }

    Ok(())
}

/// Map CLI args to `SpellbookConfig`.
fn build_config(cli: &Cli) -> Result<SpellbookConfig> {
    let mut builder = SpellbookConfig::builder();
    if let Some(ref root) = cli.output_root {
        builder = builder.output_root(root);
    }
    if let Some(ref dir) = cli.spells_dir {
        builder = builder.split_document_dir(dir);
    }
    if let Some(ref dir) = cli.images_dir {
        builder = builder.display_image_dir(dir);
    }
    if let Some(ref dir) = cli.hires_dir {
        builder = builder.high_res_image_dir(dir);
    }
    if let Some(ref path) = cli.collection {
        builder = builder.collection_path(path);
    }

    builder
        .display_quality(cli.quality)
        .display_dpi(cli.display_dpi)
        .high_res_dpi(cli.hires_dpi)
        .split_document_dpi(cli.split_dpi)
        .level_policy(if cli.strict_levels {
            LevelPolicy::Strict
        } else {
            LevelPolicy::Skip
        })
        .name_only_policy(if cli.inherit_name_only {
            NameOnlyPolicy::InheritPrevious
        } else {
            NameOnlyPolicy::Blank
        })
        .build()
        .context("Invalid configuration")
}
