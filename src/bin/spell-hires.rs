//! Re-render print PNGs from a directory of split spell PDFs.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use spellbook_split::{regenerate_hires, BatchProgressCallback, HiresOutcome, PdfiumEngine};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

struct HiresProgress {
    bar: ProgressBar,
}

impl BatchProgressCallback for HiresProgress {
    fn on_batch_start(&self, total_pages: usize) {
        self.bar.set_length(total_pages as u64);
        self.bar.set_style(
            ProgressStyle::with_template("  [{bar:42.green/238}] {pos:>3}/{len}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏  "),
        );
    }

    fn on_page_accepted(&self, page_num: usize, total_pages: usize, name: &str) {
        self.bar
            .println(format!("  {} [{page_num}/{total_pages}] {name}", green("✓")));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, _accepted: usize, _skipped: usize) {
        self.bar.finish_and_clear();
    }
}

/// Render page 1 of every spell PDF to a high-resolution PNG.
#[derive(Parser, Debug)]
#[command(name = "spell-hires", version, about)]
struct Cli {
    /// Directory containing the split spell PDFs.
    #[arg(long, env = "SPELLBOOK_SPELLS_DIR", default_value = spellbook_split::config::DEFAULT_SPLIT_DOCUMENT_DIR)]
    input_dir: PathBuf,

    /// Directory to write the PNGs into.
    #[arg(long, env = "SPELLBOOK_HIRES_DIR", default_value = spellbook_split::config::DEFAULT_HIGH_RES_IMAGE_DIR)]
    output_dir: PathBuf,

    /// Render resolution.
    #[arg(long, env = "SPELLBOOK_HIRES_DPI", default_value_t = spellbook_split::config::DEFAULT_HIGH_RES_DPI,
          value_parser = clap::value_parser!(u32).range(36..=1200))]
    dpi: u32,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // An empty input directory needs no PDF engine at all.
    let pdfs = spellbook_split::pipeline::input::list_pdfs(&cli.input_dir)
        .context("Cannot list input directory")?;
    if pdfs.is_empty() {
        println!("No PDFs found in {}/", cli.input_dir.display());
        return Ok(());
    }

    let engine = PdfiumEngine::bind().context("PDF engine unavailable")?;
    let progress = HiresProgress {
        bar: if cli.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        },
    };

    if !cli.quiet {
        eprintln!(
            "\n🖨  Generating {} DPI lossless PNG for {} spell PDFs\n",
            cli.dpi,
            pdfs.len()
        );
    }

    let outcome = regenerate_hires(&cli.input_dir, &cli.output_dir, cli.dpi, &engine, &progress)
        .context("Regeneration failed")?;

    match outcome {
        HiresOutcome::NoInputs => println!("No PDFs found in {}/", cli.input_dir.display()),
        HiresOutcome::Generated(paths) => {
            if !cli.quiet {
                eprintln!(
                    "\n🏁 Done! {} high-res PNG images saved to {}/\n",
                    bold(&paths.len().to_string()),
                    cli.output_dir.display()
                );
            }
        }
    }
    Ok(())
}
