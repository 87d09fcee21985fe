//! # spellbook-split
//!
//! Split a spell-card PDF deck (one card per page, with fillable form
//! fields) into the assets a spell-reference website needs.
//!
//! ## Pipeline Overview
//!
//! ```text
//! deck.pdf
//!  │
//!  ├─ 1. Input      validate path and PDF magic bytes
//!  ├─ 2. Fields     read Name_/PName_/School_/Level_ widgets (lopdf)
//!  ├─ 3. Reconcile  name-only or full card; skip pages without a name
//!  ├─ 4. Assets     spells/<slug>.pdf, images/<slug>.webp,
//!  │                high_res_images/<slug>.png (pdfium)
//!  ├─ 5. Classes    operator picks from the 13-class menu (full cards only)
//!  └─ 6. Collection append the batch to data/spells.js
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spellbook_split::{process_deck, NoopProgressCallback, PdfiumEngine, SpellbookConfig, TerminalPrompt};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = PdfiumEngine::bind()?;
//!     let stdin = std::io::stdin();
//!     let mut prompt = TerminalPrompt::new(stdin.lock(), std::io::stderr());
//!     let outcome = process_deck(
//!         Path::new("spells.pdf"),
//!         &SpellbookConfig::default(),
//!         &engine,
//!         &mut prompt,
//!         &NoopProgressCallback,
//!     )?;
//!     eprintln!("{} spells, {} skipped", outcome.accepted_count(), outcome.skipped_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `spellbook-split` and `spell-hires` binaries (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod hires;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{LevelPolicy, NameOnlyPolicy, SpellbookConfig, SpellbookConfigBuilder};
pub use error::{PageError, SpellbookError};
pub use hires::regenerate_hires;
pub use output::{BatchOutcome, CollectionOutcome, HiresOutcome, SkippedPage, SpellRecord};
pub use pipeline::classify::{ClassPrompt, NoPrompt, SidecarPrompt, SpellClass, TerminalPrompt};
pub use pipeline::reconcile::PageVariant;
pub use pipeline::render::{PageRenderer, PageSize, PdfiumEngine, RenderEngine};
pub use process::process_deck;
pub use progress::{BatchProgressCallback, NoopProgressCallback};
