//! Error types for the spellbook-split library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`SpellbookError`] — **Fatal**: the run cannot proceed (missing input,
//!   unreadable PDF, rendering engine unavailable, an artifact could not be
//!   written). Returned as `Err(SpellbookError)` from [`crate::process_deck`]
//!   and [`crate::regenerate_hires`]. Artifacts already written stay on disk.
//!
//! * [`PageError`] — **Non-fatal**: a single page could not become a spell
//!   record (no name field, unusable level, empty slug). The page is counted
//!   as skipped and the batch moves on to the next page.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the spellbook-split library.
///
/// Page-level skips use [`PageError`] and are collected in
/// [`crate::output::BatchOutcome::skipped`] rather than propagated here.
#[derive(Debug, Error)]
pub enum SpellbookError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// A directory of input documents could not be listed.
    #[error("Failed to read '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// pdfium-render returned an error for a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium (or its directory), place the\n\
library in the working directory, or install it system-wide.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Record errors ─────────────────────────────────────────────────────
    /// A page that requires a level carried none, or a non-numeric one.
    ///
    /// Only raised under [`crate::config::LevelPolicy::Strict`]; the default
    /// policy records the page as skipped instead.
    #[error("Page {page}: level {raw:?} is not a non-negative integer")]
    InvalidLevel { page: usize, raw: Option<String> },

    // ── Artifact errors ───────────────────────────────────────────────────
    /// The split single-page document could not be assembled or saved.
    #[error("Page {page}: failed to write split document '{path}': {detail}")]
    SplitDocumentFailed {
        page: usize,
        path: PathBuf,
        detail: String,
    },

    /// A display or print image could not be encoded or saved.
    #[error("Page {page}: failed to write image '{path}': {detail}")]
    ImageEncodingFailed {
        page: usize,
        path: PathBuf,
        detail: String,
    },

    /// Could not create an output directory or write an output file.
    #[error("Failed to write '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Collection errors ─────────────────────────────────────────────────
    /// The collection file exists but has no closing `];` to insert before.
    #[error("Could not find '];' in collection '{path}'")]
    CollectionFormatNotFound { path: PathBuf },

    // ── Interaction errors ────────────────────────────────────────────────
    /// Reading the operator's class selection (or the sidecar file) failed.
    #[error("Class prompt failed: {0}")]
    PromptFailed(String),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Why a single page was left out of the batch.
///
/// Every variant is recovered locally by the batch driver: the page is
/// counted as skipped and processing continues with the next page.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum PageError {
    /// Neither a `Name_` nor a `PName_` field resolved to a value.
    #[error("no 'Name_' field found")]
    MissingName,

    /// A full card whose `Level_` field is absent or not a non-negative integer.
    #[error("level {raw:?} is not a non-negative integer")]
    InvalidLevel { raw: Option<String> },

    /// The spell name has no characters that survive slug normalisation.
    #[error("name {name:?} produces an empty file name")]
    EmptySlug { name: String },
}
