//! Result types produced by a run.

use crate::error::PageError;
use crate::pipeline::classify::SpellClass;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One finished spell, as appended to the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellRecord {
    /// Never empty.
    pub name: String,
    pub level: u32,
    pub school: String,
    pub classes: Vec<SpellClass>,
    /// The display WebP, as linked from the site root.
    pub image_path: PathBuf,
    /// The split single-page PDF, as linked from the site root.
    pub pdf_path: PathBuf,
}

/// A page left out of the batch, with the 1-based page number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPage {
    pub page_num: usize,
    pub reason: PageError,
}

/// What happened to the collection file at the end of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionOutcome {
    /// `n` records were inserted.
    Appended(usize),
    /// The existing file had no closing `];`; nothing was written.
    FormatNotFound,
    /// No records were accepted, so the file was not touched.
    NothingToAppend,
}

/// Summary of one deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub total_pages: usize,
    /// Accepted records, in page order.
    pub records: Vec<SpellRecord>,
    pub skipped: Vec<SkippedPage>,
    pub collection: CollectionOutcome,
}

impl BatchOutcome {
    pub fn accepted_count(&self) -> usize {
        self.records.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Summary of a high-res regeneration pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HiresOutcome {
    /// The input directory held no PDFs.
    NoInputs,
    /// One PNG per listed path was written.
    Generated(Vec<PathBuf>),
}
