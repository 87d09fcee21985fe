//! The batch driver: one deck in, assets and collection entries out.
//!
//! Pages are handled strictly in order, one at a time. A page either becomes
//! a record (reconcile → assets → classes) or is counted as skipped; after
//! the last page the whole batch is appended to the collection in one go.
//! Fatal errors stop the run where it is and leave earlier assets on disk.

use crate::config::{LevelPolicy, NameOnlyPolicy, SpellbookConfig};
use crate::error::{PageError, SpellbookError};
use crate::output::{BatchOutcome, CollectionOutcome, SkippedPage, SpellRecord};
use crate::pipeline::classify::{ClassPrompt, SpellClass};
use crate::pipeline::collection::append_records;
use crate::pipeline::deck::SpellDeck;
use crate::pipeline::reconcile::{reconcile, PageVariant, UNKNOWN_SCHOOL};
use crate::pipeline::render::RenderEngine;
use crate::pipeline::{assets, input, slug};
use crate::progress::BatchProgressCallback;
use std::path::Path;
use tracing::{info, warn};

/// School, level and classes of the latest full card, for
/// [`NameOnlyPolicy::InheritPrevious`].
#[derive(Clone)]
struct Inherited {
    school: String,
    level: u32,
    classes: Vec<SpellClass>,
}

impl Default for Inherited {
    fn default() -> Self {
        Self {
            school: UNKNOWN_SCHOOL.to_string(),
            level: 0,
            classes: Vec::new(),
        }
    }
}

/// Split the deck at `input` into per-spell assets and append the accepted
/// spells to the collection.
///
/// # Errors
/// Returns `Err` only for fatal problems: the input is missing or not a
/// PDF, rendering or writing an asset failed, the prompt failed, or a level
/// was unusable under [`LevelPolicy::Strict`]. A collection without a
/// closing `];` is reported as [`CollectionOutcome::FormatNotFound`] instead.
pub fn process_deck(
    input: &Path,
    config: &SpellbookConfig,
    engine: &dyn RenderEngine,
    prompt: &mut dyn ClassPrompt,
    progress: &dyn BatchProgressCallback,
) -> Result<BatchOutcome, SpellbookError> {
    let path = input::resolve_local(input)?;
    let deck = SpellDeck::open(&path)?;
    let renderer = engine.open(&path)?;

    let mut total_pages = deck.page_count();
    if renderer.page_count() != total_pages {
        warn!(
            "Form reader sees {} pages but renderer sees {}; using the smaller",
            total_pages,
            renderer.page_count()
        );
        total_pages = total_pages.min(renderer.page_count());
    }
    info!("Processing {} — {} pages", path.display(), total_pages);
    progress.on_batch_start(total_pages);

    let mut records: Vec<SpellRecord> = Vec::new();
    let mut skipped: Vec<SkippedPage> = Vec::new();
    let mut last_full: Option<Inherited> = None;

    for index in 0..total_pages {
        let page_num = index + 1;
        let mut skip = |reason: PageError| {
            warn!("Page {}: {} — skipping", page_num, reason);
            progress.on_page_skipped(page_num, total_pages, &reason.to_string());
            skipped.push(SkippedPage { page_num, reason });
        };

        let variant = match reconcile(&deck.page_entries(index)) {
            Ok(variant) => variant,
            Err(PageError::InvalidLevel { raw }) if config.level_policy == LevelPolicy::Strict => {
                return Err(SpellbookError::InvalidLevel {
                    page: page_num,
                    raw,
                });
            }
            Err(reason) => {
                skip(reason);
                continue;
            }
        };

        let name = variant.name().to_string();
        let slug = slug::slugify(&name);
        if slug.is_empty() {
            skip(PageError::EmptySlug { name });
            continue;
        }

        let paths = assets::produce(renderer.as_ref(), index, &slug, config)?;

        let details = match variant {
            PageVariant::Full { school, level, .. } => {
                let classes = prompt.collect_classes(&name)?;
                let full = Inherited {
                    school,
                    level,
                    classes,
                };
                last_full = Some(full.clone());
                full
            }
            PageVariant::NameOnly { .. } => match (config.name_only_policy, &last_full) {
                (NameOnlyPolicy::InheritPrevious, Some(prev)) => prev.clone(),
                _ => Inherited::default(),
            },
        };

        records.push(SpellRecord {
            name: name.clone(),
            level: details.level,
            school: details.school,
            classes: details.classes,
            image_path: config.site_path(&paths.display_image),
            pdf_path: config.site_path(&paths.split_document),
        });
        info!("Page {}: accepted '{}'", page_num, name);
        progress.on_page_accepted(page_num, total_pages, &name);
    }

    progress.on_batch_complete(records.len(), skipped.len());

    let collection = if records.is_empty() {
        CollectionOutcome::NothingToAppend
    } else {
        match append_records(&config.collection_path, &records) {
            Ok(n) => CollectionOutcome::Appended(n),
            Err(e @ SpellbookError::CollectionFormatNotFound { .. }) => {
                warn!("{e}; {} records were not appended", records.len());
                CollectionOutcome::FormatNotFound
            }
            Err(e) => return Err(e),
        }
    };

    info!(
        "Done: {} spells processed, {} skipped",
        records.len(),
        skipped.len()
    );
    Ok(BatchOutcome {
        total_pages,
        records,
        skipped,
        collection,
    })
}
