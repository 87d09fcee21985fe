//! Appending records to the `spells.js` collection.
//!
//! The website loads a plain script holding one array literal:
//!
//! ```text
//! const SPELLS = [
//!   { name: "Magic Missile", level: 1, school: "Evocation", classes: ["Sorcerer", "Wizard"], image: "images/magic-missile.webp", pdf: "spells/magic-missile.pdf" },
//! ];
//! ```
//!
//! New entries are spliced in just before the last `];`. Everything before
//! the splice point is left byte-for-byte as it was, so hand edits to
//! existing entries survive.

use crate::error::SpellbookError;
use crate::output::SpellRecord;
use crate::pipeline::assets::ensure_parent;
use std::path::Path;
use tracing::{info, warn};

/// Contents of a freshly created, empty collection.
pub const EMPTY_COLLECTION: &str = "const SPELLS = [\n];\n";

/// The marker entries are inserted before.
pub const CLOSING_MARKER: &str = "];";

/// Insert `records` (in order) before the closing `];` of the collection at
/// `path`, creating the file first if it is missing or empty.
///
/// Returns the number of records written. An empty slice writes nothing.
///
/// # Errors
/// * [`SpellbookError::CollectionFormatNotFound`] — the file has content but
///   no `];`; the file is left untouched
/// * [`SpellbookError::OutputWriteFailed`] — reading or writing failed
pub fn append_records(path: &Path, records: &[SpellRecord]) -> Result<usize, SpellbookError> {
    if records.is_empty() {
        return Ok(0);
    }

    let write_err = |source| SpellbookError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let existing = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(write_err(e)),
    };

    let content = if existing.is_empty() {
        warn!("{} not found or empty; creating it", path.display());
        ensure_parent(path)?;
        EMPTY_COLLECTION.to_string()
    } else {
        existing
    };

    let updated = splice_records(&content, records).ok_or_else(|| {
        SpellbookError::CollectionFormatNotFound {
            path: path.to_path_buf(),
        }
    })?;

    std::fs::write(path, updated).map_err(write_err)?;
    info!("Added {} spells to {}", records.len(), path.display());
    Ok(records.len())
}

/// `content` with one line per record inserted before the last `];`, or
/// `None` when there is no `];`.
pub fn splice_records(content: &str, records: &[SpellRecord]) -> Option<String> {
    let pos = content.rfind(CLOSING_MARKER)?;

    let mut out = String::with_capacity(content.len() + records.len() * 160);
    out.push_str(&content[..pos]);
    for record in records {
        out.push_str(&render_entry(record));
        out.push('\n');
    }
    out.push_str(&content[pos..]);
    Some(out)
}

/// One collection line, e.g.
/// `  { name: "Light", level: 0, school: "Evocation", classes: ["Bard"], image: "…", pdf: "…" },`
pub fn render_entry(record: &SpellRecord) -> String {
    let classes = record
        .classes
        .iter()
        .map(|c| js_string(c.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "  {{ name: {}, level: {}, school: {}, classes: [{}], image: {}, pdf: {} }},",
        js_string(&record.name),
        record.level,
        js_string(&record.school),
        classes,
        js_string(&path_string(&record.image_path)),
        js_string(&path_string(&record.pdf_path)),
    )
}

/// A double-quoted literal; JSON string escaping is valid JavaScript.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

/// Forward slashes on every platform; the paths end up in URLs.
fn path_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
