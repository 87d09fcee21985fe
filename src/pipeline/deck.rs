//! Reading form fields out of the source deck with lopdf.
//!
//! pdfium renders the pages, but its form API hides the widget/parent
//! split the resolver depends on, so fields are read straight from each
//! page's `/Annots` array: `/T` for names, `/V` for values, `/Parent` for
//! the shared field a widget belongs to.

use crate::error::SpellbookError;
use crate::pipeline::fields::FormEntry;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::Path;
use tracing::debug;

/// The source deck, opened for form-field access.
pub struct SpellDeck {
    doc: Document,
    page_ids: Vec<ObjectId>,
}

impl SpellDeck {
    /// Load a deck from disk.
    pub fn open(path: &Path) -> Result<Self, SpellbookError> {
        let doc = Document::load(path).map_err(|e| SpellbookError::CorruptPdf {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Ok(Self::from_document(doc))
    }

    /// Wrap an already-parsed document.
    pub fn from_document(doc: Document) -> Self {
        // get_pages() is keyed by 1-based page number, so values come out in page order.
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        debug!("Deck has {} pages", page_ids.len());
        Self { doc, page_ids }
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Annotation entries of the 0-based page `index`, in document order.
    ///
    /// Pages without annotations (or out-of-range indices) yield no entries.
    pub fn page_entries(&self, index: usize) -> Vec<AnnotationEntry<'_>> {
        let Some(page) = self
            .page_ids
            .get(index)
            .and_then(|id| self.doc.get_dictionary(*id).ok())
        else {
            return Vec::new();
        };

        let Some(Object::Array(annots)) = page
            .get(b"Annots")
            .ok()
            .and_then(|a| resolve(&self.doc, a))
        else {
            return Vec::new();
        };

        annots
            .iter()
            .filter_map(|a| resolve(&self.doc, a))
            .filter_map(|a| a.as_dict().ok())
            .map(|dict| AnnotationEntry {
                doc: &self.doc,
                dict,
            })
            .collect()
    }
}

/// One `/Annots` entry of a page.
pub struct AnnotationEntry<'a> {
    doc: &'a Document,
    dict: &'a Dictionary,
}

impl AnnotationEntry<'_> {
    fn parent(&self) -> Option<&Dictionary> {
        self.dict
            .get(b"Parent")
            .ok()
            .and_then(|p| resolve(self.doc, p))
            .and_then(|p| p.as_dict().ok())
    }
}

impl FormEntry for AnnotationEntry<'_> {
    fn own_name(&self) -> Option<String> {
        text_entry(self.doc, self.dict, b"T")
    }

    fn has_parent(&self) -> bool {
        self.parent().is_some()
    }

    fn parent_name(&self) -> Option<String> {
        self.parent().and_then(|p| text_entry(self.doc, p, b"T"))
    }

    fn own_value(&self) -> Option<String> {
        text_entry(self.doc, self.dict, b"V")
    }

    fn parent_value(&self) -> Option<String> {
        self.parent().and_then(|p| text_entry(self.doc, p, b"V"))
    }
}

/// Follow one indirect reference.
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Read `key` from `dict` as text. Names (checkbox states) read as their bare name.
fn text_entry(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<String> {
    match resolve(doc, dict.get(key).ok()?)? {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        Object::Integer(i) => Some(i.to_string()),
        Object::Real(r) => Some(r.to_string()),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE with BOM, UTF-8 with BOM, else
/// PDFDocEncoding (read as Latin-1, which agrees on every printable ASCII byte).
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8_lossy(rest).into_owned()
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}
