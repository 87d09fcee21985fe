//! Input validation: make sure the operator pointed us at a readable PDF.
//!
//! Both lopdf and pdfium produce opaque parse errors on non-PDF input, so
//! the path is checked up front: existence, read permission, then the
//! `%PDF` magic bytes. Nothing is rendered or written until this passes.

use crate::error::SpellbookError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a local file path, validating existence and PDF magic bytes.
pub fn resolve_local(path: &Path) -> Result<PathBuf, SpellbookError> {
    let path = path.to_path_buf();

    if !path.exists() {
        return Err(SpellbookError::FileNotFound { path });
    }

    match std::fs::File::open(&path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(SpellbookError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(SpellbookError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(SpellbookError::FileNotFound { path });
        }
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path)
}

/// List the `*.pdf` files directly inside `dir`, sorted by file name.
///
/// A missing directory yields an empty list.
pub fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>, SpellbookError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(SpellbookError::InputReadFailed {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut pdfs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "pdf"))
        .collect();
    pdfs.sort();
    Ok(pdfs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let err = resolve_local(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, SpellbookError::FileNotFound { .. }));
    }

    #[test]
    fn non_pdf_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("notes.pdf");
        std::fs::write(&p, b"hello world").unwrap();
        let err = resolve_local(&p).unwrap_err();
        match err {
            SpellbookError::NotAPdf { magic, .. } => assert_eq!(&magic, b"hell"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn pdf_magic_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("deck.pdf");
        std::fs::write(&p, b"%PDF-1.7\n").unwrap();
        assert_eq!(resolve_local(&p).unwrap(), p);
    }

    #[test]
    fn list_pdfs_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.pdf", "c.txt"] {
            std::fs::write(dir.path().join(name), b"%PDF").unwrap();
        }
        let found = list_pdfs(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn list_pdfs_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_pdfs(&dir.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn list_pdfs_on_a_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("spells");
        std::fs::write(&file, b"not a directory").unwrap();
        let err = list_pdfs(&file).unwrap_err();
        assert!(
            matches!(err, SpellbookError::InputReadFailed { ref path, .. } if path == &file),
            "got {err:?}"
        );
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
