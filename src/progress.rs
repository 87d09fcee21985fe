//! Progress-callback trait for per-page batch events.
//!
//! Pass a `&dyn BatchProgressCallback` to [`crate::process_deck`] or
//! [`crate::regenerate_hires`] to receive events as pages are accepted or
//! skipped. The library itself only logs through `tracing`; anything the
//! operator sees on the terminal goes through this trait.
//!
//! # Example
//!
//! ```rust
//! use spellbook_split::BatchProgressCallback;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! struct Counting {
//!     accepted: AtomicUsize,
//! }
//!
//! impl BatchProgressCallback for Counting {
//!     fn on_page_accepted(&self, page_num: usize, total_pages: usize, name: &str) {
//!         self.accepted.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("[{page_num}/{total_pages}] {name}");
//!     }
//! }
//! ```

/// Called by the batch driver as it processes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait BatchProgressCallback {
    /// Called once after the document is opened.
    ///
    /// # Arguments
    /// * `total_pages` — number of pages that will be visited
    fn on_batch_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called when a page became a record and its three assets were written.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — total pages in the document
    /// * `name`        — the spell name of the record
    fn on_page_accepted(&self, page_num: usize, total_pages: usize, name: &str) {
        let _ = (page_num, total_pages, name);
    }

    /// Called when a page was left out of the batch.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — total pages in the document
    /// * `reason`      — human-readable skip reason
    fn on_page_skipped(&self, page_num: usize, total_pages: usize, reason: &str) {
        let _ = (page_num, total_pages, reason);
    }

    /// Called once after every page has been visited, before the collection
    /// is written.
    fn on_batch_complete(&self, accepted: usize, skipped: usize) {
        let _ = (accepted, skipped);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recording {
        events: RefCell<Vec<String>>,
    }

    impl BatchProgressCallback for Recording {
        fn on_batch_start(&self, total_pages: usize) {
            self.events.borrow_mut().push(format!("start {total_pages}"));
        }

        fn on_page_accepted(&self, page_num: usize, _total_pages: usize, name: &str) {
            self.events.borrow_mut().push(format!("ok {page_num} {name}"));
        }

        fn on_page_skipped(&self, page_num: usize, _total_pages: usize, _reason: &str) {
            self.events.borrow_mut().push(format!("skip {page_num}"));
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_batch_start(3);
        cb.on_page_accepted(1, 3, "Light");
        cb.on_page_skipped(2, 3, "no name");
        cb.on_batch_complete(1, 1);
    }

    #[test]
    fn overridden_methods_receive_events_in_order() {
        let rec = Recording::default();
        rec.on_batch_start(2);
        rec.on_page_accepted(1, 2, "Light");
        rec.on_page_skipped(2, 2, "no name");
        rec.on_batch_complete(1, 1);
        assert_eq!(
            *rec.events.borrow(),
            vec!["start 2", "ok 1 Light", "skip 2"]
        );
    }
}
