//! Progress-callback trait for per-page extraction events.
//!
//! Inject an [`Arc<dyn ExtractionProgressCallback>`] via
//! [`crate::config::ExtractionConfigBuilder::progress_callback`] to receive
//! events while the decoder walks the document. Pages are decoded one at a
//! time in page order, so events arrive in order, but they are fired from
//! the blocking decode thread, hence the `Send + Sync` bound.
//!
//! # Example
//!
//! ```rust
//! use resume2json::{ExtractionConfig, ExtractionProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct FragmentCounter {
//!     fragments: AtomicUsize,
//! }
//!
//! impl ExtractionProgressCallback for FragmentCounter {
//!     fn on_page_decoded(&self, _page_num: usize, _total_pages: usize, fragments: usize) {
//!         self.fragments.fetch_add(fragments, Ordering::SeqCst);
//!     }
//! }
//!
//! let counter = Arc::new(FragmentCounter { fragments: AtomicUsize::new(0) });
//!
//! let config = ExtractionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ExtractionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the extraction pipeline as it decodes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ExtractionProgressCallback: Send + Sync {
    /// Called once, after the document opened, before any page is decoded.
    fn on_extraction_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called just before a page's text layer is read (1-indexed).
    fn on_page_start(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called when a page's fragments were read successfully.
    fn on_page_decoded(&self, page_num: usize, total_pages: usize, fragment_count: usize) {
        let _ = (page_num, total_pages, fragment_count);
    }

    /// Called when a page fails. The extraction aborts right after.
    fn on_page_error(&self, page_num: usize, total_pages: usize, error: &str) {
        let _ = (page_num, total_pages, error);
    }

    /// Called once after every page was decoded and lines reconstructed.
    fn on_extraction_complete(&self, total_pages: usize, line_count: usize) {
        let _ = (total_pages, line_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ExtractionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ExtractionConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgressCallback>;
