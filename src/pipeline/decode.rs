//! Decoder adapter boundary: turn PDF bytes into positioned text fragments.
//!
//! The rest of the pipeline never sees a PDF library. It consumes
//! [`PositionedFragment`]s obtained through three small traits:
//!
//! ```text
//! PdfDecoder::open_document(bytes) ─▶ DecodedDocument
//!     DecodedDocument::page_count()
//!     DecodedDocument::page(n)      ─▶ DecodedPage
//!         DecodedPage::text_fragments() ─▶ Vec<PositionedFragment>
//! ```
//!
//! [`PdfiumDecoder`] is the production implementation. pdfium wraps a C++
//! library with thread-local state, so the binding, the document and its
//! pages must be created and dropped on one thread; callers run the whole
//! decode inside `tokio::task::spawn_blocking` (see [`crate::convert`]).
//!
//! Line breaks are reconstructed geometrically downstream; decoders are not
//! expected to report end-of-line flags.

use crate::error::{DecodeError, ResumeError};
use crate::progress::ProgressCallback;
use pdfium_render::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A decoder-reported run of text with a uniform baseline.
///
/// Coordinates follow the PDF convention: `y` grows upwards, so a larger
/// `y` is higher on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedFragment {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// 0-indexed page the fragment belongs to.
    pub page: usize,
}

impl PositionedFragment {
    pub fn new(text: impl Into<String>, x: f32, y: f32, width: f32, page: usize) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            page,
        }
    }

    /// Horizontal end of the fragment (`x + width`).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Opens a PDF byte stream.
pub trait PdfDecoder {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Parse `bytes` into a document handle; fails on malformed input.
    fn open_document<'a>(
        &'a self,
        bytes: &'a [u8],
        password: Option<&'a str>,
    ) -> Result<Box<dyn DecodedDocument + 'a>, DecodeError>;
}

/// An opened document. Dropping it releases the decoder's resources.
pub trait DecodedDocument {
    fn page_count(&self) -> usize;

    /// Load the page at `index` (0-indexed).
    fn page<'p>(&'p self, index: usize) -> Result<Box<dyn DecodedPage + 'p>, DecodeError>;
}

/// A loaded page.
pub trait DecodedPage {
    /// Every text run on the page, in whatever order the decoder yields them.
    fn text_fragments(&self) -> Result<Vec<PositionedFragment>, DecodeError>;
}

/// Decode every page of `bytes` in page order.
///
/// Returns one fragment list per page. The first failing page aborts the
/// whole decode; no partial result is returned.
pub fn decode_pages(
    decoder: &dyn PdfDecoder,
    bytes: &[u8],
    password: Option<&str>,
    progress: Option<&ProgressCallback>,
) -> Result<Vec<Vec<PositionedFragment>>, ResumeError> {
    let document = decoder.open_document(bytes, password)?;
    let total_pages = document.page_count();
    info!("PDF opened with {}: {} pages", decoder.name(), total_pages);

    if let Some(cb) = progress {
        cb.on_extraction_start(total_pages);
    }

    let mut pages = Vec::with_capacity(total_pages);
    for index in 0..total_pages {
        let page_num = index + 1;
        if let Some(cb) = progress {
            cb.on_page_start(page_num, total_pages);
        }

        let fragments = document
            .page(index)
            .and_then(|page| page.text_fragments())
            .inspect_err(|e| {
                if let Some(cb) = progress {
                    cb.on_page_error(page_num, total_pages, &e.to_string());
                }
            })?;

        debug!("Page {}: {} fragments", page_num, fragments.len());
        if let Some(cb) = progress {
            cb.on_page_decoded(page_num, total_pages, fragments.len());
        }
        pages.push(fragments);
    }

    Ok(pages)
}

// ── pdfium implementation ────────────────────────────────────────────────

/// [`PdfDecoder`] backed by pdfium via `pdfium-render`.
pub struct PdfiumDecoder {
    pdfium: Pdfium,
}

impl PdfiumDecoder {
    /// Bind to a pdfium library.
    ///
    /// Resolution order: `library_path` (file or directory), the
    /// `PDFIUM_LIB_PATH` environment variable, the working directory, then
    /// the system loader.
    pub fn bind(library_path: Option<&Path>) -> Result<Self, ResumeError> {
        let explicit = library_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("PDFIUM_LIB_PATH").map(PathBuf::from));

        let bindings = match explicit {
            Some(path) => {
                let lib = if path.is_dir() {
                    Pdfium::pdfium_platform_library_name_at_path(&path)
                } else {
                    path
                };
                debug!("Binding pdfium from {}", lib.display());
                Pdfium::bind_to_library(&lib)
            }
            None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library()),
        }
        .map_err(|e| ResumeError::PdfiumBindingFailed(format!("{e:?}")))?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl PdfDecoder for PdfiumDecoder {
    fn name(&self) -> &'static str {
        "pdfium"
    }

    fn open_document<'a>(
        &'a self,
        bytes: &'a [u8],
        password: Option<&'a str>,
    ) -> Result<Box<dyn DecodedDocument + 'a>, DecodeError> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(bytes, password)
            .map_err(|e| {
                let err_str = format!("{e:?}");
                if err_str.contains("Password") || err_str.contains("password") {
                    if password.is_some() {
                        DecodeError::WrongPassword
                    } else {
                        DecodeError::PasswordRequired
                    }
                } else {
                    DecodeError::Rejected(err_str)
                }
            })?;
        Ok(Box::new(PdfiumDocument { document }))
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl<'a> DecodedDocument for PdfiumDocument<'a> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page<'p>(&'p self, index: usize) -> Result<Box<dyn DecodedPage + 'p>, DecodeError> {
        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|e| DecodeError::Page {
                page: index + 1,
                detail: format!("{e:?}"),
            })?;
        Ok(Box::new(PdfiumPage { page, index }))
    }
}

struct PdfiumPage<'a> {
    page: PdfPage<'a>,
    index: usize,
}

impl<'a> DecodedPage for PdfiumPage<'a> {
    fn text_fragments(&self) -> Result<Vec<PositionedFragment>, DecodeError> {
        let text = self.page.text().map_err(|e| DecodeError::Page {
            page: self.index + 1,
            detail: format!("{e:?}"),
        })?;

        let fragments = text
            .segments()
            .iter()
            .map(|segment| {
                let bounds = segment.bounds();
                PositionedFragment {
                    text: segment.text(),
                    x: bounds.left().value,
                    y: fragment_y(baseline(&segment), bounds.bottom().value),
                    width: bounds.right().value - bounds.left().value,
                    page: self.index,
                }
            })
            .collect();

        Ok(fragments)
    }
}

/// Origin `y` of the segment's first character.
fn baseline(segment: &PdfPageTextSegment) -> Option<f32> {
    let chars = segment.chars().ok()?;
    let first = chars.iter().next()?;
    let origin = first.origin_y().ok()?;
    Some(origin.value)
}

/// Fragment `y` is the text baseline. The box bottom moves with descenders
/// (`g`, `p`, `,`), so it is only used when pdfium reports no origin.
fn fragment_y(baseline: Option<f32>, box_bottom: f32) -> f32 {
    baseline.unwrap_or(box_bottom)
}
