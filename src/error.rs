//! Error types for the resume2json library.
//!
//! Two error types mirror the two sides of the decoder boundary:
//!
//! * [`ResumeError`] — **Fatal**: the extraction cannot produce a document
//!   (unreadable input, rejected PDF, unwritable output). Returned as
//!   `Err(ResumeError)` from the top-level `extract*` functions.
//!
//! * [`DecodeError`] — raised by a [`crate::pipeline::decode::PdfDecoder`]
//!   implementation. It carries no path information; the pipeline wraps it
//!   in [`ResumeError::Decode`].
//!
//! Heuristic ambiguity (no email found, no headings recognised, an empty
//! skills block) is never an error. Those outcomes are represented as
//! absent fields in [`crate::output::ResumeDocument`].

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the resume2json library.
#[derive(Debug, Error)]
pub enum ResumeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: Vec<u8> },

    /// Reading the input failed after it was opened.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Decoder errors ────────────────────────────────────────────────────
    /// The decoder rejected the document or one of its pages.
    #[error("PDF decoding failed: {0}")]
    Decode(#[from] DecodeError),

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
You can:\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium (or pass --pdfium-lib).\n\
  • Place libpdfium next to the working directory.\n\
  • Install pdfium system-wide so the dynamic loader can find it.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create the output directory or write the JSON file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be serialised to JSON.
    #[error("Failed to serialise resume document: {0}")]
    Serialize(#[from] serde_json::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of [`ResumeError`] used for reporting and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source file missing, unreadable, or not a PDF.
    InputUnreadable,
    /// The decoder rejected the byte stream or a page.
    Decode,
    /// The output directory or file could not be written.
    OutputWrite,
    /// Configuration was rejected before any work started.
    Config,
    /// Bug or runtime failure.
    Internal,
}

impl ResumeError {
    /// Which class of failure this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResumeError::FileNotFound { .. }
            | ResumeError::PermissionDenied { .. }
            | ResumeError::NotAPdf { .. }
            | ResumeError::ReadFailed { .. } => ErrorKind::InputUnreadable,
            ResumeError::Decode(_) | ResumeError::PdfiumBindingFailed(_) => ErrorKind::Decode,
            ResumeError::OutputWriteFailed { .. } | ResumeError::Serialize(_) => {
                ErrorKind::OutputWrite
            }
            ResumeError::InvalidConfig(_) => ErrorKind::Config,
            ResumeError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Failure reported by a PDF decoder implementation.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    /// Header/trailer/xref is corrupt, or the bytes are not a document.
    #[error("document rejected: {0}")]
    Rejected(String),

    /// The document is encrypted and no password was supplied.
    #[error("document is encrypted and requires a password")]
    PasswordRequired,

    /// A password was supplied but it is wrong.
    #[error("wrong password for encrypted document")]
    WrongPassword,

    /// A single page could not be loaded or its text layer read.
    #[error("page {page} failed to decode: {detail}")]
    Page { page: usize, detail: String },
}
