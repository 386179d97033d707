//! # resume2json
//!
//! Extract a structured JSON resume from a single-column PDF resume.
//!
//! ## Why this crate?
//!
//! A portfolio site wants its resume as data (name, contact block, sections,
//! skills) while the source of truth stays a PDF that is edited in a word
//! processor. This crate reads the PDF's text layer, rebuilds the visual
//! lines from positioned fragments, and applies a small set of documented
//! heuristics to recover the resume's structure.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     validate the path and %PDF magic, read bytes
//!  ├─ 2. Decode    positioned text fragments per page (pdfium, spawn_blocking)
//!  ├─ 3. Lines     y-clustering, x-ordering, normalisation, dedup
//!  ├─ 4. Header    name, email, phone, location, links
//!  ├─ 5. Sections  fixed heading vocabulary, case-insensitive
//!  ├─ 6. Items     bullets or ordered fallback rules; skills as Label: values
//!  └─ 7. Assemble  ResumeDocument → pretty JSON (atomic write)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resume2json::{extract, ExtractionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::default();
//!     let output = extract("public/resume/resume.pdf", &config).await?;
//!     println!("{}", output.document.to_json_pretty()?);
//!     eprintln!("{} sections, {} skills",
//!         output.stats.section_count,
//!         output.stats.skill_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `build-resume` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! resume2json = { version = "0.1", default-features = false }
//! ```
//!
//! ## pdfium
//!
//! Decoding needs a pdfium shared library at runtime. It is looked up at
//! [`ExtractionConfig::pdfium_library_path`], then `PDFIUM_LIB_PATH`, then
//! the working directory, then the system loader. Callers with their own
//! decoder can implement [`PdfDecoder`] and use [`extract_with_decoder`].

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder};
pub use convert::{
    extract, extract_from_bytes, extract_sync, extract_to_file, extract_with_decoder,
    parse_lines, write_document,
};
pub use error::{DecodeError, ErrorKind, ResumeError};
pub use output::{ContactInfo, ExtractionOutput, ExtractionStats, ResumeDocument, Section};
pub use pipeline::decode::{DecodedDocument, DecodedPage, PdfDecoder, PdfiumDecoder, PositionedFragment};
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
