//! Pipeline stages for resume extraction.
//!
//! Each submodule implements exactly one transformation step. Data flows
//! strictly forward; no stage looks back at an earlier stage's input.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ decode ──▶ lines ──┬──▶ header ────────────────┐
//! (path)   (pdfium)  (y-clust.) │                          ├──▶ assemble
//!                               └──▶ sections ──▶ items ───┘    (JSON doc)
//!                                               └▶ skills
//! ```
//!
//! 1. [`input`]    — validate the path and `%PDF` magic, read the bytes
//! 2. [`decode`]   — positioned text fragments per page, behind the
//!    [`decode::PdfDecoder`] adapter; the pdfium backend runs in
//!    `spawn_blocking`
//! 3. [`lines`]    — cluster fragments into normalised reading-order lines
//!    (rules in [`normalize`])
//! 4. [`header`]   — name, contact fields, optional title
//! 5. [`sections`] — group lines under recognised headings
//! 6. [`items`] / [`skills`] — split section bodies into items, or parse
//!    `Label: values` skills blocks
//! 7. [`assemble`] — merge everything into a [`crate::ResumeDocument`]

pub mod assemble;
pub mod decode;
pub mod header;
pub mod input;
pub mod items;
pub mod lines;
pub mod normalize;
pub mod sections;
pub mod skills;
