//! Extraction entry points.
//!
//! [`extract`] is the primary API: read the file, decode it with pdfium on a
//! blocking thread, then run the pure text stages. [`extract_with_decoder`]
//! is the same pipeline over any [`PdfDecoder`], which is how tests drive it
//! without a pdfium library.

use crate::config::ExtractionConfig;
use crate::error::ResumeError;
use crate::output::{ExtractionOutput, ExtractionStats, ResumeDocument};
use crate::pipeline::assemble::assemble_document;
use crate::pipeline::decode::{self, PdfDecoder, PdfiumDecoder};
use crate::pipeline::header::parse_header;
use crate::pipeline::input;
use crate::pipeline::lines::{reconstruct_lines, LineGeometry};
use crate::pipeline::sections::{segment_sections, trim_to_first_heading};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Extract a structured resume from a PDF file.
///
/// # Errors
/// Fatal errors only: the input is missing, unreadable or not a PDF; pdfium
/// cannot be bound; the decoder rejects the document or a page. Fields the
/// parser cannot find are omitted from the document, never reported.
pub async fn extract(
    input: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ResumeError> {
    let total_start = Instant::now();
    let path = input.as_ref();
    info!("Starting extraction: {}", path.display());

    // ── Step 1: Validate and read input ──────────────────────────────────
    let bytes = input::read_input(path).await?;

    // ── Step 2: Decode and parse off the async runtime ───────────────────
    let mut output = extract_blocking(bytes, config).await?;

    output.stats.total_duration_ms = total_start.elapsed().as_millis() as u64;
    Ok(output)
}

/// Extract a structured resume from PDF bytes already in memory.
pub async fn extract_from_bytes(
    bytes: &[u8],
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ResumeError> {
    input::check_magic(Path::new("<memory>"), bytes)?;
    extract_blocking(bytes.to_vec(), config).await
}

/// Run the whole pipeline over `decoder`, synchronously.
///
/// This is the core shared by every other entry point. It never touches the
/// filesystem.
pub fn extract_with_decoder(
    decoder: &dyn PdfDecoder,
    bytes: &[u8],
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ResumeError> {
    let total_start = Instant::now();

    // ── Step 1: Decode fragments page by page ────────────────────────────
    let pages = decode::decode_pages(
        decoder,
        bytes,
        config.password.as_deref(),
        config.progress_callback.as_ref(),
    )?;
    let decode_duration_ms = total_start.elapsed().as_millis() as u64;
    let fragment_count = pages.iter().map(Vec::len).sum();

    // ── Step 2: Reconstruct lines ────────────────────────────────────────
    let geometry = LineGeometry {
        tolerance: config.line_tolerance,
        gap_threshold: config.gap_threshold,
    };
    let lines = reconstruct_lines(&pages, geometry);
    debug!(
        "Reconstructed {} lines from {} fragments",
        lines.len(),
        fragment_count
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_extraction_complete(pages.len(), lines.len());
    }

    // ── Step 3: Parse header, sections, items ────────────────────────────
    let document = parse_lines(&lines, config);

    let stats = ExtractionStats {
        total_pages: pages.len(),
        fragment_count,
        line_count: lines.len(),
        section_count: document.sections.len(),
        skill_count: document.skills.as_ref().map_or(0, Vec::len),
        decode_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Extraction complete: {} pages, {} sections, {} skills, {}ms",
        stats.total_pages, stats.section_count, stats.skill_count, stats.total_duration_ms
    );

    Ok(ExtractionOutput {
        document,
        lines,
        stats,
    })
}

/// Parse already-reconstructed text lines into a document.
///
/// Infallible: every heuristic miss becomes an absent field.
pub fn parse_lines(lines: &[String], config: &ExtractionConfig) -> ResumeDocument {
    let header = parse_header(lines, config);
    let body = trim_to_first_heading(lines, config);
    let sections = segment_sections(body, config);
    assemble_document(header, sections, config)
}

/// Write `document` as pretty JSON to `path`, replacing any previous file.
///
/// The JSON goes to a sibling `*.json.tmp` first and is renamed over `path`,
/// so a reader sees either the old file or the complete new one. The temp
/// file is removed if any step fails.
pub async fn write_document(
    document: &ResumeDocument,
    path: impl AsRef<Path>,
) -> Result<(), ResumeError> {
    let path = path.as_ref();
    let json = document.to_json_pretty()?;
    let write_err = |e| ResumeError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    let written = match tokio::fs::write(&tmp_path, json.as_bytes()).await {
        Ok(()) => tokio::fs::rename(&tmp_path, path).await,
        Err(e) => Err(e),
    };
    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(write_err(e));
    }

    debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}

/// Extract a resume and write it to `output_path`.
///
/// Nothing is written unless extraction succeeds.
pub async fn extract_to_file(
    input: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionStats, ResumeError> {
    let output = extract(input, config).await?;
    write_document(&output.document, output_path).await?;
    Ok(output.stats)
}

/// Synchronous wrapper around [`extract`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    input: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ResumeError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ResumeError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(extract(input, config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Bind pdfium and run [`extract_with_decoder`] on a blocking thread.
///
/// The binding, document and pages all live and die inside the closure.
async fn extract_blocking(
    bytes: Vec<u8>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ResumeError> {
    let config = config.clone();
    tokio::task::spawn_blocking(move || {
        let decoder = PdfiumDecoder::bind(config.pdfium_library_path.as_deref())?;
        extract_with_decoder(&decoder, &bytes, &config)
    })
    .await
    .map_err(|e| ResumeError::Internal(format!("Extraction task failed: {e}")))?
}
