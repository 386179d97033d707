//! Whole-pipeline tests over an in-memory decoder.
//!
//! `FixtureDecoder` hands out pre-positioned fragments, so these tests cover
//! everything after the PDF library: line reconstruction, header parsing,
//! sections, items, skills, JSON output and the atomic write.

use resume2json::{
    extract_with_decoder, write_document, DecodeError, DecodedDocument, DecodedPage, ErrorKind,
    ExtractionConfig, ExtractionProgressCallback, PdfDecoder, PositionedFragment, ResumeError,
};
use std::path::Path;
use std::sync::{Arc, Mutex};

const PDF_BYTES: &[u8] = b"%PDF-1.7 fixture";

// ── Fixture decoder ──────────────────────────────────────────────────────────

struct FixtureDecoder {
    pages: Vec<Vec<PositionedFragment>>,
    fail_page: Option<usize>,
}

impl FixtureDecoder {
    fn new(pages: Vec<Vec<PositionedFragment>>) -> Self {
        Self {
            pages,
            fail_page: None,
        }
    }
}

impl PdfDecoder for FixtureDecoder {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn open_document<'a>(
        &'a self,
        bytes: &'a [u8],
        _password: Option<&'a str>,
    ) -> Result<Box<dyn DecodedDocument + 'a>, DecodeError> {
        if !bytes.starts_with(b"%PDF") {
            return Err(DecodeError::Rejected("missing %PDF header".into()));
        }
        Ok(Box::new(FixtureDocument { decoder: self }))
    }
}

struct FixtureDocument<'a> {
    decoder: &'a FixtureDecoder,
}

impl DecodedDocument for FixtureDocument<'_> {
    fn page_count(&self) -> usize {
        self.decoder.pages.len()
    }

    fn page<'p>(&'p self, index: usize) -> Result<Box<dyn DecodedPage + 'p>, DecodeError> {
        if self.decoder.fail_page == Some(index) {
            return Err(DecodeError::Page {
                page: index + 1,
                detail: "corrupt content stream".into(),
            });
        }
        Ok(Box::new(FixturePage {
            fragments: &self.decoder.pages[index],
        }))
    }
}

struct FixturePage<'a> {
    fragments: &'a [PositionedFragment],
}

impl DecodedPage for FixturePage<'_> {
    fn text_fragments(&self) -> Result<Vec<PositionedFragment>, DecodeError> {
        Ok(self.fragments.to_vec())
    }
}

// ── Layout helpers ───────────────────────────────────────────────────────────

/// One fragment per line, top to bottom, returned bottom-up so the
/// reconstructor has to sort them.
fn page(index: usize, lines: &[&str]) -> Vec<PositionedFragment> {
    let mut fragments: Vec<PositionedFragment> = lines
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let y = 760.0 - 14.0 * i as f32;
            PositionedFragment::new(*text, 72.0, y, 5.0 * text.chars().count() as f32, index)
        })
        .collect();
    fragments.reverse();
    fragments
}

fn sample_resume() -> Vec<Vec<PositionedFragment>> {
    let mut first = page(
        0,
        &[
            "",
            "Austin, TX | https://github.com/janedoe | https://janedoe.dev",
            "EDUCATION",
            "State University — B.S. Computer Science, 2019 \u{2013} 2023",
            "Experience",
            "Acme Corp — Software Engineer",
            "\u{25CF} Built a billing service handling",
            "millions of requests per day",
            "• Led the migration to Rust",
        ],
    );
    // The name line arrives as two fragments, the second slightly off the
    // baseline and out of order.
    first.push(PositionedFragment::new(
        "| jane.doe@example.com | (512) 555-0199",
        117.0,
        761.2,
        200.0,
        0,
    ));
    first.push(PositionedFragment::new("Jane Doe", 72.0, 760.0, 40.0, 0));

    let second = page(
        1,
        &[
            "Projects",
            "• resume2json: PDF to JSON extractor",
            "Technical Skills",
            "Languages: Rust, Python, Go",
            "Tools: Git, Docker, Rust",
        ],
    );
    vec![first, second]
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl Recorder {
    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ExtractionProgressCallback for Recorder {
    fn on_extraction_start(&self, total_pages: usize) {
        self.push(format!("start {total_pages}"));
    }
    fn on_page_start(&self, page_num: usize, _total: usize) {
        self.push(format!("page {page_num}"));
    }
    fn on_page_decoded(&self, page_num: usize, _total: usize, fragment_count: usize) {
        self.push(format!("decoded {page_num} {fragment_count}"));
    }
    fn on_page_error(&self, page_num: usize, _total: usize, _error: &str) {
        self.push(format!("error {page_num}"));
    }
    fn on_extraction_complete(&self, total_pages: usize, _line_count: usize) {
        self.push(format!("complete {total_pages}"));
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn full_resume_is_structured() {
    let decoder = FixtureDecoder::new(sample_resume());
    let config = ExtractionConfig::default();
    let output = extract_with_decoder(&decoder, PDF_BYTES, &config).unwrap();
    let doc = &output.document;

    assert_eq!(doc.name, "Jane Doe");
    assert!(doc.title.is_none());
    assert_eq!(doc.contact.email.as_deref(), Some("jane.doe@example.com"));
    assert_eq!(doc.contact.phone.as_deref(), Some("(512) 555-0199"));
    assert_eq!(doc.contact.location.as_deref(), Some("Austin, TX"));
    assert_eq!(
        doc.contact.links,
        vec!["https://github.com/janedoe", "https://janedoe.dev"]
    );

    let headings: Vec<&str> = doc.sections.iter().map(|s| s.heading.as_str()).collect();
    assert_eq!(
        headings,
        vec!["Education", "Experience", "Projects", "Technical Skills"]
    );
    assert_eq!(
        doc.section("Education").unwrap().items,
        vec!["State University — B.S. Computer Science, 2019 — 2023"]
    );
    assert_eq!(
        doc.section("Experience").unwrap().items,
        vec![
            "Acme Corp — Software Engineer",
            "Built a billing service handling millions of requests per day",
            "Led the migration to Rust",
        ]
    );
    assert_eq!(
        doc.section("Technical Skills").unwrap().items,
        vec!["Languages: Rust, Python, Go", "Tools: Git, Docker, Rust"]
    );
    assert_eq!(
        doc.skills.as_deref(),
        Some(&["Rust", "Python", "Go", "Git", "Docker"].map(String::from)[..])
    );
}

#[test]
fn lines_and_stats_are_reported() {
    let decoder = FixtureDecoder::new(sample_resume());
    let config = ExtractionConfig::default();
    let output = extract_with_decoder(&decoder, PDF_BYTES, &config).unwrap();

    assert_eq!(
        output.lines[0],
        "Jane Doe | jane.doe@example.com | (512) 555-0199"
    );
    // One page-break marker after each page.
    assert_eq!(output.lines.iter().filter(|l| l.is_empty()).count(), 2);
    assert!(output.lines.windows(2).all(|w| w[0] != w[1]));

    let stats = &output.stats;
    assert_eq!(stats.total_pages, 2);
    assert_eq!(stats.fragment_count, 16);
    assert_eq!(stats.line_count, output.lines.len());
    assert_eq!(stats.section_count, 4);
    assert_eq!(stats.skill_count, 5);
}

#[test]
fn extraction_is_idempotent() {
    let decoder = FixtureDecoder::new(sample_resume());
    let config = ExtractionConfig::default();
    let a = extract_with_decoder(&decoder, PDF_BYTES, &config).unwrap();
    let b = extract_with_decoder(&decoder, PDF_BYTES, &config).unwrap();
    assert_eq!(
        a.document.to_json_pretty().unwrap(),
        b.document.to_json_pretty().unwrap()
    );
}

#[test]
fn missing_email_is_absent_from_json() {
    let decoder = FixtureDecoder::new(vec![page(
        0,
        &["John Smith", "Experience", "• Did things"],
    )]);
    let config = ExtractionConfig::default();
    let output = extract_with_decoder(&decoder, PDF_BYTES, &config).unwrap();

    assert!(output.document.contact.email.is_none());
    let json = output.document.to_json_pretty().unwrap();
    assert!(!json.contains("\"email\""), "got: {json}");
    assert!(!json.contains("\"skills\""));
    assert!(!json.contains("null"));
}

#[test]
fn empty_document_still_produces_json() {
    let decoder = FixtureDecoder::new(vec![vec![]]);
    let config = ExtractionConfig::default();
    let output = extract_with_decoder(&decoder, PDF_BYTES, &config).unwrap();

    assert_eq!(output.document.name, "Unnamed");
    assert!(output.document.sections.is_empty());
    assert_eq!(output.lines, vec![""]);
}

#[test]
fn rejected_document_is_a_decode_error() {
    let decoder = FixtureDecoder::new(sample_resume());
    let config = ExtractionConfig::default();
    let err = extract_with_decoder(&decoder, b"not a pdf", &config).unwrap_err();
    assert!(matches!(err, ResumeError::Decode(DecodeError::Rejected(_))));
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn progress_events_follow_page_order() {
    let recorder = Arc::new(Recorder::default());
    let config = ExtractionConfig::builder()
        .progress_callback(recorder.clone())
        .build()
        .unwrap();
    let decoder = FixtureDecoder::new(sample_resume());
    extract_with_decoder(&decoder, PDF_BYTES, &config).unwrap();

    let events = recorder.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "start 2",
            "page 1",
            "decoded 1 11",
            "page 2",
            "decoded 2 5",
            "complete 2",
        ]
    );
}

#[test]
fn failing_page_aborts_with_progress_error() {
    let recorder = Arc::new(Recorder::default());
    let config = ExtractionConfig::builder()
        .progress_callback(recorder.clone())
        .build()
        .unwrap();
    let mut decoder = FixtureDecoder::new(sample_resume());
    decoder.fail_page = Some(1);

    let err = extract_with_decoder(&decoder, PDF_BYTES, &config).unwrap_err();
    assert!(matches!(
        err,
        ResumeError::Decode(DecodeError::Page { page: 2, .. })
    ));

    let events = recorder.events.lock().unwrap().clone();
    assert_eq!(events.last().map(String::as_str), Some("error 2"));
    assert!(!events.iter().any(|e| e.starts_with("complete")));
}

/// Extract with `decoder` and write the result, like `extract_to_file`.
async fn build_into(decoder: &FixtureDecoder, out: &Path) -> Result<(), ResumeError> {
    let config = ExtractionConfig::default();
    let output = extract_with_decoder(decoder, PDF_BYTES, &config)?;
    write_document(&output.document, out).await
}

#[tokio::test]
async fn output_written_and_previous_file_survives_failure() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("src/content/resume.json");

    build_into(&FixtureDecoder::new(sample_resume()), &out)
        .await
        .unwrap();
    let good = std::fs::read_to_string(&out).unwrap();
    assert!(good.starts_with("{\n"));
    assert!(good.ends_with("}\n"));
    let parsed: serde_json::Value = serde_json::from_str(&good).unwrap();
    assert_eq!(parsed["name"], "Jane Doe");
    assert_eq!(parsed["contact"]["location"], "Austin, TX");

    let mut broken = FixtureDecoder::new(sample_resume());
    broken.fail_page = Some(0);
    let err = build_into(&broken, &out).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);

    assert_eq!(std::fs::read_to_string(&out).unwrap(), good);
    assert!(!out.with_extension("json.tmp").exists());
}
