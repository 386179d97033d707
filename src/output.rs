//! Output types: the resume document written to disk and the extraction
//! report returned to library callers.
//!
//! Optional fields are omitted from the JSON entirely (never `null`, never
//! an empty string) so the front-end can test for presence.

use serde::{Deserialize, Serialize};

/// Contact block parsed from the resume header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// `http(s)://` links, de-duplicated, first-seen order.
    #[serde(default)]
    pub links: Vec<String>,
}

/// One recognised section with its items in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub items: Vec<String>,
}

/// The JSON document consumed by the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub contact: ContactInfo,
    pub sections: Vec<Section>,
    /// Flattened, de-duplicated skills. Omitted when no skills were found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

impl ResumeDocument {
    /// Section with the given canonical heading, if present.
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }

    /// Pretty-printed JSON with a trailing newline, as written to disk.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Counters and timings for one extraction run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub total_pages: usize,
    /// Fragments reported by the decoder, before empty ones were skipped.
    pub fragment_count: usize,
    /// Reconstructed lines, page-break markers included.
    pub line_count: usize,
    pub section_count: usize,
    pub skill_count: usize,
    pub decode_duration_ms: u64,
    pub total_duration_ms: u64,
}

/// Everything an extraction produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutput {
    pub document: ResumeDocument,
    /// Reconstructed text lines; an empty string marks a page break.
    pub lines: Vec<String>,
    pub stats: ExtractionStats,
}
