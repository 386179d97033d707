//! Section segmentation over the fixed heading vocabulary.
//!
//! A line opens a section when its trimmed text equals one of the configured
//! headings, ignoring case; the section keeps the vocabulary's casing. Every
//! following non-blank line belongs to that section until the next heading.
//! Lines before the first heading never reach a section body.

use crate::config::ExtractionConfig;
use tracing::{debug, warn};

/// A recognised section with its raw body lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection {
    /// Canonical heading from the vocabulary.
    pub heading: String,
    /// Trimmed, non-blank body lines in document order.
    pub body: Vec<String>,
}

/// Drop every line before the first recognised heading.
///
/// Returns an empty slice when the document has no heading at all.
pub fn trim_to_first_heading<'a>(lines: &'a [String], config: &ExtractionConfig) -> &'a [String] {
    match lines
        .iter()
        .position(|l| config.canonical_heading(l).is_some())
    {
        Some(idx) => &lines[idx..],
        None => &[],
    }
}

/// Group lines into sections.
pub fn segment_sections(lines: &[String], config: &ExtractionConfig) -> Vec<RawSection> {
    let mut sections = Vec::new();
    let mut current: Option<RawSection> = None;

    for raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(heading) = config.canonical_heading(line) {
            if let Some(done) = current.take() {
                sections.push(done);
            }
            current = Some(RawSection {
                heading: heading.to_string(),
                body: Vec::new(),
            });
            continue;
        }

        // Pre-heading noise (name, contact line) is skipped here.
        if let Some(section) = current.as_mut() {
            section.body.push(line.to_string());
        }
    }
    if let Some(done) = current {
        sections.push(done);
    }

    if sections.is_empty() {
        warn!("No recognised section headings; document will have no sections");
    }
    for s in &sections {
        debug!("Section {:?}: {} body lines", s.heading, s.body.len());
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn headings_open_sections_case_insensitively() {
        let config = ExtractionConfig::default();
        let src = lines(&["EDUCATION", "State U", "experience", "Acme", "Projects", "Thing"]);
        let got = segment_sections(&src, &config);
        let headings: Vec<&str> = got.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Education", "Experience", "Projects"]);
        assert_eq!(got[0].body, vec!["State U"]);
        assert_eq!(got[2].body, vec!["Thing"]);
    }

    #[test]
    fn pre_heading_lines_never_leak() {
        let config = ExtractionConfig::default();
        let src = lines(&["Jane Doe", "jane@x.io", "", "Skills", "Languages: Rust"]);
        let got = segment_sections(&src, &config);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].body, vec!["Languages: Rust"]);
        assert!(got.iter().all(|s| !s.body.iter().any(|l| l.contains("Jane"))));
    }

    #[test]
    fn blank_lines_skipped_and_last_section_closed() {
        let config = ExtractionConfig::default();
        let src = lines(&["Awards", "", "Dean's List", "", "  Hackathon winner  ", ""]);
        let got = segment_sections(&src, &config);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].body, vec!["Dean's List", "Hackathon winner"]);
    }

    #[test]
    fn heading_must_match_whole_line() {
        let config = ExtractionConfig::default();
        let src = lines(&["Experience", "Education at State U", "Skills and more"]);
        let got = segment_sections(&src, &config);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].body.len(), 2);
    }

    #[test]
    fn empty_section_is_kept() {
        let config = ExtractionConfig::default();
        let got = segment_sections(&lines(&["Leadership", "Activities", "Chess club"]), &config);
        assert_eq!(got.len(), 2);
        assert!(got[0].body.is_empty());
    }

    #[test]
    fn trim_to_first_heading_drops_header() {
        let config = ExtractionConfig::default();
        let src = lines(&["Jane Doe", "Austin, TX", "Education", "State U"]);
        assert_eq!(trim_to_first_heading(&src, &config), &src[2..]);
        let none = lines(&["Jane Doe", "Nothing else"]);
        assert!(trim_to_first_heading(&none, &config).is_empty());
    }

    #[test]
    fn custom_vocabulary() {
        let config = ExtractionConfig::builder()
            .headings(["Publications", "Experience"])
            .build()
            .unwrap();
        let src = lines(&["publications", "Paper A", "Education", "Ignored heading text"]);
        let got = segment_sections(&src, &config);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].heading, "Publications");
        assert_eq!(got[0].body, vec!["Paper A", "Education", "Ignored heading text"]);
    }
}
