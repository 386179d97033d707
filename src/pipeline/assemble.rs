//! Document assembly: header + sections + flattened skills.

use crate::config::ExtractionConfig;
use crate::output::{ResumeDocument, Section};
use crate::pipeline::header::Header;
use crate::pipeline::items::itemize;
use crate::pipeline::sections::RawSection;
use crate::pipeline::skills::parse_skills_block;
use indexmap::IndexSet;
use tracing::debug;

/// Build the output document.
///
/// Skills-routed sections are rendered as `"Category: v1, v2"` items under
/// [`ExtractionConfig::skills_display_heading`]; their values feed the
/// top-level `skills` list, which is the de-duplicated union over every
/// skills section and is omitted when empty.
pub fn assemble_document(
    header: Header,
    raw_sections: Vec<RawSection>,
    config: &ExtractionConfig,
) -> ResumeDocument {
    let mut sections = Vec::with_capacity(raw_sections.len());
    let mut skills: IndexSet<String> = IndexSet::new();

    for raw in raw_sections {
        if config.is_skills_heading(&raw.heading) {
            let block = parse_skills_block(&raw.body);
            debug!(
                "Skills section {:?}: {} categories, {} values",
                raw.heading,
                block.categories.len(),
                block.list.len()
            );
            sections.push(Section {
                heading: config.skills_display_heading.clone(),
                items: block.display_items(),
            });
            skills.extend(block.list);
        } else {
            let items = itemize(&raw.body, config);
            sections.push(Section {
                heading: raw.heading,
                items,
            });
        }
    }

    ResumeDocument {
        name: header.name,
        title: header.title,
        contact: header.contact,
        sections,
        skills: (!skills.is_empty()).then(|| skills.into_iter().collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::ContactInfo;

    fn raw(heading: &str, body: &[&str]) -> RawSection {
        RawSection {
            heading: heading.to_string(),
            body: body.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn header() -> Header {
        Header {
            name: "Jane Doe".into(),
            title: None,
            contact: ContactInfo::default(),
        }
    }

    #[test]
    fn skills_section_rendered_and_flattened() {
        let config = ExtractionConfig::default();
        let doc = assemble_document(
            header(),
            vec![
                raw("Experience", &["• Built a service"]),
                raw("Skills", &["Languages: Rust, Go", "Tools: Git"]),
            ],
            &config,
        );
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].items, vec!["Built a service"]);
        assert_eq!(doc.sections[1].heading, "Technical Skills");
        assert_eq!(doc.sections[1].items, vec!["Languages: Rust, Go", "Tools: Git"]);
        assert_eq!(doc.skills, Some(vec!["Rust".into(), "Go".into(), "Git".into()]));
    }

    #[test]
    fn multiple_skills_sections_union() {
        let config = ExtractionConfig::default();
        let doc = assemble_document(
            header(),
            vec![
                raw("Technical Skills", &["Languages: Rust, Go"]),
                raw("Projects", &["• Parser"]),
                raw("Skills", &["Languages: Go, Python"]),
            ],
            &config,
        );
        let headings: Vec<&str> = doc.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Technical Skills", "Projects", "Technical Skills"]);
        assert_eq!(
            doc.skills,
            Some(vec!["Rust".into(), "Go".into(), "Python".into()])
        );
    }

    #[test]
    fn skills_omitted_when_nothing_found() {
        let config = ExtractionConfig::default();
        let doc = assemble_document(header(), vec![raw("Skills", &["Rust and Go"])], &config);
        assert!(doc.skills.is_none());
        assert!(doc.sections[0].items.is_empty());

        let doc = assemble_document(header(), vec![], &config);
        assert!(doc.skills.is_none());
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn header_fields_carried_over() {
        let config = ExtractionConfig::default();
        let mut h = header();
        h.title = Some("Engineer".into());
        h.contact.email = Some("jane@x.io".into());
        let doc = assemble_document(h, vec![], &config);
        assert_eq!(doc.name, "Jane Doe");
        assert_eq!(doc.title.as_deref(), Some("Engineer"));
        assert_eq!(doc.contact.email.as_deref(), Some("jane@x.io"));
    }
}
