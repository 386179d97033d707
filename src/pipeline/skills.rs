//! Skills block parsing: `Label: v1, v2` categories and a flattened list.
//!
//! The body is joined with spaces, so labels are found by scanning backward
//! from each colon over label characters (letters, spaces, `&`, `/`). That
//! run often swallows the tail of the previous category's values
//! (`... Python Web Frameworks:`), so the label starts at the latest line
//! start inside the run when there is one, and at the run's last word
//! otherwise. A colon followed by `//` is part of a URL, not a label.

use crate::pipeline::normalize::BULLET;
use indexmap::{IndexMap, IndexSet};
use tracing::warn;

/// Parsed skills section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillsBlock {
    /// Category label to values, in order of first appearance. A repeated
    /// label keeps its first position and takes the later values.
    pub categories: IndexMap<String, Vec<String>>,
    /// All values, de-duplicated, first-seen order.
    pub list: Vec<String>,
}

impl SkillsBlock {
    /// `"Category: v1, v2"` strings for the rendered section.
    pub fn display_items(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|(label, values)| format!("{label}: {}", values.join(", ")))
            .collect()
    }
}

/// Byte offsets of one label in the joined text.
#[derive(Debug, Clone, Copy)]
struct Label {
    start: usize,
    colon: usize,
}

/// Parse the body lines of a skills section.
pub fn parse_skills_block(body: &[String]) -> SkillsBlock {
    let mut text = String::new();
    let mut line_starts = Vec::new();
    for line in body.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
        if !text.is_empty() {
            text.push(' ');
        }
        line_starts.push(text.len());
        text.push_str(line);
    }

    let labels = find_labels(&text, &line_starts);
    if labels.is_empty() {
        if !text.is_empty() {
            warn!("Skills section has no `Label:` entries; skills will be empty");
        }
        return SkillsBlock::default();
    }

    let mut categories: IndexMap<String, Vec<String>> = IndexMap::new();
    for (i, label) in labels.iter().enumerate() {
        let end = labels.get(i + 1).map_or(text.len(), |next| next.start);
        let values = split_values(&text[label.colon + 1..end]);
        if values.is_empty() {
            continue;
        }
        categories.insert(text[label.start..label.colon].trim().to_string(), values);
    }

    let list = categories
        .values()
        .flatten()
        .cloned()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect();

    SkillsBlock { categories, list }
}

fn is_label_char(c: char) -> bool {
    c.is_alphabetic() || matches!(c, ' ' | '&' | '/')
}

fn find_labels(text: &str, line_starts: &[usize]) -> Vec<Label> {
    let mut labels = Vec::new();
    // Labels never reach back past the previous label's colon.
    let mut floor = 0;

    for (colon, _) in text.match_indices(':') {
        if text[colon + 1..].starts_with("//") {
            continue;
        }

        let before = &text[floor..colon];
        let run_len: usize = before
            .chars()
            .rev()
            .take_while(|c| is_label_char(*c))
            .map(char::len_utf8)
            .sum();
        let run = &before[before.len() - run_len..];
        let lead = run.len() - run.trim_start().len();
        let run_start = colon - run_len + lead;
        if !text[run_start..colon].chars().any(char::is_alphabetic) {
            continue;
        }

        let start = match line_starts
            .iter()
            .rev()
            .find(|&&ls| ls >= run_start && ls < colon)
        {
            Some(&ls) => ls,
            None => {
                let core = text[run_start..colon].trim_end();
                run_start + core.rfind(' ').map_or(0, |i| i + 1)
            }
        };

        labels.push(Label { start, colon });
        floor = colon + 1;
    }

    labels
}

fn split_values(values: &str) -> Vec<String> {
    values
        .split([',', BULLET])
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
