//! Header parsing: name, contact fields and (optionally) title.
//!
//! Only the name and the location care where they appear. Email, phone and
//! links are searched across the whole document (non-empty lines joined by
//! spaces) because some templates put contact details in a footer.
//!
//! Every field is optional except the name, which falls back to the
//! configured default. Nothing here can fail.

use crate::config::{ExtractionConfig, US_STATES};
use crate::output::ContactInfo;
use crate::pipeline::normalize::BULLET;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Result of [`parse_header`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub title: Option<String>,
    pub contact: ContactInfo,
}

static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}").unwrap());

static RE_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\(?\d[\d ()-]{7,}\d").unwrap());

static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bhttps?://[^\s)]+").unwrap());

static RE_CITY_STATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][a-z]+(?:\s[A-Z][a-z]+)*),\s([A-Z]{2})\b").unwrap());

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;
const MAX_TITLE_WORDS: usize = 8;

/// Parse the header fields from the full reconstructed line sequence.
pub fn parse_header(lines: &[String], config: &ExtractionConfig) -> Header {
    let non_empty: Vec<&str> = lines
        .iter()
        .map(String::as_str)
        .filter(|l| !l.trim().is_empty())
        .collect();
    let window = &non_empty[..non_empty.len().min(config.header_window)];
    let joined = non_empty.join(" ");

    let name = window
        .first()
        .and_then(|first| extract_name(first))
        .unwrap_or_else(|| config.fallback_name.clone());

    let location = find_location(window).or_else(|| find_location(&non_empty));

    let contact = ContactInfo {
        email: find_email(&joined),
        phone: find_phone(&joined),
        location,
        links: find_links(&joined),
    };

    let title = if config.infer_title {
        window.get(1).and_then(|line| infer_title(line, config))
    } else {
        None
    };

    debug!(
        "Header: name={:?} email={} phone={} location={:?} links={}",
        name,
        contact.email.is_some(),
        contact.phone.is_some(),
        contact.location,
        contact.links.len()
    );

    Header {
        name,
        title,
        contact,
    }
}

/// Text of the first line up to the first `|` or bullet.
fn extract_name(line: &str) -> Option<String> {
    let name = line
        .split(|c: char| c == '|' || c == BULLET)
        .next()
        .unwrap_or_default()
        .trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// First email-shaped token.
pub fn find_email(text: &str) -> Option<String> {
    RE_EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// First digits-with-separators run holding 7 to 15 digits.
pub fn find_phone(text: &str) -> Option<String> {
    RE_PHONE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|candidate| {
            let digits = candidate.chars().filter(char::is_ascii_digit).count();
            (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
        })
        .map(str::to_string)
}

/// All `http(s)://` links, de-duplicated in first-seen order.
pub fn find_links(text: &str) -> Vec<String> {
    RE_LINK
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';']).to_string())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// First `City, ST` whose state code is a US state.
pub fn find_location<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    lines.iter().find_map(|line| {
        RE_CITY_STATE
            .captures_iter(line.as_ref())
            .find(|caps| US_STATES.contains(&caps[2]))
            .map(|caps| format!("{}, {}", &caps[1], &caps[2]))
    })
}

/// A short descriptive line with no contact tokens, e.g. "Software Engineer".
fn infer_title(line: &str, config: &ExtractionConfig) -> Option<String> {
    let line = line.trim();
    let has_contact_token = line.contains('@')
        || line.to_lowercase().contains("http")
        || line.contains('|')
        || line.contains(BULLET)
        || line.chars().any(|c| c.is_ascii_digit());

    if line.is_empty()
        || has_contact_token
        || config.canonical_heading(line).is_some()
        || find_location(&[line]).is_some()
        || line.split_whitespace().count() > MAX_TITLE_WORDS
    {
        return None;
    }
    Some(line.to_string())
}
