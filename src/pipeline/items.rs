//! Body itemization: turn a section's lines into discrete items.
//!
//! Splitting is a small rule-based classifier. Which rule set applies is
//! decided once per section:
//!
//! * **Bullet mode**: the body contains [`BULLET`] anywhere. Each bullet
//!   starts exactly one item. A line without a leading bullet continues the
//!   previous bullet unless it starts with an uppercase letter, so wrapped
//!   lines beginning lowercase, with a digit or with punctuation are joined.
//!   An uppercase line is an item of its own (e.g. a "Company — Role" line
//!   between two bullet groups). Item text after the bullet is kept as is,
//!   including a leading `2021.`.
//!
//! * **Fallback mode**: no bullet present. The body is joined with `\n` and
//!   cut at the boundaries in [`FALLBACK_RULES`]. When two rules match at the
//!   same position the earlier one wins; otherwise the leftmost match wins.
//!   This mis-segments some narrative prose; bulleted resumes are the
//!   primary target.
//!
//! In fallback mode leading numbered-list markers are stripped. In both
//! modes internal whitespace is collapsed and empty items are dropped.

use crate::config::ExtractionConfig;
use crate::pipeline::normalize::{collapse_whitespace, BULLET};
use once_cell::sync::Lazy;
use regex::Regex;

/// A boundary rule of the fallback splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRule {
    /// `<digits>. ` at the start of the body or of a line. The marker itself
    /// is consumed.
    NumberedMarker,
    /// A newline followed by an uppercase letter.
    LineStartUppercase,
    /// A period, whitespace, then an uppercase letter. Subject to
    /// [`ExtractionConfig::sentence_split_min_chars`]; periods closing a
    /// single capital initial (`J.`) or a letter-dot run (`B.S.`, `Ph.D.`)
    /// do not count.
    SentenceEnd,
}

/// Fallback rules in precedence order.
pub const FALLBACK_RULES: [SplitRule; 3] = [
    SplitRule::NumberedMarker,
    SplitRule::LineStartUppercase,
    SplitRule::SentenceEnd,
];

impl SplitRule {
    fn group(self) -> &'static str {
        match self {
            SplitRule::NumberedMarker => "num",
            SplitRule::LineStartUppercase => "line",
            SplitRule::SentenceEnd => "sent",
        }
    }

    /// Pattern whose named group spans the text removed between two items;
    /// the next item starts at the group's end.
    fn pattern(self) -> &'static str {
        match self {
            SplitRule::NumberedMarker => r"(?P<num>(?:^|\n)\d+\.[ \t]+)",
            SplitRule::LineStartUppercase => r"(?P<line>\n)[A-Z]",
            SplitRule::SentenceEnd => r"\.(?P<sent>\s+)[A-Z]",
        }
    }
}

fn boundary_regex(rules: &[SplitRule]) -> Regex {
    let alternation = rules
        .iter()
        .map(|r| r.pattern())
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).unwrap()
}

static RE_ALL_RULES: Lazy<Regex> = Lazy::new(|| boundary_regex(&FALLBACK_RULES));

static RE_NO_SENTENCE: Lazy<Regex> = Lazy::new(|| {
    let rules: Vec<SplitRule> = FALLBACK_RULES
        .into_iter()
        .filter(|r| *r != SplitRule::SentenceEnd)
        .collect();
    boundary_regex(&rules)
});

static RE_LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+").unwrap());

/// Token before a period: `J`, `B.S`, `Ph.D`, `e.g`.
static RE_ABBREVIATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Z]|(?:[A-Za-z]{1,2}\.)+[A-Za-z]{1,2})$").unwrap());

/// Split one section body into items.
pub fn itemize(body: &[String], config: &ExtractionConfig) -> Vec<String> {
    if body.iter().any(|l| l.contains(BULLET)) {
        return split_bullets(body);
    }

    let joined = body.join("\n");
    let sentences = config
        .sentence_split_min_chars
        .is_none_or(|min| joined.chars().count() >= min);
    split_fallback(&joined, sentences)
}

/// Bullet mode.
pub fn split_bullets(body: &[String]) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    let mut last_is_bullet = false;

    for line in body {
        for segment in split_before_bullets(line) {
            if let Some(rest) = segment.strip_prefix(BULLET) {
                items.push(rest.trim().to_string());
                last_is_bullet = true;
                continue;
            }

            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            match items.last_mut() {
                Some(prev) if last_is_bullet && is_continuation(segment) => {
                    prev.push(' ');
                    prev.push_str(segment);
                }
                _ => {
                    items.push(segment.to_string());
                    last_is_bullet = false;
                }
            }
        }
    }

    finish(items, false)
}

/// Fallback mode over the `\n`-joined body.
pub fn split_fallback(text: &str, sentence_rule: bool) -> Vec<String> {
    let re: &Regex = if sentence_rule {
        &RE_ALL_RULES
    } else {
        &RE_NO_SENTENCE
    };

    let mut items = Vec::new();
    let mut start = 0;
    for caps in re.captures_iter(text) {
        let Some((rule, cut)) = FALLBACK_RULES
            .iter()
            .find_map(|rule| caps.name(rule.group()).map(|m| (*rule, m)))
        else {
            continue;
        };
        // The group starts right after the period.
        if rule == SplitRule::SentenceEnd && ends_with_abbreviation(&text[..cut.start() - 1]) {
            continue;
        }
        items.push(text[start..cut.start()].to_string());
        start = cut.end();
    }
    items.push(text[start..].to_string());

    finish(items, true)
}

/// Split a line immediately before every bullet, keeping the bullet.
fn split_before_bullets(line: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for (idx, _) in line.match_indices(BULLET) {
        if idx > start {
            out.push(&line[start..idx]);
        }
        start = idx;
    }
    out.push(&line[start..]);
    out
}

/// `B.S. Computer`, `J. Doe`: a period closing an initial or a dotted
/// abbreviation does not end a sentence. `5.`, `2.5x.` and `Node.js.` do.
fn ends_with_abbreviation(before_dot: &str) -> bool {
    let token = before_dot
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default();
    RE_ABBREVIATION.is_match(token)
}

fn is_continuation(segment: &str) -> bool {
    segment.chars().next().is_some_and(|c| !c.is_uppercase())
}

fn finish(items: Vec<String>, strip_markers: bool) -> Vec<String> {
    items
        .into_iter()
        .map(|item| {
            let item = collapse_whitespace(item.trim());
            if strip_markers {
                RE_LEADING_NUMBER.replace(&item, "").trim().to_string()
            } else {
                item
            }
        })
        .filter(|item| !item.is_empty())
        .collect()
}
