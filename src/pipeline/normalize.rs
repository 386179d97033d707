//! Text normalisation applied to every reconstructed line.
//!
//! Decoders report the same visual glyph in several ways: five different
//! bullet code points, stray carriage returns, runs of spaces where a
//! justified line was stretched, zero-width characters from copy-paste.
//! Downstream stages (bullet splitting, heading equality, dedup) compare
//! strings literally, so every line goes through the same fixed set of
//! rules first.
//!
//! ## Rule Order
//!
//! Invisible characters go first so they cannot hide between spaces; bullet
//! canonicalisation runs before whitespace collapse so `•` followed by a tab
//! collapses like any other; the dash rule needs collapsed whitespace around
//! the en dash; trimming is last.

use once_cell::sync::Lazy;
use regex::Regex;

/// The single bullet character every bullet glyph is mapped to.
pub const BULLET: char = '•';

/// Dash token substituted for a spaced en dash (`2019 – 2021`).
pub const DASH_TOKEN: &str = " — ";

/// Glyphs treated as bullets. U+F0B7 is the private-use bullet emitted by
/// Symbol-font lists in word-processor exports.
const BULLET_GLYPHS: &[char] = &[
    '\u{2022}', '\u{2023}', '\u{25E6}', '\u{2043}', '\u{2219}', '\u{25CF}', '\u{25AA}', '\u{F0B7}',
];

/// Apply all normalisation rules to one line.
///
/// 1. Strip invisible Unicode (zero-width space/joiners, BOM, soft hyphen, word joiner)
/// 2. Canonicalise bullet glyphs to [`BULLET`]
/// 3. Strip carriage returns
/// 4. Collapse runs of spaces and tabs to one space
/// 5. Replace an en dash with whitespace on both sides by [`DASH_TOKEN`]
/// 6. Trim
pub fn normalize_line(input: &str) -> String {
    let s = remove_invisible_chars(input);
    let s = canonicalize_bullets(&s);
    let s = strip_carriage_returns(&s);
    let s = collapse_spaces(&s);
    let s = canonicalize_dashes(&s);
    s.trim().to_string()
}

/// Collapse every whitespace run (newlines included) to one space.
///
/// Used on raw fragment text before bucketing.
pub fn collapse_whitespace(input: &str) -> String {
    RE_ANY_WHITESPACE.replace_all(input, " ").into_owned()
}

// ── Rule 1: Remove invisible Unicode characters ─────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

// ── Rule 2: Canonicalise bullet glyphs ──────────────────────────────────────

fn canonicalize_bullets(input: &str) -> String {
    input.replace(BULLET_GLYPHS, "•")
}

// ── Rule 3: Strip carriage returns ──────────────────────────────────────────

fn strip_carriage_returns(input: &str) -> String {
    input.replace('\r', "")
}

// ── Rule 4: Collapse spaces and tabs ────────────────────────────────────────

static RE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static RE_ANY_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

fn collapse_spaces(input: &str) -> String {
    RE_SPACES.replace_all(input, " ").into_owned()
}

// ── Rule 5: Canonicalise spaced en dashes ───────────────────────────────────

static RE_SPACED_EN_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\u{2013}\s+").unwrap());

fn canonicalize_dashes(input: &str) -> String {
    RE_SPACED_EN_DASH.replace_all(input, DASH_TOKEN).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullets_are_canonicalised() {
        for glyph in BULLET_GLYPHS {
            let line = format!("{glyph} Built a thing");
            assert_eq!(normalize_line(&line), "• Built a thing", "glyph U+{:04X}", *glyph as u32);
        }
    }

    #[test]
    fn carriage_returns_are_stripped() {
        assert_eq!(normalize_line("Education\r"), "Education");
    }

    #[test]
    fn spaces_and_tabs_collapse() {
        assert_eq!(normalize_line("Jane   Doe\t\t| Austin"), "Jane Doe | Austin");
    }

    #[test]
    fn spaced_en_dash_becomes_dash_token() {
        assert_eq!(normalize_line("2019 \u{2013} 2021"), "2019 — 2021");
        // Unspaced en dashes are ranges inside a word and stay as-is.
        assert_eq!(normalize_line("2019\u{2013}2021"), "2019\u{2013}2021");
    }

    #[test]
    fn invisible_chars_removed() {
        assert_eq!(normalize_line("Py\u{200B}thon\u{FEFF}"), "Python");
    }

    #[test]
    fn whitespace_only_normalises_to_empty() {
        assert_eq!(normalize_line(" \t \r "), "");
    }

    #[test]
    fn collapse_whitespace_handles_newlines() {
        assert_eq!(collapse_whitespace("a\n\n b\tc"), "a b c");
        assert_eq!(collapse_whitespace("   "), " ");
    }
}
