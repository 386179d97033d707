//! Line reconstruction: cluster positioned fragments into reading-order text.
//!
//! ## Algorithm (per page)
//!
//! 1. Bucket fragments by `y`: a fragment joins the **first** existing line
//!    whose representative `y` (the `y` of its first fragment) lies within
//!    the tolerance, else it opens a new line. First-fit, not best-fit, so
//!    output is reproducible for a given fragment order.
//! 2. Sort lines by descending `y` (top of page first), fragments within a
//!    line by ascending `x`.
//! 3. Join fragment text, inserting one space where the gap between one
//!    fragment's right edge and the next fragment's left edge exceeds the
//!    gap threshold, then normalise.
//! 4. Emit non-empty lines followed by one empty line as a page break.
//!
//! After the last page, runs of identical consecutive lines collapse to one
//! (running headers/footers that repeat across a page break).

use crate::pipeline::decode::PositionedFragment;
use crate::pipeline::normalize::{collapse_whitespace, normalize_line};

/// Geometric parameters for [`reconstruct_lines`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGeometry {
    /// Maximum `|y - line.y|` for a fragment to join a line.
    pub tolerance: f32,
    /// Gap above which a space separates two fragments.
    pub gap_threshold: f32,
}

impl Default for LineGeometry {
    fn default() -> Self {
        Self {
            tolerance: 2.5,
            gap_threshold: 1.0,
        }
    }
}

/// Fragments sharing one baseline. Transient; consumed by rendering.
#[derive(Debug, Clone)]
struct Line {
    y: f32,
    fragments: Vec<PositionedFragment>,
}

/// Reconstruct the text lines of a whole document.
///
/// `pages` holds one fragment list per page, in page order. The result has
/// an empty string after each page and never two equal consecutive lines.
pub fn reconstruct_lines(pages: &[Vec<PositionedFragment>], geometry: LineGeometry) -> Vec<String> {
    let mut out = Vec::new();
    for fragments in pages {
        out.extend(page_lines(fragments, geometry));
        out.push(String::new());
    }
    dedup_consecutive(out)
}

/// Rendered, non-empty lines of one page in reading order.
pub fn page_lines(fragments: &[PositionedFragment], geometry: LineGeometry) -> Vec<String> {
    let mut lines = bucket_fragments(fragments, geometry.tolerance);

    // Stable sorts: lines at equal `y` keep creation order, fragments at
    // equal `x` keep decoder order.
    lines.sort_by(|a, b| b.y.total_cmp(&a.y));
    for line in &mut lines {
        line.fragments.sort_by(|a, b| a.x.total_cmp(&b.x));
    }

    lines
        .iter()
        .map(|line| render_line(&line.fragments, geometry.gap_threshold))
        .filter(|text| !text.is_empty())
        .collect()
}

/// First-fit `y` clustering.
fn bucket_fragments(fragments: &[PositionedFragment], tolerance: f32) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();

    for fragment in fragments {
        if fragment.text.is_empty() {
            continue;
        }
        let text = collapse_whitespace(&fragment.text);
        let visible = !text.trim().is_empty();

        let fragment = PositionedFragment {
            text,
            ..fragment.clone()
        };

        match lines
            .iter_mut()
            .find(|line| (line.y - fragment.y).abs() <= tolerance)
        {
            Some(line) => line.fragments.push(fragment),
            // Whitespace-only fragments may pad an existing line but never
            // open one.
            None if visible => lines.push(Line {
                y: fragment.y,
                fragments: vec![fragment],
            }),
            None => {}
        }
    }

    lines
}

/// Join sorted fragments into one normalised string.
fn render_line(fragments: &[PositionedFragment], gap_threshold: f32) -> String {
    let mut out = String::new();
    let mut prev_end: Option<f32> = None;

    for fragment in fragments {
        if let Some(end) = prev_end {
            if fragment.x - end > gap_threshold {
                out.push(' ');
            }
        }
        out.push_str(&fragment.text);
        prev_end = Some(fragment.right());
    }

    normalize_line(&out)
}

fn dedup_consecutive(mut lines: Vec<String>) -> Vec<String> {
    lines.dedup();
    lines
}
