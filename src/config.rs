//! Configuration types for resume extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`]. The geometric constants (line
//! tolerance, gap threshold) and the heading vocabulary live here so that a
//! resume template which clusters badly can be tuned without code changes.
//!
//! The default heading vocabulary and the US-state set are process-wide
//! read-only tables, built once on first use and never mutated.

use crate::error::ResumeError;
use crate::progress::ProgressCallback;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// Section headings recognised out of the box, in canonical casing.
pub const DEFAULT_HEADINGS: &[&str] = &[
    "Education",
    "Experience",
    "Projects",
    "Technical Skills",
    "Skills",
    "Awards",
    "Leadership",
    "Activities",
];

/// Headings whose body is parsed as a `Label: v1, v2` skills block.
pub const DEFAULT_SKILLS_HEADINGS: &[&str] = &["Technical Skills", "Skills"];

/// Two-letter codes accepted as the `ST` half of a `City, ST` location.
pub static US_STATES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "IA", "ID", "IL",
        "IN", "KS", "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE",
        "NH", "NJ", "NM", "NV", "NY", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
        "VA", "VT", "WA", "WI", "WV", "WY",
    ]
    .into_iter()
    .collect()
});

/// Configuration for a PDF-to-resume extraction.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use resume2json::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .line_tolerance(3.0)
///     .infer_title(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.header_window, 4);
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Maximum vertical distance (layout units) between a fragment and a
    /// line's representative `y` for the fragment to join that line.
    /// Default: 2.5.
    pub line_tolerance: f32,

    /// Horizontal gap between two fragments above which a single space is
    /// inserted when joining them. Default: 1.0.
    pub gap_threshold: f32,

    /// Number of leading non-empty lines searched for the name, the title
    /// and (first) the location. Default: 4.
    pub header_window: usize,

    /// Name emitted when the first line yields nothing usable.
    pub fallback_name: String,

    /// Recognised section headings, in canonical output casing.
    /// Matching is case-insensitive on the trimmed line.
    pub headings: Vec<String>,

    /// Headings routed to the skills block parser instead of the itemizer.
    pub skills_headings: Vec<String>,

    /// Heading used in the output for every skills-routed section.
    pub skills_display_heading: String,

    /// When set, the sentence-end fallback rule only fires for section
    /// bodies at least this many characters long. Default: None.
    pub sentence_split_min_chars: Option<usize>,

    /// Infer `title` from the second header line. Default: false.
    pub infer_title: bool,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Explicit pdfium library (file or directory). When None, the
    /// `PDFIUM_LIB_PATH` environment variable, the working directory and
    /// finally the system loader are tried in that order.
    pub pdfium_library_path: Option<PathBuf>,

    /// Optional per-page progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            line_tolerance: 2.5,
            gap_threshold: 1.0,
            header_window: 4,
            fallback_name: "Unnamed".to_string(),
            headings: DEFAULT_HEADINGS.iter().map(|h| h.to_string()).collect(),
            skills_headings: DEFAULT_SKILLS_HEADINGS
                .iter()
                .map(|h| h.to_string())
                .collect(),
            skills_display_heading: "Technical Skills".to_string(),
            sentence_split_min_chars: None,
            infer_title: false,
            password: None,
            pdfium_library_path: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("line_tolerance", &self.line_tolerance)
            .field("gap_threshold", &self.gap_threshold)
            .field("header_window", &self.header_window)
            .field("fallback_name", &self.fallback_name)
            .field("headings", &self.headings)
            .field("skills_headings", &self.skills_headings)
            .field("sentence_split_min_chars", &self.sentence_split_min_chars)
            .field("infer_title", &self.infer_title)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("pdfium_library_path", &self.pdfium_library_path)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ExtractionProgressCallback>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Canonical heading for `line`, if its trimmed text is a recognised
    /// heading (case-insensitive).
    pub fn canonical_heading(&self, line: &str) -> Option<&str> {
        let needle = line.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.headings
            .iter()
            .find(|h| h.to_lowercase() == needle)
            .map(String::as_str)
    }

    /// Whether a canonical heading is routed to the skills parser.
    pub fn is_skills_heading(&self, heading: &str) -> bool {
        self.skills_headings
            .iter()
            .any(|h| h.eq_ignore_ascii_case(heading))
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn line_tolerance(mut self, tolerance: f32) -> Self {
        self.config.line_tolerance = tolerance;
        self
    }

    pub fn gap_threshold(mut self, gap: f32) -> Self {
        self.config.gap_threshold = gap;
        self
    }

    pub fn header_window(mut self, n: usize) -> Self {
        self.config.header_window = n;
        self
    }

    pub fn fallback_name(mut self, name: impl Into<String>) -> Self {
        self.config.fallback_name = name.into();
        self
    }

    /// Replace the heading vocabulary.
    pub fn headings<I, S>(mut self, headings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.headings = headings.into_iter().map(Into::into).collect();
        self
    }

    pub fn skills_headings<I, S>(mut self, headings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.skills_headings = headings.into_iter().map(Into::into).collect();
        self
    }

    pub fn skills_display_heading(mut self, heading: impl Into<String>) -> Self {
        self.config.skills_display_heading = heading.into();
        self
    }

    pub fn sentence_split_min_chars(mut self, n: Option<usize>) -> Self {
        self.config.sentence_split_min_chars = n;
        self
    }

    pub fn infer_title(mut self, v: bool) -> Self {
        self.config.infer_title = v;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn pdfium_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library_path = Some(path.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ResumeError> {
        let c = &self.config;
        if !c.line_tolerance.is_finite() || c.line_tolerance < 0.0 {
            return Err(ResumeError::InvalidConfig(format!(
                "line tolerance must be a finite value ≥ 0, got {}",
                c.line_tolerance
            )));
        }
        if !c.gap_threshold.is_finite() || c.gap_threshold < 0.0 {
            return Err(ResumeError::InvalidConfig(format!(
                "gap threshold must be a finite value ≥ 0, got {}",
                c.gap_threshold
            )));
        }
        if c.header_window == 0 {
            return Err(ResumeError::InvalidConfig(
                "header window must be ≥ 1".into(),
            ));
        }
        if c.headings.iter().all(|h| h.trim().is_empty()) {
            return Err(ResumeError::InvalidConfig(
                "heading vocabulary must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
