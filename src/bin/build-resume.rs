//! CLI binary for resume2json.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractionConfig`, writes the JSON document and prints a confirmation.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use resume2json::{
    extract, extract_to_file, ExtractionConfig, ExtractionProgressCallback, ProgressCallback,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a spinner until the page count is known, then
/// a bar with one log line per decoded page.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_extraction_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:32.green/238}] {pos:>2}/{len} pages",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Decoding");
    }

    /// Stop the spinner when extraction failed before a terminal event.
    /// An abandoned bar stays on screen.
    fn clear(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_extraction_start(&self, total_pages: usize) {
        self.activate_bar(total_pages);
    }

    fn on_page_start(&self, page_num: usize, _total: usize) {
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_page_decoded(&self, page_num: usize, total: usize, fragment_count: usize) {
        self.bar.println(format!(
            "  {} Page {:>2}/{:<2}  {}",
            green("✓"),
            page_num,
            total,
            dim(&format!("{fragment_count:>4} fragments")),
        ));
        self.bar.inc(1);
    }

    fn on_page_error(&self, page_num: usize, total: usize, error: &str) {
        self.bar.println(format!(
            "  {} Page {:>2}/{:<2}  {}",
            red("✗"),
            page_num,
            total,
            red(error),
        ));
        self.bar.abandon();
    }

    fn on_extraction_complete(&self, total_pages: usize, line_count: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} pages decoded, {} lines",
            green("✔"),
            bold(&total_pages.to_string()),
            line_count
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Default paths: public/resume/resume.pdf → src/content/resume.json
  build-resume

  # Explicit input and output
  build-resume cv.pdf -o data/resume.json

  # Print the JSON instead of writing it
  build-resume cv.pdf --stdout

  # Show the reconstructed text lines (tune --line-tolerance with this)
  build-resume cv.pdf --dump-lines

  # Custom heading vocabulary
  build-resume --heading Experience --heading Education --heading Skills

ENVIRONMENT VARIABLES:
  RESUME_INPUT, RESUME_OUTPUT   Input PDF and output JSON paths
  RESUME_HEADINGS               Comma-separated heading vocabulary
  PDFIUM_LIB_PATH               Path to libpdfium (file or directory)
  RUST_LOG                      Overrides the log filter (e.g. resume2json=debug)
"#;

/// Extract a structured JSON resume from a PDF.
#[derive(Parser, Debug)]
#[command(
    name = "build-resume",
    version,
    about = "Extract a structured JSON resume from a PDF",
    long_about = "Reads a single-column resume PDF, rebuilds its text lines from positioned \
fragments, and writes the name, contact block, sections and skills as pretty-printed JSON.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Resume PDF to read.
    #[arg(env = "RESUME_INPUT", default_value = "public/resume/resume.pdf")]
    input: PathBuf,

    /// JSON file to write (replaced atomically).
    #[arg(short, long, env = "RESUME_OUTPUT", default_value = "src/content/resume.json")]
    output: PathBuf,

    /// Vertical tolerance for grouping fragments into one line.
    #[arg(long, env = "RESUME_LINE_TOLERANCE", default_value_t = 2.5)]
    line_tolerance: f32,

    /// Horizontal gap above which a space separates two fragments.
    #[arg(long, env = "RESUME_GAP_THRESHOLD", default_value_t = 1.0)]
    gap_threshold: f32,

    /// Leading non-empty lines searched for the name and location.
    #[arg(long, env = "RESUME_HEADER_WINDOW", default_value_t = 4)]
    header_window: usize,

    /// Name used when the first line yields none.
    #[arg(long, env = "RESUME_FALLBACK_NAME", default_value = "Unnamed")]
    fallback_name: String,

    /// Recognised section heading (repeatable; replaces the built-in list).
    #[arg(long = "heading", env = "RESUME_HEADINGS", value_delimiter = ',')]
    headings: Vec<String>,

    /// Only split un-bulleted bodies at sentence ends when at least this long.
    #[arg(long, env = "RESUME_SENTENCE_MIN_CHARS")]
    sentence_min_chars: Option<usize>,

    /// Take a short second header line as the job title.
    #[arg(long, env = "RESUME_INFER_TITLE")]
    infer_title: bool,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "RESUME_PASSWORD")]
    password: Option<String>,

    /// Path to the pdfium library (file or directory).
    #[arg(long, env = "RESUME_PDFIUM_LIB")]
    pdfium_lib: Option<PathBuf>,

    /// Print the JSON to stdout instead of writing the output file.
    #[arg(long)]
    stdout: bool,

    /// Print the reconstructed text lines and exit.
    #[arg(long)]
    dump_lines: bool,

    /// Disable progress bar.
    #[arg(long, env = "RESUME_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "RESUME_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "RESUME_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO-level library logs.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.stdout && !cli.dump_lines;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress = show_progress.then(CliProgressCallback::new_dynamic);
    run_with_progress(&cli, progress).await
}

/// [`run`], clearing the spinner when it fails.
async fn run_with_progress(cli: &Cli, progress: Option<Arc<CliProgressCallback>>) -> Result<()> {
    let result = run(cli, progress.clone()).await;
    if result.is_err() {
        if let Some(cb) = &progress {
            cb.clear();
        }
    }
    result
}

async fn run(cli: &Cli, progress: Option<Arc<CliProgressCallback>>) -> Result<()> {
    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb = progress.map(|cb| cb as Arc<dyn ExtractionProgressCallback>);
    let config = build_config(cli, progress_cb)?;

    // ── Diagnostic modes ─────────────────────────────────────────────────
    if cli.dump_lines || cli.stdout {
        let output = extract(&cli.input, &config)
            .await
            .with_context(|| format!("Failed to extract resume from {}", cli.input.display()))?;

        let text = if cli.dump_lines {
            output.lines.iter().map(|l| format!("{l}\n")).collect::<String>()
        } else {
            output
                .document
                .to_json_pretty()
                .context("Failed to serialise resume")?
        };
        io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    // ── Extract and write ────────────────────────────────────────────────
    let stats = extract_to_file(&cli.input, &cli.output, &config)
        .await
        .with_context(|| {
            format!(
                "Failed to generate {} from {}",
                cli.output.display(),
                cli.input.display()
            )
        })?;

    if !cli.quiet {
        println!("✓ Generated {}", cli.output.display());
        eprintln!(
            "   {}",
            dim(&format!(
                "{} sections, {} skills, {}ms",
                stats.section_count, stats.skill_count, stats.total_duration_ms
            ))
        );
    }

    Ok(())
}

/// Map CLI args to `ExtractionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ExtractionConfig> {
    let mut builder = ExtractionConfig::builder()
        .line_tolerance(cli.line_tolerance)
        .gap_threshold(cli.gap_threshold)
        .header_window(cli.header_window)
        .fallback_name(cli.fallback_name.clone())
        .sentence_split_min_chars(cli.sentence_min_chars)
        .infer_title(cli.infer_title);

    let headings = parse_headings(&cli.headings);
    if !headings.is_empty() {
        builder = builder.headings(headings);
    }
    if let Some(ref password) = cli.password {
        builder = builder.password(password.clone());
    }
    if let Some(ref lib) = cli.pdfium_lib {
        builder = builder.pdfium_library_path(lib.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Trim `--heading` values and drop blanks and case-insensitive repeats.
fn parse_headings(raw: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for heading in raw.iter().map(|h| h.trim()).filter(|h| !h.is_empty()) {
        if !out.iter().any(|h| h.eq_ignore_ascii_case(heading)) {
            out.push(heading.to_string());
        }
    }
    out
}
