//! Output formatting
//!
//! Global output mode (quiet/JSON/verbosity), colored-symbol status lines
//! and error display.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Level;
use tracing_subscriber::EnvFilter;

static QUIET: AtomicBool = AtomicBool::new(false);
static JSON: AtomicBool = AtomicBool::new(false);

/// Output configuration from the global CLI flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress everything except errors
    pub quiet: bool,
    /// Machine-readable output
    pub json: bool,
    /// Verbosity level (`-v` count)
    pub verbose: u8,
}

impl OutputConfig {
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Make this configuration visible to [`is_quiet`] and [`is_json`]
    pub fn apply_global(&self) {
        QUIET.store(self.quiet, Ordering::Relaxed);
        JSON.store(self.json, Ordering::Relaxed);
    }

    /// Log level implied by the flags; `RUST_LOG` can still raise it
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    }

    /// Install the tracing subscriber, logging to stderr
    pub fn init_tracing(&self) {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive(self.log_level().into()))
            .with_writer(io::stderr)
            .with_target(false)
            .without_time()
            .init();
    }
}

/// Whether `--quiet` is active
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Whether `--json` is active
pub fn is_json() -> bool {
    JSON.load(Ordering::Relaxed)
}

/// Writer for informational reports; discards output in quiet mode
pub fn report_writer() -> Box<dyn Write> {
    if is_quiet() {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout())
    }
}

/// Writer for diagnostics such as the echoed user override
pub fn diagnostic_writer() -> Box<dyn Write> {
    if is_quiet() {
        Box::new(io::sink())
    } else {
        Box::new(io::stderr())
    }
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

pub fn print_success(msg: &str) {
    if !is_quiet() {
        println!("{} {msg}", status::SUCCESS);
    }
}

pub fn print_info(msg: &str) {
    if !is_quiet() {
        println!("{} {msg}", status::INFO);
    }
}

pub fn print_warning(msg: &str) {
    if !is_quiet() {
        println!("{} {msg}", status::WARNING);
    }
}

/// Indented detail line under a status line
pub fn print_detail(msg: &str) {
    if !is_quiet() {
        println!("    {msg}");
    }
}

/// Print an error and its causes to stderr
///
/// Causes already spelled out in the message above them are skipped.
pub fn display_error(err: &anyhow::Error) {
    let message = err.to_string();
    eprintln!("{} {message}", status::ERROR);
    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        if !message.contains(&cause) {
            eprintln!("    {cause}");
        }
    }
}
