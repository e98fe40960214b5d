//! Console reporting and the machine-readable run report.
//!
//! Format functions are pure — they return strings and do no I/O — so tests
//! can assert on exact output. [`Reporter`] is the side-effecting sink: it
//! renders repeated status lines in place using cursor-up + clear-line when
//! the stream supports it, and degrades to plain sequential printing when
//! it does not. Writing is best-effort; the reporter has no failure mode.

use crate::naming::padded;
use crate::pipeline::RunResult;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

const CURSOR_UP: &str = "\x1b[1A";
const CLEAR_LINE: &str = "\x1b[2K";

/// Progress line for one work item: `003/012: b.jpg -> img-003.png`.
pub fn format_progress(counter: u32, total: usize, width: usize, from: &str, to: &str) -> String {
    format!(
        "{}/{}: {} -> {}",
        padded(counter, width),
        padded(total as u32, width),
        from,
        to
    )
}

/// Aggregate summary printed after a loop with failures.
pub fn format_error_summary(count: usize, stage: &str) -> String {
    format!("{count} errors during {stage}")
}

pub struct Reporter<W: Write> {
    out: W,
    ansi: bool,
    /// Whether the previously printed line was a status line the next
    /// status call should erase.
    overwrite_pending: bool,
}

impl Reporter<io::Stdout> {
    /// Reporter over stdout; in-place updates only when stdout is a tty.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let ansi = out.is_terminal();
        Self::new(out, ansi)
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, ansi: bool) -> Self {
        Self {
            out,
            ansi,
            overwrite_pending: false,
        }
    }

    /// Section heading. Sticky.
    pub fn banner(&mut self, text: &str) {
        self.overwrite_pending = false;
        let _ = writeln!(self.out, "==> {text}");
    }

    /// One-off informational line. Sticky.
    pub fn note(&mut self, text: &str) {
        self.overwrite_pending = false;
        let _ = writeln!(self.out, "> {text}");
    }

    /// Per-item progress. Replaces the previous status line in place.
    pub fn status(&mut self, text: &str) {
        if self.ansi && self.overwrite_pending {
            let _ = write!(self.out, "{CURSOR_UP}{CLEAR_LINE}");
        }
        let _ = writeln!(self.out, " -- {text}");
        self.overwrite_pending = true;
    }

    /// Error line. Sticky — never erased by the next status.
    pub fn error(&mut self, text: &str) {
        self.overwrite_pending = false;
        let _ = writeln!(self.out, ">> {text}");
    }

    /// Consume the reporter and hand back the sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Serializable projection of a [`RunResult`], written when `--report` is
/// given.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub total: usize,
    pub processed: usize,
    pub error_count: usize,
    pub errors: Vec<ReportedError>,
}

/// One failed item, in processing order.
#[derive(Debug, Serialize)]
pub struct ReportedError {
    pub file: String,
    pub reason: String,
}

impl From<&RunResult> for RunReport {
    fn from(result: &RunResult) -> Self {
        Self {
            total: result.total,
            processed: result.processed,
            error_count: result.error_count(),
            errors: result
                .failures
                .iter()
                .map(|f| ReportedError {
                    file: f.file_name.clone(),
                    reason: f.error.to_string(),
                })
                .collect(),
        }
    }
}
