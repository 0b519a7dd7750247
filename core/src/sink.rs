//! Consumers of a cycle's verdicts.
//!
//! * [`report::Report`]: sectioned, human-readable status for interactive use.
//! * [`journal::JournalSink`]: one timestamped log line per verdict plus an alert for
//!   every failure, for background use.

pub mod journal;
pub mod report;

use async_trait::async_trait;

use pulsr_common::target::TargetKind;
use pulsr_common::verdict::{Outcome, Verdict};

pub use journal::{FileJournal, JournalSink};
pub use report::{Report, ReportSection};

#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn publish(&self, verdicts: &[Verdict]);
}

/// The status part of a report line, e.g. `OK`, `Unreachable` or `Error (timed out)`.
pub fn render_status(verdict: &Verdict) -> String {
    match (verdict.outcome, verdict.kind()) {
        (Outcome::Healthy, TargetKind::Website) => String::from("OK"),
        (Outcome::Healthy, _) => verdict.detail.clone(),
        (Outcome::Unhealthy, TargetKind::Website) => format!("Error ({})", verdict.detail),
        (Outcome::Unhealthy, _) => verdict.detail.clone(),
        (Outcome::Errored, _) => format!("Error ({})", verdict.detail),
    }
}

/// `<target>: <status>`
pub fn render_line(verdict: &Verdict) -> String {
    format!("{}: {}", verdict.target, render_status(verdict))
}

/// `<label> <target>: <status>`, the form written to the log and carried by alerts.
pub fn render_message(verdict: &Verdict) -> String {
    format!("{} {}", verdict.kind().label(), render_line(verdict))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
