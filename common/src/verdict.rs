use std::fmt;

use crate::target::{Target, TargetKind};

/// Outcome tiers of a single check.
///
/// * `Healthy`: confirmed good.
/// * `Unhealthy`: confirmed bad, a definite negative answer was obtained.
/// * `Errored`: the check itself could not be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Healthy,
    Unhealthy,
    Errored,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Outcome::Healthy => "healthy",
            Outcome::Unhealthy => "unhealthy",
            Outcome::Errored => "errored",
        };
        f.write_str(name)
    }
}

/// What a probe concluded about one target, before it is tied back to the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub outcome: Outcome,
    pub detail: String,
}

impl Assessment {
    pub fn healthy(detail: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Healthy,
            detail: detail.into(),
        }
    }

    pub fn unhealthy(detail: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Unhealthy,
            detail: detail.into(),
        }
    }

    /// An errored assessment always carries a detail; an empty fault description is
    /// replaced so the report never shows `Error ()`.
    pub fn errored(detail: impl Into<String>) -> Self {
        let detail: String = detail.into();
        let detail = if detail.trim().is_empty() {
            String::from("unknown error")
        } else {
            detail
        };
        Self {
            outcome: Outcome::Errored,
            detail,
        }
    }
}

/// The result of checking one target in one cycle.
///
/// Verdicts are never stored. The sink renders them and drops them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub target: Target,
    pub outcome: Outcome,
    pub detail: String,
}

impl Verdict {
    pub fn new(target: Target, assessment: Assessment) -> Self {
        Self {
            target,
            outcome: assessment.outcome,
            detail: assessment.detail,
        }
    }

    pub fn kind(&self) -> TargetKind {
        self.target.kind()
    }

    pub fn is_healthy(&self) -> bool {
        self.outcome == Outcome::Healthy
    }
}
