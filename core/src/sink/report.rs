use pulsr_common::target::TargetKind;
use pulsr_common::verdict::Verdict;

use super::render_line;

const SECTION_ORDER: [TargetKind; 3] = [TargetKind::Website, TargetKind::Host, TargetKind::Service];

/// One section per target kind, each holding that kind's verdicts in cycle order.
///
/// Every section is present, even when no target of its kind is registered.
#[derive(Debug, Clone)]
pub struct Report {
    pub sections: Vec<ReportSection>,
}

#[derive(Debug, Clone)]
pub struct ReportSection {
    pub kind: TargetKind,
    pub verdicts: Vec<Verdict>,
}

impl ReportSection {
    pub fn title(&self) -> &'static str {
        self.kind.section_title()
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.verdicts.iter().map(render_line)
    }
}

impl Report {
    pub fn new(verdicts: &[Verdict]) -> Self {
        let sections: Vec<ReportSection> = SECTION_ORDER
            .iter()
            .map(|&kind| ReportSection {
                kind,
                verdicts: verdicts
                    .iter()
                    .filter(|verdict| verdict.kind() == kind)
                    .cloned()
                    .collect(),
            })
            .collect();
        Self { sections }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
