use colored::*;
use tracing::info;

use pulsr_common::target::TargetKind;
use pulsr_common::verdict::Outcome;
use pulsr_core::sink::Report;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;
pub const PRINT_TARGET: &str = "pulsr::print";

#[macro_export]
macro_rules! pprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

const BANNER: &str = r#"
            ____  __  __  __    _____  ____
           / __ \/ / / / / /   / ___/ / __ \
          / /_/ / / / / / /    \__ \ / /_/ /
         / ____/ /_/ / / /___ ___/ // _, _/
        /_/    \____/ /_____//____//_/ |_|
"#;

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }

    let text_content: String = format!("⟦ PULSR v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    let text_width: usize = console::measure_text_width(&text_content);
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═"
        .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
        .bright_black();

    print(&format!("{}{}{}", sep, text, sep));
    print(&format!("{}", BANNER.green()));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }
    print(&ruled(&msg.to_uppercase()));
}

/// Centres `⟦ label ⟧` on a dashed rule `TOTAL_WIDTH` wide.
fn ruled(label: &str) -> String {
    let formatted: String = format!("⟦ {} ⟧", label);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    format!(
        "{}{}{}",
        "─".repeat(left).bright_black(),
        formatted.bright_green(),
        "─".repeat(right).bright_black()
    )
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    print(&format!("{}", sep));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    let message: String = format!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT));
    print(&message);
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{}{}{}", space, msg, space));
}

/// Prints each section under its title, as written, and one line per verdict coloured by
/// outcome. `-qq` drops the healthy lines.
pub fn report(report: &Report, q_level: u8) {
    for section in &report.sections {
        if q_level > 0 {
            print(section.title());
        } else {
            print(&ruled(section.title()));
        }

        for (verdict, line) in section.verdicts.iter().zip(section.lines()) {
            if q_level > 1 && verdict.is_healthy() {
                continue;
            }
            print(&format!("{}", line.color(outcome_color(verdict.outcome))));
        }
    }
}

fn outcome_color(outcome: Outcome) -> Color {
    match outcome {
        Outcome::Healthy => colors::HEALTHY,
        Outcome::Unhealthy => colors::UNHEALTHY,
        Outcome::Errored => colors::ERRORED,
    }
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    let output: String = format!(
        "{} {}",
        idx_str.color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    );
    print(&output);
}

/// Lists `entries` under a `[idx] title` head, or `(none)` when empty.
pub fn as_tree_one_level(entries: &[String]) {
    if entries.is_empty() {
        print(&format!(" {} {}", "└─".bright_black(), "(none)".dimmed()));
        return;
    }

    for (i, entry) in entries.iter().enumerate() {
        let last: bool = i + 1 == entries.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        print(&format!(" {} {}", branch, entry.color(colors::TEXT_DEFAULT)));
    }
}

pub fn kind_heading(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::Website => "Websites",
        TargetKind::Host => "Hosts",
        TargetKind::Service => "Services",
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
