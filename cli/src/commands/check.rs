use std::time::{Duration, Instant};

use async_trait::async_trait;
use colored::*;

use pulsr_common::config::Config;
use pulsr_common::store::RegistryStore;
use pulsr_common::target::TargetRegistry;
use pulsr_common::verdict::Verdict;
use pulsr_core::cycle::CycleRunner;
use pulsr_core::probe::ProbeSet;
use pulsr_core::registry::JsonFileStore;
use pulsr_core::sink::{Report, ResultSink};

use crate::pprint;
use crate::terminal::{colors, print, spinner};

/// Interactive sink: prints the sectioned report to the terminal.
pub struct TerminalReport {
    quiet: u8,
}

impl TerminalReport {
    pub fn new(quiet: u8) -> Self {
        Self { quiet }
    }
}

#[async_trait]
impl ResultSink for TerminalReport {
    async fn publish(&self, verdicts: &[Verdict]) {
        print::report(&Report::new(verdicts), self.quiet);
    }
}

pub async fn check(cfg: &Config) -> anyhow::Result<()> {
    let store = JsonFileStore::new(&cfg.registry_path);
    let registry: TargetRegistry = store.load();
    let runner = CycleRunner::from_config(ProbeSet::from_config(cfg)?, cfg);
    run_check(&runner, &registry, cfg).await;
    Ok(())
}

/// Runs one cycle over `registry` and prints the report.
pub async fn run_check(runner: &CycleRunner, registry: &TargetRegistry, cfg: &Config) {
    let start_time: Instant = Instant::now();

    let verdicts: Vec<Verdict> = {
        let _spinner = spinner::start(format!(
            "Checking {} targets...",
            registry.len().to_string().green().bold()
        ));
        runner.run_cycle(registry).await
    };

    TerminalReport::new(cfg.quiet).publish(&verdicts).await;
    print_summary(&verdicts, start_time.elapsed(), cfg);
}

fn print_summary(verdicts: &[Verdict], total_time: Duration, cfg: &Config) {
    let failing: usize = verdicts.iter().filter(|v| !v.is_healthy()).count();
    let failing: ColoredString = match failing {
        0 => String::from("all healthy").bold().green(),
        n => format!("{n} failing").bold().red(),
    };
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString = format!(
        "Check Complete: {} targets, {failing} in {total_time}",
        verdicts.len()
    )
    .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        _ => {
            pprint!();
            print::print(&output.to_string());
        }
    }
}
