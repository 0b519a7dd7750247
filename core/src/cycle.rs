//! # Cycle Runner
//!
//! One cycle checks every registered target once.
//!
//! Checks run concurrently (bounded), each in its own task and under a deadline, so a
//! slow, hung or panicking probe only ever costs its own verdict. The returned verdicts
//! follow registry order: websites, then hosts, then services, each in insertion order.

use std::any::Any;
use std::time::{Duration, Instant};

use futures::StreamExt;
use futures::stream;
use tokio::task::JoinError;
use tokio::time::timeout;
use tracing::{debug, info};

use pulsr_common::config::Config;
use pulsr_common::target::{Target, TargetRegistry};
use pulsr_common::verdict::{Assessment, Outcome, Verdict};

use crate::probe::ProbeSet;

pub struct CycleRunner {
    probes: ProbeSet,
    concurrency: usize,
    deadline: Duration,
}

impl CycleRunner {
    pub fn new(probes: ProbeSet, concurrency: usize, deadline: Duration) -> Self {
        Self {
            probes,
            concurrency: concurrency.max(1),
            deadline,
        }
    }

    pub fn from_config(probes: ProbeSet, cfg: &Config) -> Self {
        Self::new(probes, cfg.concurrency, cfg.check_deadline)
    }

    /// Checks every target in `registry` and returns one verdict per entry.
    pub async fn run_cycle(&self, registry: &TargetRegistry) -> Vec<Verdict> {
        let targets: Vec<Target> = registry.targets();
        if targets.is_empty() {
            debug!("nothing to check");
            return Vec::new();
        }

        let start_time: Instant = Instant::now();
        let total: usize = targets.len();

        let verdicts: Vec<Verdict> = stream::iter(targets)
            .map(|target| self.check_isolated(target))
            .buffered(self.concurrency)
            .collect()
            .await;

        let failing: usize = verdicts.iter().filter(|v| !v.is_healthy()).count();
        info!(
            "cycle finished: {total} checked, {failing} failing in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );
        verdicts
    }

    async fn check_isolated(&self, target: Target) -> Verdict {
        let probes: ProbeSet = self.probes.clone();
        let deadline: Duration = self.deadline;
        let task_target: Target = target.clone();

        let handle = tokio::spawn(async move {
            match timeout(deadline, dispatch(&probes, &task_target)).await {
                Ok(assessment) => assessment,
                Err(_elapsed) => {
                    Assessment::errored(format!("check timed out after {deadline:?}"))
                }
            }
        });

        let assessment: Assessment = match handle.await {
            Ok(assessment) => assessment,
            Err(e) => Assessment::errored(describe_join_error(e)),
        };

        let verdict = Verdict::new(target, assessment);
        match verdict.outcome {
            Outcome::Healthy => debug!("{}: {}", verdict.target, verdict.detail),
            _ => debug!("{} is {}: {}", verdict.target, verdict.outcome, verdict.detail),
        }
        verdict
    }
}

async fn dispatch(probes: &ProbeSet, target: &Target) -> Assessment {
    match target {
        Target::Website { url } => probes.website.check_website(url).await,
        Target::Host { address } => probes.host.check_host(address).await,
        Target::Service { host, name } => probes.service.check_service(host, name).await,
    }
}

fn describe_join_error(error: JoinError) -> String {
    if !error.is_panic() {
        return String::from("check was cancelled");
    }

    let payload: Box<dyn Any + Send> = error.into_panic();
    let reason: &str = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause");
    format!("probe panicked: {reason}")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
