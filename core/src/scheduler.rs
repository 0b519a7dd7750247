//! # Scheduler
//!
//! Runs a cycle right away and then once per interval until stopped.
//!
//! The cycle is awaited inside the timer loop and missed ticks are skipped, so two cycles
//! never overlap even when one outlasts the interval. Every cycle reads a fresh snapshot
//! from the [`RegistryStore`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::bail;
use tokio::sync::watch;
use tokio::task::{self, JoinHandle};
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use pulsr_common::store::RegistryStore;
use pulsr_common::target::TargetRegistry;
use pulsr_common::verdict::Verdict;

use crate::cycle::CycleRunner;
use crate::sink::ResultSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

struct Worker {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

pub struct Scheduler {
    runner: Arc<CycleRunner>,
    store: Arc<dyn RegistryStore>,
    sink: Arc<dyn ResultSink>,
    interval: Duration,
    worker: Mutex<Option<Worker>>,
}

impl Scheduler {
    pub fn new(
        runner: Arc<CycleRunner>,
        store: Arc<dyn RegistryStore>,
        sink: Arc<dyn ResultSink>,
        interval: Duration,
    ) -> Self {
        Self {
            runner,
            store,
            sink,
            interval,
            worker: Mutex::new(None),
        }
    }

    pub fn state(&self) -> SchedulerState {
        match self.worker.lock() {
            Ok(worker) if worker.is_some() => SchedulerState::Running,
            _ => SchedulerState::Stopped,
        }
    }

    /// Spawns the timer loop. Must be called inside a tokio runtime.
    pub fn start(&self) -> anyhow::Result<()> {
        let mut worker = match self.worker.lock() {
            Ok(worker) => worker,
            Err(poisoned) => poisoned.into_inner(),
        };
        if worker.is_some() {
            bail!("scheduler is already running");
        }
        if self.interval.is_zero() {
            bail!("the check interval must be greater than zero");
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle: JoinHandle<()> = tokio::spawn(run_loop(
            self.runner.clone(),
            self.store.clone(),
            self.sink.clone(),
            self.interval,
            stop_rx,
        ));

        info!("checking every {}s", self.interval.as_secs_f64());
        *worker = Some(Worker { stop_tx, handle });
        Ok(())
    }

    /// Asks the loop to stop and waits for it. An in-flight cycle runs to completion.
    pub async fn stop(&self) {
        let worker: Option<Worker> = match self.worker.lock() {
            Ok(mut worker) => worker.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(Worker { stop_tx, handle }) = worker else {
            return;
        };

        let _ = stop_tx.send(true);
        if let Err(e) = handle.await {
            warn!("scheduler loop ended abnormally: {e}");
        }
        info!("scheduler stopped");
    }
}

async fn run_loop(
    runner: Arc<CycleRunner>,
    store: Arc<dyn RegistryStore>,
    sink: Arc<dyn ResultSink>,
    period: Duration,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut ticker: Interval = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = stop_rx.changed() => break,
            _ = ticker.tick() => {
                let loader: Arc<dyn RegistryStore> = Arc::clone(&store);
                let loaded = task::spawn_blocking(move || loader.load()).await;
                let registry: TargetRegistry = match loaded {
                    Ok(registry) => registry,
                    Err(e) => {
                        warn!("loading the target list failed, skipping this cycle: {e}");
                        continue;
                    }
                };
                debug!("cycle started for {} targets", registry.len());
                let verdicts: Vec<Verdict> = runner.run_cycle(&registry).await;
                sink.publish(&verdicts).await;
            }
        }

        if *stop_rx.borrow() {
            break;
        }
    }
}
