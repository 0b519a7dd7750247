use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, sleep};

use pulsr_common::alert::Alerter;
use pulsr_common::error::ProbeFault;
use pulsr_common::journal::LogSink;
use pulsr_common::probe::{HostProbe, ServiceProbe, WebsiteProbe};
use pulsr_common::service::ServiceStateProvider;
use pulsr_common::store::RegistryStore;
use pulsr_common::target::TargetRegistry;
use pulsr_common::verdict::{Assessment, Verdict};
use pulsr_core::sink::ResultSink;

/// Answers every probe kind from a table keyed by the target text (`url`, `address` or
/// `name on host`). Unknown targets are healthy.
#[derive(Default)]
pub struct ScriptedProbe {
    answers: HashMap<String, Assessment>,
    delays: HashMap<String, Duration>,
    panics: Vec<String>,
    default_delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, subject: &str, assessment: Assessment) -> Self {
        self.answers.insert(subject.to_string(), assessment);
        self
    }

    pub fn delay(mut self, subject: &str, delay: Duration) -> Self {
        self.delays.insert(subject.to_string(), delay);
        self
    }

    pub fn every_check_takes(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn panic_on(mut self, subject: &str) -> Self {
        self.panics.push(subject.to_string());
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond(&self, subject: String) -> Assessment {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now: usize = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay: Duration = self
            .delays
            .get(&subject)
            .copied()
            .unwrap_or(self.default_delay);
        sleep(delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.panics.contains(&subject) {
            panic!("probe exploded on {subject}");
        }
        self.answers
            .get(&subject)
            .cloned()
            .unwrap_or_else(|| Assessment::healthy("fine"))
    }
}

#[async_trait]
impl WebsiteProbe for ScriptedProbe {
    async fn check_website(&self, url: &str) -> Assessment {
        self.respond(url.to_string()).await
    }
}

#[async_trait]
impl HostProbe for ScriptedProbe {
    async fn check_host(&self, address: &str) -> Assessment {
        self.respond(address.to_string()).await
    }
}

#[async_trait]
impl ServiceProbe for ScriptedProbe {
    async fn check_service(&self, host: &str, service: &str) -> Assessment {
        self.respond(format!("{service} on {host}")).await
    }
}

/// Service manager that knows a fixed set of `(host, name) -> state` entries.
#[derive(Default)]
pub struct FixedServices {
    states: HashMap<(String, String), String>,
}

impl FixedServices {
    pub fn with(mut self, host: &str, name: &str, state: &str) -> Self {
        self.states
            .insert((host.to_string(), name.to_string()), state.to_string());
        self
    }
}

#[async_trait]
impl ServiceStateProvider for FixedServices {
    async fn get_state(&self, host: &str, name: &str) -> Result<String, ProbeFault> {
        self.states
            .get(&(host.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| ProbeFault::ServiceNotFound {
                host: host.to_string(),
                name: name.to_string(),
            })
    }
}

#[derive(Default)]
pub struct RecordingAlerter {
    alerts: Mutex<Vec<(String, String)>>,
}

impl RecordingAlerter {
    pub fn alerts(&self) -> Vec<(String, String)> {
        self.alerts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Alerter for RecordingAlerter {
    async fn notify(&self, title: &str, message: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}

#[derive(Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryLog {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogSink for MemoryLog {
    async fn append(&self, message: &str) -> anyhow::Result<()> {
        self.lines.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

/// In-memory target list. `slow_loads` makes every load block its thread, like a slow disk.
#[derive(Default)]
pub struct MemoryStore {
    registry: Mutex<TargetRegistry>,
    loads: AtomicUsize,
    load_delay: Duration,
}

impl MemoryStore {
    pub fn new(registry: TargetRegistry) -> Self {
        Self {
            registry: Mutex::new(registry),
            loads: AtomicUsize::new(0),
            load_delay: Duration::ZERO,
        }
    }

    pub fn slow_loads(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    pub fn edit(&self, change: impl FnOnce(&mut TargetRegistry)) {
        change(&mut self.registry.lock().unwrap());
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl RegistryStore for MemoryStore {
    fn load(&self) -> TargetRegistry {
        std::thread::sleep(self.load_delay);
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.registry.lock().unwrap().clone()
    }

    fn save(&self, registry: &TargetRegistry) -> anyhow::Result<()> {
        *self.registry.lock().unwrap() = registry.clone();
        Ok(())
    }
}

/// Keeps every published cycle.
#[derive(Default)]
pub struct RecordingSink {
    cycles: Mutex<Vec<Vec<Verdict>>>,
}

impl RecordingSink {
    pub fn cycles(&self) -> Vec<Vec<Verdict>> {
        self.cycles.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.cycles.lock().unwrap().len()
    }
}

#[async_trait]
impl ResultSink for RecordingSink {
    async fn publish(&self, verdicts: &[Verdict]) {
        self.cycles.lock().unwrap().push(verdicts.to_vec());
    }
}

/// Polls `condition` every 10ms until it holds or `limit` elapses.
pub async fn wait_until(limit: Duration, condition: impl Fn() -> bool) -> bool {
    let deadline: Instant = Instant::now() + limit;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        sleep(Duration::from_millis(10)).await;
    }
    condition()
}
