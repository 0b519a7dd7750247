use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, sleep};

use pulsr_common::target::TargetRegistry;
use pulsr_core::cycle::CycleRunner;
use pulsr_core::probe::ProbeSet;
use pulsr_core::scheduler::{Scheduler, SchedulerState};

use crate::fakes::{MemoryStore, RecordingSink, ScriptedProbe, wait_until};

struct Harness {
    scheduler: Scheduler,
    probe: Arc<ScriptedProbe>,
    store: Arc<MemoryStore>,
    sink: Arc<RecordingSink>,
}

fn one_host() -> TargetRegistry {
    let mut registry = TargetRegistry::new();
    registry.add_host("10.0.0.1");
    registry
}

fn harness(probe: ScriptedProbe, interval: Duration) -> Harness {
    harness_with_store(probe, MemoryStore::new(one_host()), interval)
}

fn harness_with_store(probe: ScriptedProbe, store: MemoryStore, interval: Duration) -> Harness {
    let probe = Arc::new(probe);
    let store = Arc::new(store);
    let sink = Arc::new(RecordingSink::default());
    let runner = Arc::new(CycleRunner::new(
        ProbeSet::new(probe.clone(), probe.clone(), probe.clone()),
        4,
        Duration::from_secs(5),
    ));

    Harness {
        scheduler: Scheduler::new(runner, store.clone(), sink.clone(), interval),
        probe,
        store,
        sink,
    }
}

#[tokio::test]
async fn first_cycle_runs_immediately() {
    let h = harness(ScriptedProbe::new(), Duration::from_secs(3600));
    h.scheduler.start().unwrap();

    assert!(wait_until(Duration::from_secs(2), || h.sink.count() == 1).await);
    h.scheduler.stop().await;
    assert_eq!(h.sink.count(), 1);
}

#[tokio::test]
async fn cycles_never_overlap_when_one_outlasts_the_interval() {
    let h = harness(
        ScriptedProbe::new().every_check_takes(Duration::from_millis(120)),
        Duration::from_millis(20),
    );
    h.scheduler.start().unwrap();

    assert!(wait_until(Duration::from_secs(3), || h.sink.count() >= 3).await);
    h.scheduler.stop().await;

    // One target per cycle: any overlap would put two checks in flight.
    assert_eq!(h.probe.max_in_flight(), 1);
    assert_eq!(h.probe.calls(), h.sink.count());
}

#[tokio::test]
async fn stop_lets_the_running_cycle_finish() {
    let h = harness(
        ScriptedProbe::new().every_check_takes(Duration::from_millis(200)),
        Duration::from_secs(3600),
    );
    h.scheduler.start().unwrap();

    assert!(wait_until(Duration::from_secs(1), || h.probe.calls() == 1).await);
    h.scheduler.stop().await;

    assert_eq!(h.sink.count(), 1);
    assert_eq!(h.scheduler.state(), SchedulerState::Stopped);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(h.probe.calls(), 1, "no cycle may start after stop");
}

#[tokio::test]
async fn start_and_stop_follow_the_lifecycle() {
    let h = harness(ScriptedProbe::new(), Duration::from_secs(3600));
    assert_eq!(h.scheduler.state(), SchedulerState::Stopped);

    // Stopping a stopped scheduler does nothing.
    h.scheduler.stop().await;

    h.scheduler.start().unwrap();
    assert_eq!(h.scheduler.state(), SchedulerState::Running);
    assert!(h.scheduler.start().is_err());

    h.scheduler.stop().await;
    assert_eq!(h.scheduler.state(), SchedulerState::Stopped);

    h.scheduler.start().unwrap();
    assert_eq!(h.scheduler.state(), SchedulerState::Running);
    h.scheduler.stop().await;
}

#[tokio::test]
async fn each_cycle_sees_the_latest_registry() {
    let h = harness(ScriptedProbe::new(), Duration::from_millis(50));
    h.scheduler.start().unwrap();
    assert!(wait_until(Duration::from_secs(2), || h.sink.count() >= 1).await);

    h.store.edit(|registry| registry.add_website("new.example.com"));
    assert!(
        wait_until(Duration::from_secs(2), || {
            h.sink.cycles().last().is_some_and(|cycle| cycle.len() == 2)
        })
        .await
    );
    h.scheduler.stop().await;

    assert!(h.store.loads() >= 2);
}

#[tokio::test]
async fn slow_registry_reads_leave_the_runtime_free() {
    let store = MemoryStore::new(one_host()).slow_loads(Duration::from_millis(300));
    let h = harness_with_store(ScriptedProbe::new(), store, Duration::from_secs(3600));
    h.scheduler.start().unwrap();

    let started: Instant = Instant::now();
    sleep(Duration::from_millis(50)).await;
    assert!(started.elapsed() < Duration::from_millis(250));

    assert!(wait_until(Duration::from_secs(2), || h.sink.count() == 1).await);
    h.scheduler.stop().await;
    assert_eq!(h.store.loads(), 1);
}
