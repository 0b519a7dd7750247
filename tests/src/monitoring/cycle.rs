use std::sync::Arc;
use std::time::Duration;

use pulsr_common::target::{Target, TargetRegistry};
use pulsr_common::verdict::{Assessment, Outcome, Verdict};
use pulsr_core::cycle::CycleRunner;
use pulsr_core::probe::{ProbeSet, ServiceStateProbe};
use pulsr_core::sink::{JournalSink, ResultSink};

use crate::fakes::{FixedServices, MemoryLog, RecordingAlerter, ScriptedProbe};

fn runner_with(probe: Arc<ScriptedProbe>, concurrency: usize) -> CycleRunner {
    CycleRunner::new(
        ProbeSet::new(probe.clone(), probe.clone(), probe),
        concurrency,
        Duration::from_secs(5),
    )
}

/// One website answering 200, one host not answering pings, one stopped service.
#[tokio::test]
async fn mixed_registry_logs_every_verdict_and_alerts_on_failures() {
    let mut registry = TargetRegistry::new();
    registry.add_website("example.com");
    registry.add_host("10.0.0.1");
    registry.add_service("host1", "nginx");

    let scripted = Arc::new(
        ScriptedProbe::new()
            .answer("example.com", Assessment::healthy("200 OK"))
            .answer("10.0.0.1", Assessment::unhealthy("Unreachable")),
    );
    let services = Arc::new(ServiceStateProbe::new(Arc::new(
        FixedServices::default().with("host1", "nginx", "stopped"),
    )));
    let runner = CycleRunner::new(
        ProbeSet::new(scripted.clone(), scripted, services),
        16,
        Duration::from_secs(5),
    );

    let verdicts: Vec<Verdict> = runner.run_cycle(&registry).await;
    let outcomes: Vec<(Outcome, &str)> = verdicts
        .iter()
        .map(|v| (v.outcome, v.detail.as_str()))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            (Outcome::Healthy, "200 OK"),
            (Outcome::Unhealthy, "Unreachable"),
            (Outcome::Unhealthy, "stopped"),
        ]
    );

    let log = Arc::new(MemoryLog::default());
    let alerter = Arc::new(RecordingAlerter::default());
    JournalSink::new(log.clone(), alerter.clone())
        .publish(&verdicts)
        .await;

    assert_eq!(
        log.lines(),
        vec![
            "Website example.com: OK",
            "Server 10.0.0.1: Unreachable",
            "Service nginx on host1: stopped",
        ]
    );
    let titles: Vec<String> = alerter.alerts().into_iter().map(|(t, _)| t).collect();
    assert_eq!(titles, vec!["Server Unreachable", "Service Alert"]);
}

#[tokio::test]
async fn order_does_not_depend_on_completion_time() {
    let mut registry = TargetRegistry::new();
    registry.add_website("slow.com");
    registry.add_website("fast.com");
    registry.add_host("10.0.0.9");
    registry.add_host("10.0.0.1");
    registry.add_service("db", "postgres");
    registry.add_service("web", "nginx");

    let probe = Arc::new(
        ScriptedProbe::new()
            .delay("slow.com", Duration::from_millis(120))
            .delay("10.0.0.9", Duration::from_millis(80))
            .delay("postgres on db", Duration::from_millis(40)),
    );

    let verdicts: Vec<Verdict> = runner_with(probe.clone(), 8).run_cycle(&registry).await;
    let targets: Vec<Target> = verdicts.into_iter().map(|v| v.target).collect();
    assert_eq!(targets, registry.targets());
    assert!(probe.max_in_flight() > 1, "checks should overlap within a cycle");
}

#[tokio::test]
async fn concurrency_limit_is_respected() {
    let mut registry = TargetRegistry::new();
    for i in 0..10 {
        registry.add_host(format!("10.0.0.{i}"));
    }

    let probe = Arc::new(ScriptedProbe::new().every_check_takes(Duration::from_millis(20)));
    let verdicts: Vec<Verdict> = runner_with(probe.clone(), 3).run_cycle(&registry).await;

    assert_eq!(verdicts.len(), 10);
    assert!(probe.max_in_flight() <= 3);
}

#[tokio::test]
async fn empty_registry_is_not_an_error() {
    let probe = Arc::new(ScriptedProbe::new());
    let verdicts = runner_with(probe.clone(), 4)
        .run_cycle(&TargetRegistry::new())
        .await;
    assert!(verdicts.is_empty());
    assert_eq!(probe.calls(), 0);
}

#[tokio::test]
async fn duplicates_yield_independent_verdicts() {
    let mut registry = TargetRegistry::new();
    registry.add_website("example.com");
    registry.add_website("example.com");
    registry.add_service("host1", "nginx");
    registry.add_service("host1", "nginx");

    let probe = Arc::new(ScriptedProbe::new());
    let verdicts = runner_with(probe.clone(), 4).run_cycle(&registry).await;
    assert_eq!(verdicts.len(), 4);
    assert_eq!(probe.calls(), 4);
}

#[tokio::test]
async fn a_panicking_probe_becomes_an_errored_verdict() {
    let mut registry = TargetRegistry::new();
    registry.add_website("a.com");
    registry.add_host("cursed");
    registry.add_host("10.0.0.1");

    let probe = Arc::new(ScriptedProbe::new().panic_on("cursed"));
    let verdicts = runner_with(probe, 4).run_cycle(&registry).await;

    assert_eq!(verdicts.len(), 3);
    assert!(verdicts[0].is_healthy());
    assert_eq!(verdicts[1].outcome, Outcome::Errored);
    assert!(!verdicts[1].detail.is_empty());
    assert!(verdicts[2].is_healthy());
}

#[tokio::test]
async fn unknown_service_is_errored_not_unhealthy() {
    let mut registry = TargetRegistry::new();
    registry.add_service("host1", "ghost");

    let scripted = Arc::new(ScriptedProbe::new());
    let services = Arc::new(ServiceStateProbe::new(Arc::new(FixedServices::default())));
    let runner = CycleRunner::new(
        ProbeSet::new(scripted.clone(), scripted, services),
        1,
        Duration::from_secs(1),
    );

    let verdicts = runner.run_cycle(&registry).await;
    assert_eq!(verdicts[0].outcome, Outcome::Errored);
    assert!(verdicts[0].detail.contains("ghost"));
}
