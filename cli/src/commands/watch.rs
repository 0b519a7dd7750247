use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use pulsr_common::config::Config;
use pulsr_common::store::RegistryStore;
use pulsr_core::alert;
use pulsr_core::cycle::CycleRunner;
use pulsr_core::probe::ProbeSet;
use pulsr_core::registry::JsonFileStore;
use pulsr_core::scheduler::Scheduler;
use pulsr_core::sink::{FileJournal, JournalSink, ResultSink};

use crate::terminal::print;

/// Background mode: runs the scheduler until Ctrl-C.
pub async fn watch(cfg: &Config) -> anyhow::Result<()> {
    let runner = Arc::new(CycleRunner::from_config(ProbeSet::from_config(cfg)?, cfg));
    let store: Arc<dyn RegistryStore> = Arc::new(JsonFileStore::new(&cfg.registry_path));
    let journal = Arc::new(FileJournal::open(&cfg.log_path).await?);
    let sink: Arc<dyn ResultSink> = Arc::new(JournalSink::new(journal, alert::from_config(cfg)));

    let scheduler = Scheduler::new(runner, store, sink, cfg.interval);
    scheduler.start()?;

    print::print_status(format!(
        "Watching targets from {}, logging to {}. Press Ctrl-C to stop.",
        cfg.registry_path.display(),
        cfg.log_path.display()
    ));

    let interrupted = tokio::signal::ctrl_c()
        .await
        .context("waiting for Ctrl-C");

    info!("stopping, letting the current cycle finish");
    scheduler.stop().await;

    interrupted
}
