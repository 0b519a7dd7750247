use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Local;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::error;

use pulsr_common::alert::Alerter;
use pulsr_common::journal::LogSink;
use pulsr_common::verdict::Verdict;

use super::{ResultSink, render_message};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only text log. Each line reads `[YYYY-MM-DD HH:MM:SS] <message>`.
pub struct FileJournal {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileJournal {
    /// Opens `path` for appending, creating it if needed.
    pub async fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path: PathBuf = path.into();
        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .with_context(|| format!("opening log file {}", path.display()))?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }
}

#[async_trait]
impl LogSink for FileJournal {
    async fn append(&self, message: &str) -> anyhow::Result<()> {
        let line: String = format!("[{}] {message}\n", Local::now().format(TIMESTAMP_FORMAT));

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes())
            .await
            .with_context(|| format!("appending to {}", self.path.display()))?;
        file.flush().await?;
        Ok(())
    }
}

/// Background sink: logs every verdict, alerts on every failure.
pub struct JournalSink {
    log: Arc<dyn LogSink>,
    alerter: Arc<dyn Alerter>,
}

impl JournalSink {
    pub fn new(log: Arc<dyn LogSink>, alerter: Arc<dyn Alerter>) -> Self {
        Self { log, alerter }
    }
}

#[async_trait]
impl ResultSink for JournalSink {
    async fn publish(&self, verdicts: &[Verdict]) {
        for verdict in verdicts {
            let message: String = render_message(verdict);

            if let Err(e) = self.log.append(&message).await {
                error!("could not write check log: {e:#}");
            }

            if !verdict.is_healthy() {
                self.alerter
                    .notify(verdict.kind().alert_title(), &message)
                    .await;
            }
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use pulsr_common::target::Target;
    use pulsr_common::verdict::Assessment;
    use std::sync::Mutex as StdMutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder {
        alerts: StdMutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Alerter for Recorder {
        async fn notify(&self, title: &str, message: &str) {
            self.alerts
                .lock()
                .unwrap()
                .push((title.to_string(), message.to_string()));
        }
    }

    struct BrokenLog;

    #[async_trait]
    impl LogSink for BrokenLog {
        async fn append(&self, _message: &str) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }
    }

    fn sample() -> Vec<Verdict> {
        vec![
            Verdict::new(
                Target::Website {
                    url: "example.com".into(),
                },
                Assessment::healthy("200 OK"),
            ),
            Verdict::new(
                Target::Host {
                    address: "10.0.0.1".into(),
                },
                Assessment::unhealthy("Unreachable"),
            ),
            Verdict::new(
                Target::Service {
                    host: "host1".into(),
                    name: "nginx".into(),
                },
                Assessment::unhealthy("stopped"),
            ),
        ]
    }

    #[tokio::test]
    async fn file_journal_appends_timestamped_lines() {
        let dir: TempDir = TempDir::new().unwrap();
        let path: PathBuf = dir.path().join("monitor.log");
        std::fs::write(&path, "earlier line\n").unwrap();

        let journal = FileJournal::open(&path).await.unwrap();
        journal.append("Website example.com: OK").await.unwrap();

        let content: String = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "earlier line");

        // [YYYY-MM-DD HH:MM:SS] is 21 characters.
        let stamped: &str = lines[1];
        assert!(stamped.starts_with('['));
        assert_eq!(&stamped[20..], "] Website example.com: OK");
    }

    #[tokio::test]
    async fn failures_are_logged_and_alerted() {
        let dir: TempDir = TempDir::new().unwrap();
        let path: PathBuf = dir.path().join("monitor.log");
        let journal = Arc::new(FileJournal::open(&path).await.unwrap());
        let recorder = Arc::new(Recorder::default());

        JournalSink::new(journal, recorder.clone())
            .publish(&sample())
            .await;

        let content: String = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("Website example.com: OK"));
        assert!(lines[1].ends_with("Server 10.0.0.1: Unreachable"));
        assert!(lines[2].ends_with("Service nginx on host1: stopped"));

        let alerts = recorder.alerts.lock().unwrap();
        assert_eq!(
            *alerts,
            vec![
                (
                    "Server Unreachable".to_string(),
                    "Server 10.0.0.1: Unreachable".to_string()
                ),
                (
                    "Service Alert".to_string(),
                    "Service nginx on host1: stopped".to_string()
                ),
            ]
        );
    }

    #[tokio::test]
    async fn a_broken_log_does_not_stop_alerts() {
        let recorder = Arc::new(Recorder::default());
        JournalSink::new(Arc::new(BrokenLog), recorder.clone())
            .publish(&sample())
            .await;

        assert_eq!(recorder.alerts.lock().unwrap().len(), 2);
    }
}
