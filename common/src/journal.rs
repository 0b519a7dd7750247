use async_trait::async_trait;

/// Append-only destination for rendered verdicts.
///
/// The implementation adds the timestamp. It must accept concurrent `append` calls.
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn append(&self, message: &str) -> anyhow::Result<()>;
}
