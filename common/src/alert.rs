use async_trait::async_trait;

/// Delivers an alert for a failed check.
///
/// Implementations swallow their own delivery failures: `notify` never fails from the
/// caller's point of view and a broken alert channel must not block the next alert.
#[async_trait]
pub trait Alerter: Send + Sync {
    async fn notify(&self, title: &str, message: &str);
}
