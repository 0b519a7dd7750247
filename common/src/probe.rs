//! Probe ports, one per target kind.
//!
//! A probe checks a single target and always answers with an [`Assessment`]. Faults are
//! folded into [`Outcome::Errored`](crate::verdict::Outcome::Errored) by the
//! implementation; a probe has no error channel back to the caller.

use async_trait::async_trait;

use crate::verdict::Assessment;

#[async_trait]
pub trait WebsiteProbe: Send + Sync {
    /// Issues one request against `url` and classifies the response.
    async fn check_website(&self, url: &str) -> Assessment;
}

#[async_trait]
pub trait HostProbe: Send + Sync {
    /// Checks whether `address` answers at all.
    async fn check_host(&self, address: &str) -> Assessment;
}

#[async_trait]
pub trait ServiceProbe: Send + Sync {
    /// Checks whether `service` is running on `host`.
    async fn check_service(&self, host: &str, service: &str) -> Assessment;
}
