//! # Fault Taxonomy
//!
//! Every fault here is contained where it happens:
//! * [`ProbeFault`] becomes an `Errored` verdict.
//! * [`PersistenceFault`] becomes an empty registry.
//! * [`AlertDeliveryFault`] is dropped.

use std::time::Duration;

use thiserror::Error;

/// A single check could not be completed.
#[derive(Debug, Error)]
pub enum ProbeFault {
    #[error("empty address")]
    EmptyAddress,

    #[error("could not resolve '{address}': {reason}")]
    Resolve { address: String, reason: String },

    #[error("{0}")]
    Request(String),

    #[error("raw socket unavailable: {0}")]
    Socket(#[source] std::io::Error),

    #[error("service '{name}' not found on {host}")]
    ServiceNotFound { host: String, name: String },

    #[error("host {host} cannot be queried: {reason}")]
    HostUnavailable { host: String, reason: String },

    #[error("command '{command}' failed: {reason}")]
    Command { command: String, reason: String },

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// The registry file could not be read.
#[derive(Debug, Error)]
pub enum PersistenceFault {
    #[error("registry file unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("registry file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// An alert could not be delivered.
#[derive(Debug, Error)]
pub enum AlertDeliveryFault {
    #[error("alert command is empty")]
    EmptyCommand,

    #[error("could not launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}")]
    Status { program: String, status: String },

    #[error("'{program}' did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },
}
