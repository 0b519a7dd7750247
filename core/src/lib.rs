//! # Pulsr Core
//!
//! The monitoring engine.
//!
//! * **[`probe`]**: concrete website, host and service probes.
//! * **[`cycle`]**: runs every registered target through the probes once.
//! * **[`sink`]**: turns verdicts into a report or into log lines and alerts.
//! * **[`scheduler`]**: repeats cycles on a fixed interval.
//!
//! Infrastructure used by the above lives in [`network`], [`service`], [`alert`] and
//! [`registry`].

pub mod alert;
pub mod cycle;
pub mod network;
pub mod probe;
pub mod registry;
pub mod scheduler;
pub mod service;
pub mod sink;
