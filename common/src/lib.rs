//! # Pulsr Common
//!
//! Shared vocabulary of the `pulsr` workspace.
//!
//! * **Models**: [`target`] (what is monitored) and [`verdict`] (what a check concluded).
//! * **Ports**: traits the engine in `pulsr-core` depends on ([`probe`], [`service`],
//!   [`alert`], [`journal`], [`store`]). Concrete implementations live in `pulsr-core`
//!   and fakes live in the integration tests.
//! * **Ambient**: [`config`] and the [`error`] taxonomy.

pub mod alert;
pub mod config;
pub mod error;
pub mod journal;
pub mod probe;
pub mod service;
pub mod store;
pub mod target;
pub mod verdict;
