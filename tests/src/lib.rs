//! Behaviour of the monitoring engine across crates, driven by in-memory fakes.

#[cfg(test)]
mod fakes;
#[cfg(test)]
mod monitoring;
