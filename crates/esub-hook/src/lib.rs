//! esub policy hook library entry.
//!
//! This crate wires the config loader, the policy engine, and the stdio codec
//! into a single admission hook. It is consumed by the `esub` binary
//! (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod hook;
pub mod policy;
pub mod transport;

pub use hook::{Hook, Outcome};
