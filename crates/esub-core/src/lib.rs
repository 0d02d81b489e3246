//! esub core: job request model, resource normalization, decision protocol and
//! the error surface shared by the hook crates.
//!
//! This crate carries no I/O or config dependencies. It only knows how a job
//! request and a reply look on the wire and how resource quantities are read,
//! so the policy engine and any test tooling can reuse it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every fallible path surfaces as `EsubError`/`Result` so a malformed
//! submission can never abort the hook without a reply.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod quantity;

/// Shared result type.
pub use error::{Result, EsubError};
