//! Hook wire protocol.
//!
//! - Inbound: one JSON job request (`JobRequest`), typed fields plus a
//!   pass-through bucket so unknown keys survive untouched.
//! - Outbound: one JSON reply tagged by `action` (`accept`/`reject`/`error`).

pub mod job;
pub mod reply;

pub use job::{JobRequest, Resources, DEFAULT_QUEUE};
pub use reply::{Decision, Reply};
