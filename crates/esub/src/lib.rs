//! Top-level facade crate for the esub admission hook.
//!
//! Re-exports the core protocol types and the hook library so users can depend on a single crate.

pub mod core {
    pub use esub_core::*;
}

pub mod hook {
    pub use esub_hook::*;
}
