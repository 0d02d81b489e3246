//! Built-in admission rules.
//!
//! Every rule is configured by data and sees the job in isolation; none of
//! them knows about the others or about the order it runs in.

use std::collections::BTreeMap;

use esub_core::error::Result;
use esub_core::protocol::JobRequest;
use esub_core::quantity::{canonical_gb, parse_memory};

/// Result of applying a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleVerdict {
    /// Continue with the next rule (the job may have been modified).
    Pass,
    /// Stop evaluation and deny the submission.
    Reject { reason: String },
}

/// A single admission rule.
///
/// `apply` may rewrite the job in place. An `Err` means the job could not be
/// evaluated (e.g. an unreadable quantity); the engine turns it into a
/// rejection.
pub trait PolicyRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, job: &mut JobRequest) -> Result<RuleVerdict>;
}

/// Clamps oversized memory requests on capped queues down to the cap.
#[derive(Debug, Clone)]
pub struct MemoryCapRule {
    caps: BTreeMap<String, u32>,
}

impl MemoryCapRule {
    pub fn new(caps: BTreeMap<String, u32>) -> Self {
        Self { caps }
    }
}

impl PolicyRule for MemoryCapRule {
    fn name(&self) -> &'static str {
        "memory_cap"
    }

    fn apply(&self, job: &mut JobRequest) -> Result<RuleVerdict> {
        let Some(&cap) = self.caps.get(&job.queue) else {
            return Ok(RuleVerdict::Pass);
        };

        // no mem request reads as 0GB
        let requested = match job.resources.mem() {
            Some(raw) => parse_memory(raw)?,
            None => 0,
        };

        if requested > i64::from(cap) {
            tracing::debug!(
                rule = self.name(),
                queue = %job.queue,
                requested,
                cap,
                "memory request capped"
            );
            job.resources.set_mem(canonical_gb(cap));
        }
        Ok(RuleVerdict::Pass)
    }
}

/// Denies licensed jobs submitted outside the queue their license is bound to.
#[derive(Debug, Clone)]
pub struct LicenseRoutingRule {
    routes: BTreeMap<String, String>,
}

impl LicenseRoutingRule {
    pub fn new(routes: BTreeMap<String, String>) -> Self {
        Self { routes }
    }
}

impl PolicyRule for LicenseRoutingRule {
    fn name(&self) -> &'static str {
        "license_routing"
    }

    fn apply(&self, job: &mut JobRequest) -> Result<RuleVerdict> {
        let Some(license) = job.resources.license() else {
            return Ok(RuleVerdict::Pass);
        };
        let Some(required) = self.routes.get(license) else {
            return Ok(RuleVerdict::Pass);
        };

        if job.queue == *required {
            return Ok(RuleVerdict::Pass);
        }
        Ok(RuleVerdict::Reject {
            reason: format!(
                "{} license jobs must use queue '{required}'",
                capitalize(license)
            ),
        })
    }
}

/// Appends a placement constraint to every job on a configured queue.
#[derive(Debug, Clone)]
pub struct ConstraintInjectionRule {
    constraints: BTreeMap<String, String>,
    dedupe: bool,
}

impl ConstraintInjectionRule {
    pub fn new(constraints: BTreeMap<String, String>) -> Self {
        Self {
            constraints,
            dedupe: false,
        }
    }

    /// Skip the append when the constraint is already present.
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }
}

impl PolicyRule for ConstraintInjectionRule {
    fn name(&self) -> &'static str {
        "constraint_injection"
    }

    fn apply(&self, job: &mut JobRequest) -> Result<RuleVerdict> {
        let Some(constraint) = self.constraints.get(&job.queue) else {
            return Ok(RuleVerdict::Pass);
        };

        let list = job.resources.constraints_mut_or_init();
        if self.dedupe && list.iter().any(|c| c == constraint) {
            return Ok(RuleVerdict::Pass);
        }

        tracing::debug!(rule = self.name(), queue = %job.queue, %constraint, "constraint injected");
        list.push(constraint.clone());
        Ok(RuleVerdict::Pass)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
