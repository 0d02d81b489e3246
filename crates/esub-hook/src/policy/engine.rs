use esub_core::error::{Result, EsubError};
use esub_core::protocol::{Decision, JobRequest};

use crate::config::schema::{PolicySection, RuleKind};

use super::rules::{
    ConstraintInjectionRule, LicenseRoutingRule, MemoryCapRule, PolicyRule, RuleVerdict,
};

/// Ordered rule chain.
/// Construct once at startup; evaluation never mutates the engine, so a
/// single instance can serve concurrent evaluations.
pub struct PolicyEngine {
    rules: Vec<Box<dyn PolicyRule>>,
}

impl PolicyEngine {
    /// Engine over an explicit rule chain, evaluated in the given order.
    pub fn new(rules: Vec<Box<dyn PolicyRule>>) -> Self {
        Self { rules }
    }

    /// Compile the policy section into a rule chain.
    pub fn from_config(policy: &PolicySection) -> Result<Self> {
        policy.validate()?;

        let rules = policy
            .rules
            .iter()
            .map(|kind| -> Box<dyn PolicyRule> {
                match kind {
                    RuleKind::MemoryCap => Box::new(MemoryCapRule::new(policy.queue_caps.clone())),
                    RuleKind::LicenseRouting => {
                        Box::new(LicenseRoutingRule::new(policy.license_routing.clone()))
                    }
                    RuleKind::ConstraintInjection => Box::new(
                        ConstraintInjectionRule::new(policy.queue_constraints.clone())
                            .with_dedupe(policy.dedupe_constraints),
                    ),
                }
            })
            .collect();

        Ok(Self::new(rules))
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run the chain over one job.
    ///
    /// The first rejecting rule ends evaluation; whatever earlier rules did to
    /// the job is dropped with it. A job that could not be evaluated (bad
    /// quantity) is rejected with a reason describing the problem.
    pub fn evaluate(&self, mut job: JobRequest) -> Decision {
        for rule in &self.rules {
            match rule.apply(&mut job) {
                Ok(RuleVerdict::Pass) => {}
                Ok(RuleVerdict::Reject { reason }) => {
                    tracing::info!(rule = rule.name(), user = %job.user, queue = %job.queue, %reason, "job rejected");
                    return Decision::Reject { reason };
                }
                Err(e) => {
                    tracing::info!(rule = rule.name(), user = %job.user, queue = %job.queue, error = %e, "job not evaluable");
                    let reason = match e {
                        EsubError::MalformedQuantity(msg) => msg,
                        other => other.to_string(),
                    };
                    return Decision::Reject { reason };
                }
            }
        }

        Decision::Accept { job }
    }
}
