//! Policy layer (admission rules and their evaluator).
//!
//! Compiles the policy section of the config into an ordered rule chain that
//! the hook runs once per submitted job.

pub mod engine;
pub mod rules;

pub use engine::PolicyEngine;
pub use rules::{
    ConstraintInjectionRule, LicenseRoutingRule, MemoryCapRule, PolicyRule, RuleVerdict,
};
