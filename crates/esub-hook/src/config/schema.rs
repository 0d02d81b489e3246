use std::collections::BTreeMap;

use serde::Deserialize;
use esub_core::error::{Result, EsubError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HookConfig {
    pub version: u32,

    #[serde(default)]
    pub hook: HookSection,

    #[serde(default)]
    pub policy: PolicySection,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            version: 1,
            hook: HookSection::default(),
            policy: PolicySection::default(),
        }
    }
}

impl HookConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(EsubError::UnsupportedVersion);
        }

        self.hook.validate()?;
        self.policy.validate()?;

        Ok(())
    }
}

/// Process-boundary behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HookSection {
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,

    /// Also signal rejections through the abort exit status.
    #[serde(default)]
    pub exit_on_reject: bool,

    /// Exit status the submission library reads as "aborted by esub".
    #[serde(default = "default_abort_status")]
    pub abort_status: u8,
}

impl Default for HookSection {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
            exit_on_reject: false,
            abort_status: default_abort_status(),
        }
    }
}

impl HookSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_INPUT_CEILING).contains(&self.max_input_bytes) {
            return Err(EsubError::Config(format!(
                "hook.max_input_bytes must be between 1 and {MAX_INPUT_CEILING}"
            )));
        }
        if self.abort_status == 0 {
            return Err(EsubError::Config(
                "hook.abort_status must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

const MAX_INPUT_CEILING: usize = 16 * 1024 * 1024;

fn default_max_input_bytes() -> usize {
    1024 * 1024
}
fn default_abort_status() -> u8 {
    97
}

/// Built-in rule kinds, listed in `policy.rules` in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    MemoryCap,
    LicenseRouting,
    ConstraintInjection,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::MemoryCap => "memory_cap",
            RuleKind::LicenseRouting => "license_routing",
            RuleKind::ConstraintInjection => "constraint_injection",
        }
    }
}

/// Site policy: rule order plus each rule's parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicySection {
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleKind>,

    /// queue -> memory cap in GB
    #[serde(default = "default_queue_caps")]
    pub queue_caps: BTreeMap<String, u32>,

    /// license -> queue the license is bound to
    #[serde(default = "default_license_routing")]
    pub license_routing: BTreeMap<String, String>,

    /// queue -> constraint appended to every job in it
    #[serde(default = "default_queue_constraints")]
    pub queue_constraints: BTreeMap<String, String>,

    #[serde(default)]
    pub dedupe_constraints: bool,
}

impl Default for PolicySection {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            queue_caps: default_queue_caps(),
            license_routing: default_license_routing(),
            queue_constraints: default_queue_constraints(),
            dedupe_constraints: false,
        }
    }
}

impl PolicySection {
    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(EsubError::Config("policy.rules must not be empty".into()));
        }
        for (i, kind) in self.rules.iter().enumerate() {
            if self.rules[..i].contains(kind) {
                return Err(EsubError::Config(format!(
                    "policy.rules lists {} more than once",
                    kind.as_str()
                )));
            }
        }

        for (queue, cap) in &self.queue_caps {
            require_name("policy.queue_caps", queue)?;
            if *cap == 0 {
                return Err(EsubError::Config(format!(
                    "policy.queue_caps.{queue} must be greater than 0"
                )));
            }
        }
        for (license, queue) in &self.license_routing {
            require_name("policy.license_routing", license)?;
            require_name("policy.license_routing", queue)?;
        }
        for (queue, constraint) in &self.queue_constraints {
            require_name("policy.queue_constraints", queue)?;
            require_name("policy.queue_constraints", constraint)?;
        }
        Ok(())
    }
}

fn require_name(section: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(EsubError::Config(format!("{section}: names must not be empty")));
    }
    Ok(())
}

fn default_rules() -> Vec<RuleKind> {
    vec![
        RuleKind::MemoryCap,
        RuleKind::LicenseRouting,
        RuleKind::ConstraintInjection,
    ]
}
fn default_queue_caps() -> BTreeMap<String, u32> {
    BTreeMap::from([("normal".to_string(), 64)])
}
fn default_license_routing() -> BTreeMap<String, String> {
    BTreeMap::from([("nastran".to_string(), "nastran".to_string())])
}
fn default_queue_constraints() -> BTreeMap<String, String> {
    BTreeMap::from([("debug".to_string(), "rack1".to_string())])
}
