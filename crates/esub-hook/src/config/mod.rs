//! Hook config loader (strict parsing).

pub mod schema;

use std::fs;

use esub_core::error::{Result, EsubError};

pub use schema::{HookConfig, HookSection, PolicySection, RuleKind};

pub fn load_from_file(path: &str) -> Result<HookConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| EsubError::Config(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<HookConfig> {
    let cfg: HookConfig = serde_yaml::from_str(s)
        .map_err(|e| EsubError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
