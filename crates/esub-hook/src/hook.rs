//! One hook invocation: read a job, run the policy, write one reply.
//!
//! Construction compiles the config once; `handle`/`run` can then be called
//! for any number of independent requests (one per process in the usual
//! esub deployment).

use std::io::{Read, Write};

use esub_core::error::{Result, EsubError};
use esub_core::protocol::{Decision, Reply};

use crate::config::{HookConfig, HookSection};
use crate::policy::PolicyEngine;
use crate::transport::codec;

/// Reply plus the exit status the process should end with.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub reply: Reply,
    pub exit_status: u8,
}

pub struct Hook {
    engine: PolicyEngine,
    settings: HookSection,
}

impl Hook {
    /// Build the hook from a validated config.
    /// Returns Result so main can report a bad policy as an error reply.
    pub fn new(cfg: &HookConfig) -> Result<Self> {
        cfg.validate()?;
        let engine = PolicyEngine::from_config(&cfg.policy)?;
        Ok(Self {
            engine,
            settings: cfg.hook.clone(),
        })
    }

    /// Override the configured abort status (scheduler-provided value wins).
    pub fn with_abort_status(mut self, status: u8) -> Self {
        if status != 0 {
            self.settings.abort_status = status;
        }
        self
    }

    pub fn engine(&self) -> &PolicyEngine {
        &self.engine
    }

    pub fn abort_status(&self) -> u8 {
        self.settings.abort_status
    }

    /// Decode and evaluate one raw payload.
    pub fn handle(&self, input: &[u8]) -> Outcome {
        let job = match codec::decode_job(input, self.settings.max_input_bytes) {
            Ok(job) => job,
            Err(e) => return self.error_outcome(&e),
        };

        tracing::debug!(user = %job.user, queue = %job.queue, "evaluating job");

        let decision = self.engine.evaluate(job);
        let exit_status = match &decision {
            Decision::Accept { .. } => 0,
            Decision::Reject { .. } if self.settings.exit_on_reject => self.settings.abort_status,
            Decision::Reject { .. } => 0,
        };

        Outcome {
            reply: decision.into(),
            exit_status,
        }
    }

    /// Full invocation over the given channels. Only a failure to write the
    /// reply itself is returned as `Err`.
    pub fn run<R: Read, W: Write>(&self, input: R, output: W) -> Result<u8> {
        let outcome = match codec::read_input(input, self.settings.max_input_bytes) {
            Ok(bytes) => self.handle(&bytes),
            Err(e) => self.error_outcome(&e),
        };

        codec::write_reply(output, &outcome.reply)?;
        Ok(outcome.exit_status)
    }

    fn error_outcome(&self, e: &EsubError) -> Outcome {
        error_outcome(e, self.settings.abort_status)
    }
}

/// Protocol-level failure: structured error reply plus the abort status.
pub fn error_outcome(e: &EsubError, abort_status: u8) -> Outcome {
    tracing::warn!(code = e.code().as_str(), error = %e, "request not evaluated");
    Outcome {
        reply: Reply::from(e),
        exit_status: abort_status,
    }
}
