//! Hook replies.
//!
//! Exactly one reply is written per invocation:
//! - `{"action":"accept","job":{..}}`
//! - `{"action":"reject","reason":".."}`
//! - `{"action":"error","code":"..","message":".."}`

use serde::{Deserialize, Serialize};

use crate::error::EsubError;
use crate::protocol::job::JobRequest;

/// Outcome of policy evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Decision {
    /// Job may be queued, possibly modified by the rules.
    Accept { job: JobRequest },
    /// Submission is denied; `reason` is shown to the user verbatim.
    Reject { reason: String },
}

impl Decision {
    pub fn is_accept(&self) -> bool {
        matches!(self, Decision::Accept { .. })
    }
}

/// Everything the hook can write to its output channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Reply {
    Accept { job: JobRequest },
    Reject { reason: String },
    /// Protocol-level failure: the request could not be evaluated at all.
    Error { code: String, message: String },
}

impl From<Decision> for Reply {
    fn from(d: Decision) -> Self {
        match d {
            Decision::Accept { job } => Reply::Accept { job },
            Decision::Reject { reason } => Reply::Reject { reason },
        }
    }
}

impl From<&EsubError> for Reply {
    fn from(e: &EsubError) -> Self {
        Reply::Error {
            code: e.code().as_str().to_string(),
            message: e.to_string(),
        }
    }
}
