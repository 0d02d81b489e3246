//! Job submission request as handed to the hook by the scheduler.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Queue assumed when the submission names none.
pub const DEFAULT_QUEUE: &str = "normal";

/// One job submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    /// Submitting user (required).
    pub user: String,
    /// Target queue. Absent, null or empty resolves to `DEFAULT_QUEUE`.
    #[serde(default = "default_queue", deserialize_with = "queue_or_default")]
    pub queue: String,
    /// Requested resources. Absent or null resolves to an empty set.
    #[serde(default, deserialize_with = "null_as_default")]
    pub resources: Resources,
    /// Top-level keys the hook does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resource requirements of a job.
///
/// Recognized keys are double options: `None` means the key was not
/// submitted, `Some(None)` means it was submitted as `null`. Both forms are
/// echoed back exactly as they came in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    /// Memory quantity as entered (`"100GB"`, `"64G"`, `"10"`).
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub mem: Option<Option<String>>,
    /// Licensed software the job needs.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub license: Option<Option<String>>,
    /// Placement constraints, in submission order.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Option<Vec<String>>>,
    /// Resource keys the hook does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobRequest {
    /// Minimal request for `user` on the default queue.
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            queue: default_queue(),
            resources: Resources::default(),
            extra: Map::new(),
        }
    }

    pub fn with_queue(mut self, queue: impl Into<String>) -> Self {
        self.queue = queue.into();
        self
    }

    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }
}

impl Resources {
    pub fn with_mem(mut self, raw: impl Into<String>) -> Self {
        self.mem = Some(Some(raw.into()));
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(Some(license.into()));
        self
    }

    pub fn with_constraints<I, S>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints = Some(Some(constraints.into_iter().map(Into::into).collect()));
        self
    }

    /// Submitted memory quantity; absent and `null` both read as `None`.
    pub fn mem(&self) -> Option<&str> {
        self.mem.as_ref()?.as_deref()
    }

    /// Replace the memory quantity.
    pub fn set_mem(&mut self, raw: impl Into<String>) {
        self.mem = Some(Some(raw.into()));
    }

    pub fn license(&self) -> Option<&str> {
        self.license.as_ref()?.as_deref()
    }

    pub fn constraints(&self) -> Option<&[String]> {
        self.constraints.as_ref()?.as_deref()
    }

    /// Constraint list, created empty on first use (a submitted `null`
    /// counts as absent).
    pub fn constraints_mut_or_init(&mut self) -> &mut Vec<String> {
        self.constraints
            .get_or_insert(None)
            .get_or_insert_with(Vec::new)
    }
}

fn default_queue() -> String {
    DEFAULT_QUEUE.to_string()
}

fn queue_or_default<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let queue = Option::<String>::deserialize(d)?;
    Ok(queue
        .filter(|q| !q.trim().is_empty())
        .unwrap_or_else(default_queue))
}

fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Distinguishes a key submitted as `null` from one not submitted at all;
/// `#[serde(default)]` covers the latter.
fn present<'de, D, T>(d: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}
