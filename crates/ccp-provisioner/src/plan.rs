use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::addr::ResourcePath;
use crate::caller::Method;
use crate::compare::FieldDrift;

/// What the run does to the remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    NoOp,
    Create,
    Update,
    Delete,
}

impl Action {
    /// HTTP method of the mutating call. `None` for no-op.
    pub fn method(self) -> Option<Method> {
        match self {
            Self::NoOp => None,
            Self::Create => Some(Method::Post),
            Self::Update => Some(Method::Patch),
            Self::Delete => Some(Method::Delete),
        }
    }
}

/// Why an action was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cause {
    /// No description given; the run only reads.
    Read,
    /// Filter criteria narrowed the snapshot to one object.
    Filtered,
    /// Remote object already satisfies the description.
    InSync,
    /// Description carries no name, so nothing can be looked up.
    Unnamed,
    /// No remote object with the described name.
    Missing,
    /// Remote object exists but does not satisfy the description.
    Drift,
    /// Absence requested and the resource still exists.
    Requested,
    /// Absence requested and the resource is already gone.
    AlreadyAbsent,
}

/// Outcome of the decision engine for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub cause: Cause,
    /// The matched remote object, if any.
    pub object: Option<Value>,
    /// `id` of the matched object, set for keyed updates and deletes.
    pub identifier: Option<String>,
    /// Path the mutating call goes to, extended with `identifier`.
    pub path: ResourcePath,
    pub drift: Vec<FieldDrift>,
}

impl Decision {
    pub(crate) fn new(action: Action, cause: Cause, path: &ResourcePath) -> Self {
        Self {
            action,
            cause,
            object: None,
            identifier: None,
            path: path.clone(),
            drift: Vec::new(),
        }
    }

    pub fn has_changes(&self) -> bool {
        self.action != Action::NoOp
    }
}
