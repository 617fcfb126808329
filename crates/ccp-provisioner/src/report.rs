use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::addr::ResourcePath;
use crate::compare::FieldDrift;
use crate::plan::{Action, Cause, Decision};

/// What a run did, printed as JSON by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub changed: bool,
    pub action: Action,
    pub cause: Cause,
    /// Path the last call of the run went to (or would have, in check mode).
    pub path: ResourcePath,
    /// Body sent with the mutating call.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub api_body: Option<Value>,
    /// Mutation result, matched object, or the full snapshot.
    pub api_response: Value,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub drift: Vec<FieldDrift>,
}

impl RunReport {
    pub fn filtered(path: &ResourcePath, matched: Value) -> Self {
        Self {
            changed: false,
            action: Action::NoOp,
            cause: Cause::Filtered,
            path: path.clone(),
            api_body: None,
            api_response: matched,
            drift: Vec::new(),
        }
    }

    pub fn unchanged(decision: Decision, api_response: Value) -> Self {
        Self {
            changed: false,
            action: decision.action,
            cause: decision.cause,
            path: decision.path,
            api_body: None,
            api_response,
            drift: decision.drift,
        }
    }

    pub fn changed(decision: Decision, api_body: Option<Value>, api_response: Value) -> Self {
        Self {
            changed: true,
            action: decision.action,
            cause: decision.cause,
            path: decision.path,
            api_body,
            api_response,
            drift: decision.drift,
        }
    }
}
