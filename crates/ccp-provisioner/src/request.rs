use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::addr::ResourcePath;
use crate::error::ProvisionerError;

/// Caller intent for the described resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    #[default]
    Present,
    Absent,
}

/// Everything one reconciliation run needs. Built once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct ReconcileRequest {
    pub path: ResourcePath,
    /// Desired state of the resource (the request body for POST/PATCH).
    pub description: Option<Map<String, Value>>,
    /// Ordered field → value criteria for a read-only lookup.
    pub filter: Option<Map<String, Value>>,
    /// Appended to every call of the run.
    pub query: Vec<(String, String)>,
    pub goal: Goal,
    /// Decide and report, but never issue the mutating call.
    pub check_mode: bool,
}

impl ReconcileRequest {
    /// The description, if it demands anything.
    pub fn description(&self) -> Option<&Map<String, Value>> {
        self.description.as_ref().filter(|d| !d.is_empty())
    }

    /// The filter criteria, if there are any.
    pub fn filter(&self) -> Option<&Map<String, Value>> {
        self.filter.as_ref().filter(|f| !f.is_empty())
    }

    /// A run either reads via filter or mutates via description.
    pub fn validate(&self) -> Result<(), ProvisionerError> {
        if self.filter().is_some() && self.description().is_some() {
            return Err(ProvisionerError::MutualExclusion);
        }
        Ok(())
    }
}
