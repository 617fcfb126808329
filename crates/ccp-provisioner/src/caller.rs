use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::addr::ResourcePath;
use crate::error::ProvisionerError;
use crate::request::Goal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Only creates and updates send the description.
    pub fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw status and body of one API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Authenticated access to the platform API.
///
/// Implementations carry the session; a call never retries and only
/// returns `Err` when no response was received at all.
pub trait EndpointCaller {
    fn call(
        &self,
        method: Method,
        path: &ResourcePath,
        body: Option<&Value>,
        query: &[(String, String)],
    ) -> Result<ApiResponse, ProvisionerError>;
}

/// Turn a raw response into a payload.
///
/// `Ok(None)` means "nothing there": a 204 after a delete, or a 404 on
/// the snapshot read when absence is what the caller wants.
pub fn classify(
    method: Method,
    goal: Goal,
    response: ApiResponse,
) -> Result<Option<Value>, ProvisionerError> {
    match response.status {
        200 | 202 => {
            if response.body.trim().is_empty() {
                Ok(Some(Value::Null))
            } else {
                Ok(Some(serde_json::from_str(&response.body)?))
            }
        }
        204 => Ok(None),
        404 if goal == Goal::Absent && method == Method::Get => Ok(None),
        status => Err(ProvisionerError::Transport {
            status,
            message: response.body,
        }),
    }
}
