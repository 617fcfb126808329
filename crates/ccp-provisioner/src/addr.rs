use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProvisionerError;

/// Supported platform API versions. Anything else is rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ApiVersion {
    V2,
    #[default]
    V3,
}

impl ApiVersion {
    /// URL segment inserted between the base URL and the resource path.
    pub fn segment(self) -> &'static str {
        match self {
            Self::V2 => "/2",
            Self::V3 => "/v3",
        }
    }
}

impl TryFrom<u8> for ApiVersion {
    type Error = ProvisionerError;

    fn try_from(version: u8) -> Result<Self, Self::Error> {
        match version {
            2 => Ok(Self::V2),
            3 => Ok(Self::V3),
            other => Err(ProvisionerError::UnsupportedVersion(other)),
        }
    }
}

impl From<ApiVersion> for u8 {
    fn from(version: ApiVersion) -> Self {
        match version {
            ApiVersion::V2 => 2,
            ApiVersion::V3 => 3,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Resource path relative to the versioned API root, e.g. `/clusters/`.
///
/// Extended at most once per run, with the identifier of the remote
/// object a mutating call targets.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourcePath(String);

impl ResourcePath {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.starts_with('/') {
            Self(path)
        } else {
            Self(format!("/{path}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Address a single object below this path: `{path}{identifier}/`.
    pub fn with_identifier(&self, identifier: &str) -> Self {
        let separator = if self.0.ends_with('/') { "" } else { "/" };
        Self(format!("{}{separator}{identifier}/", self.0))
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Versioned API root of one platform installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: String,
    pub version: ApiVersion,
}

impl Endpoint {
    pub fn new(base_url: &str, version: ApiVersion) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            version,
        }
    }

    /// `base + versionSegment + resourcePath`. Query parameters are
    /// attached by the transport.
    pub fn url(&self, path: &ResourcePath) -> String {
        format!("{}{}{}", self.base_url, self.version.segment(), path)
    }

    pub fn login_url(&self) -> String {
        self.url(&ResourcePath::new("/system/login"))
    }
}
