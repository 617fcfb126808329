use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionerError {
    #[error("API error (HTTP {status}): {message}")]
    Transport { status: u16, message: String },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("no object with the given filter {filter} found in {snapshot}")]
    FilterNotFound { filter: String, snapshot: String },

    #[error("filter and api body are mutually exclusive")]
    MutualExclusion,

    #[error("refusing to delete {path}: it addresses a collection and the body carries no name")]
    AbsentGoalMissingIdentifier { path: String },

    #[error("remote object {name} has no id")]
    MissingIdentifier { name: String },

    #[error("unsupported API version {0}, expected 2 or 3")]
    UnsupportedVersion(u8),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProvisionerError {
    /// Prepend the request path to transport-level messages.
    pub fn with_path(self, method: &str, path: &str) -> Self {
        match self {
            Self::Transport { status, message } => Self::Transport {
                status,
                message: format!("{method} {path}: {message}"),
            },
            Self::Connection(msg) => Self::Connection(format!("{method} {path}: {msg}")),
            other => other,
        }
    }
}

/// Walk the full error chain and join all causes into one string.
///
/// Transport errors often have terse `Display` impls but useful detail
/// in the source chain.
pub fn format_err_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
