use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("login failed: {0}")]
    AuthFailed(String),

    #[error("HTTP error: {0}")]
    Http(String),
}
