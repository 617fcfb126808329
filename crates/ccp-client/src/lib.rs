//! ccp-client
//!
//! Blocking HTTP transport for the Cisco Container Platform API: session
//! login for API v2 and v3, and an `EndpointCaller` that carries the session.

pub mod auth;
pub mod caller;
pub mod client;
pub mod error;

pub use crate::auth::{login, Credentials, Session};
pub use crate::caller::HttpCaller;
pub use crate::client::{build_agent, ClientConfig};
pub use crate::error::ClientError;
