use std::fmt;

use ccp_provisioner::error::format_err_chain;
use ccp_provisioner::{ApiVersion, Endpoint};
use tracing::info;
use ureq::Agent;

use crate::error::ClientError;

pub const TOKEN_HEADER: &str = "x-auth-token";

pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

/// Authenticated session returned by the login handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    /// `Cookie` header value built from the login response (API v2).
    pub cookies: Option<String>,
}

/// Log in to the platform.
///
/// v2 passes the credentials as query parameters on a JSON request,
/// v3 as a form-encoded body. Both return the session token in the
/// `x-auth-token` header.
pub fn login(
    agent: &Agent,
    endpoint: &Endpoint,
    credentials: &Credentials,
) -> Result<Session, ClientError> {
    info!(
        username = %credentials.username,
        version = %endpoint.version,
        "logging in"
    );

    let url = endpoint.login_url();
    let result = match endpoint.version {
        ApiVersion::V2 => agent
            .post(&url)
            .header("content-type", "application/json")
            .query("username", &credentials.username)
            .query("password", &credentials.password)
            .send_empty(),
        ApiVersion::V3 => agent.post(&url).send_form([
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ]),
    };
    let mut response = result.map_err(|e| ClientError::Http(format_err_chain(&e)))?;

    let status = response.status().as_u16();
    if status != 200 {
        let message = response.body_mut().read_to_string().unwrap_or_default();
        return Err(ClientError::AuthFailed(format!("HTTP {status}: {message}")));
    }

    let token = response
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ClientError::AuthFailed(format!("no {TOKEN_HEADER} header in response")))?
        .to_string();

    let cookies = cookie_header(
        response
            .headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok()),
    );

    info!(username = %credentials.username, "login succeeded");
    Ok(Session { token, cookies })
}

/// Fold `Set-Cookie` values into a single `Cookie` request header value.
pub fn cookie_header<'a>(set_cookies: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let pairs: Vec<&str> = set_cookies
        .into_iter()
        .filter_map(|c| c.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}
