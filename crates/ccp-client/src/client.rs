use std::time::Duration;

use ccp_provisioner::Endpoint;
use ureq::Agent;
use ureq::tls::TlsConfig;

/// Connection settings shared by login and every API call.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Endpoint,
    /// Verify the server certificate. Lab installations often run with
    /// self-signed certificates.
    pub validate_certs: bool,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            validate_certs: true,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Build an HTTP agent for the platform API.
///
/// Error statuses are returned as responses so the caller can classify
/// them, and redirects are never followed.
pub fn build_agent(config: &ClientConfig) -> Agent {
    let tls = TlsConfig::builder()
        .disable_verification(!config.validate_certs)
        .build();

    let agent_config = Agent::config_builder()
        .http_status_as_error(false)
        .max_redirects(0)
        .timeout_global(Some(config.timeout))
        .tls_config(tls)
        .build();

    Agent::new_with_config(agent_config)
}
