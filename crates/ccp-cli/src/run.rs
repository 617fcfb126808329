use std::path::Path;

use ccp_client::{build_agent, login, ClientConfig, Credentials, HttpCaller};
use ccp_provisioner::{reconcile, ApiVersion, Endpoint, ReconcileRequest, ResourcePath, RunReport};
use serde_json::{Map, Value};

use crate::args::{ApplyArgs, ConnectionArgs};
use crate::config::Profile;

/// Merge flags over the stored profile. Flags win.
pub fn resolve_connection(
    args: &ConnectionArgs,
    profile: Option<&Profile>,
) -> eyre::Result<(ClientConfig, Credentials)> {
    let base_url = args
        .base_url
        .clone()
        .or_else(|| profile.map(|p| p.base_url.clone()))
        .ok_or_else(|| {
            eyre::eyre!("no base URL: pass --base-url, set CCP_BASE_URL, or run `ccp profile save`")
        })?;
    let username = args
        .username
        .clone()
        .or_else(|| profile.map(|p| p.username.clone()))
        .ok_or_else(|| eyre::eyre!("no username: pass --username or set CCP_USERNAME"))?;
    let password = args
        .password
        .clone()
        .ok_or_else(|| eyre::eyre!("no password: pass --password or set CCP_PASSWORD"))?;

    let version = match args.api_version {
        Some(v) => ApiVersion::try_from(v)?,
        None => profile.map(|p| p.version).unwrap_or_default(),
    };

    let mut config = ClientConfig::new(Endpoint::new(&base_url, version));
    config.validate_certs = if args.insecure {
        false
    } else if args.verify_certs {
        true
    } else {
        profile.is_none_or(|p| p.validate_certs)
    };

    Ok((config, Credentials { username, password }))
}

/// Build the immutable run input from `apply` flags.
pub fn build_request(args: &ApplyArgs) -> eyre::Result<ReconcileRequest> {
    let description = args.body.as_deref().map(load_body).transpose()?;
    let filter: Map<String, Value> = args.filter.iter().cloned().collect();

    Ok(ReconcileRequest {
        path: ResourcePath::new(args.resource_path.clone()),
        description,
        filter: (!filter.is_empty()).then_some(filter),
        query: args.query.clone(),
        goal: args.state.into(),
        check_mode: args.check,
    })
}

/// Inline JSON, or `@path` to read it from a file. Must be an object.
pub fn load_body(raw: &str) -> eyre::Result<Map<String, Value>> {
    let text = match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path))
            .map_err(|e| eyre::eyre!("failed to read body from {path}: {e}"))?,
        None => raw.to_string(),
    };
    match serde_json::from_str(&text)? {
        Value::Object(map) => Ok(map),
        other => Err(eyre::eyre!("body must be a JSON object, got {other}")),
    }
}

/// Log in and run one reconciliation.
pub fn apply(config: &ClientConfig, credentials: &Credentials, request: &ReconcileRequest) -> eyre::Result<RunReport> {
    // Fail on a bad request before touching the network.
    request.validate()?;

    let agent = build_agent(config);
    let session = login(&agent, &config.endpoint, credentials)?;
    let caller = HttpCaller::new(agent, config.endpoint.clone(), session);

    Ok(reconcile(&caller, request)?)
}
