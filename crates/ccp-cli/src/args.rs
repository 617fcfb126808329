use std::path::PathBuf;

use ccp_provisioner::Goal;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "ccp")]
#[command(about = "Declarative resource management for Cisco Container Platform")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Base URL of the platform, e.g. https://10.0.0.10 (overrides the profile)
    #[arg(long, global = true, env = "CCP_BASE_URL")]
    pub base_url: Option<String>,

    /// Username (overrides the profile)
    #[arg(short, long, global = true, env = "CCP_USERNAME")]
    pub username: Option<String>,

    /// Password, never stored in the profile
    #[arg(long, global = true, env = "CCP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// API version, 2 or 3
    #[arg(long, global = true)]
    pub api_version: Option<u8>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Verify TLS certificates even if the profile says not to
    #[arg(long, global = true, conflicts_with = "insecure")]
    pub verify_certs: bool,

    /// Profile file (defaults to the user config directory)
    #[arg(long, global = true, env = "CCP_PROFILE")]
    pub profile: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile one resource against its description, or look one up
    Apply(ApplyArgs),
    /// Manage the stored connection profile
    Profile(ProfileArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum State {
    /// Create or update the resource until it matches the body
    #[default]
    Present,
    /// Delete the resource if it exists
    Absent,
}

impl From<State> for Goal {
    fn from(state: State) -> Self {
        match state {
            State::Present => Goal::Present,
            State::Absent => Goal::Absent,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ApplyArgs {
    /// Resource path below the API root, e.g. /clusters/
    #[arg(long)]
    pub resource_path: String,

    /// Desired state as a JSON object, or @file to read it from a file
    #[arg(long)]
    pub body: Option<String>,

    /// Lookup criterion as field=value, applied in order (repeatable)
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filter: Vec<(String, Value)>,

    /// Query parameter as key=value, sent with every call (repeatable)
    #[arg(long = "query", value_parser = parse_query)]
    pub query: Vec<(String, String)>,

    #[arg(long, value_enum, default_value_t = State::Present)]
    pub state: State,

    /// Report what would change without changing anything
    #[arg(long)]
    pub check: bool,
}

#[derive(clap::Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommands,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Save --base-url, --username, --api-version and --insecure/--verify-certs
    Save,
    /// Show the stored profile
    Show,
    /// Delete the stored profile
    Delete,
}

/// Parse `field=value`. The value is read as JSON when it parses,
/// otherwise taken as a plain string (`name=prod` and `size=3` both work).
pub fn parse_filter(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = split_pair(raw)?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

pub fn parse_query(raw: &str) -> Result<(String, String), String> {
    let (key, value) = split_pair(raw)?;
    Ok((key.to_string(), value.to_string()))
}

fn split_pair(raw: &str) -> Result<(&str, &str), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}
