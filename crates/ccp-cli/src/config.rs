use std::path::{Path, PathBuf};

use ccp_provisioner::ApiVersion;
use serde::{Deserialize, Serialize};

/// Current profile version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Stored connection defaults. The password is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Schema version. Missing or 0 = pre-versioned profile.
    #[serde(default)]
    pub config_version: u32,
    pub base_url: String,
    pub username: String,
    #[serde(default)]
    pub version: ApiVersion,
    #[serde(default = "default_validate_certs")]
    pub validate_certs: bool,
}

fn default_validate_certs() -> bool {
    true
}

pub fn default_profile_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("ccp").join("profile.json"))
}

/// Load the profile at `path`, or `None` if there is none.
pub fn load_profile(path: &Path) -> eyre::Result<Option<Profile>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read profile at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
        Some(v) => u32::try_from(v)
            .map_err(|_| eyre::eyre!("config_version {v} in {} is out of range", path.display()))?,
        None => 0,
    };

    let migrated = migrate(json, on_disk_version)?;
    let profile: Profile = serde_json::from_value(migrated)?;
    Ok(Some(profile))
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update ccp."
        ));
    }

    // v0 → v1: version was stored as a string ("3")
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("profile is not a JSON object"))?;
        let legacy = obj.get("version").and_then(|v| v.as_str()).map(str::to_string);
        if let Some(version) = legacy {
            let parsed: u8 = version
                .trim()
                .parse()
                .map_err(|_| eyre::eyre!("invalid API version `{version}` in profile"))?;
            obj.insert("version".to_string(), serde_json::Value::from(parsed));
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated profile v0 → v1 (numeric version)");
    }

    Ok(json)
}

pub fn save_profile(path: &Path, profile: &Profile) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("profile path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = profile.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "profile saved");
    Ok(())
}

pub fn delete_profile(path: &Path) -> eyre::Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
        tracing::info!(path = %path.display(), "profile deleted");
    }
    Ok(())
}
