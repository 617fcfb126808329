use ccp_cli::config::{delete_profile, load_profile, save_profile, Profile};
use ccp_provisioner::ApiVersion;

fn profile() -> Profile {
    Profile {
        config_version: 0,
        base_url: "https://ccp.local".into(),
        username: "admin".into(),
        version: ApiVersion::V2,
        validate_certs: false,
    }
}

#[test]
fn missing_profile_is_none() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(load_profile(&dir.path().join("profile.json")).unwrap(), None);
}

#[test]
fn save_stamps_current_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("profile.json");

    save_profile(&path, &profile()).unwrap();
    let loaded = load_profile(&path).unwrap().unwrap();
    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.version, ApiVersion::V2);
    assert!(!loaded.validate_certs);
    assert!(!path.with_extension("json.tmp").exists());
}

#[cfg(unix)]
#[test]
fn saved_profile_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    save_profile(&path, &profile()).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn unversioned_profile_with_string_version_migrates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(
        &path,
        r#"{"base_url": "https://ccp.local", "username": "admin", "version": "2"}"#,
    )
    .unwrap();

    let loaded = load_profile(&path).unwrap().unwrap();
    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.version, ApiVersion::V2);
    assert!(loaded.validate_certs);
}

#[test]
fn unsupported_version_in_profile_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(
        &path,
        r#"{"config_version": 1, "base_url": "u", "username": "a", "version": 4}"#,
    )
    .unwrap();

    assert!(load_profile(&path).is_err());
}

#[test]
fn newer_profile_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(&path, r#"{"config_version": 9, "base_url": "u", "username": "a"}"#).unwrap();

    let err = load_profile(&path).unwrap_err();
    assert!(err.to_string().contains("newer"));
}

#[test]
fn out_of_range_config_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(
        &path,
        r#"{"config_version": 4294967296, "base_url": "u", "username": "a"}"#,
    )
    .unwrap();

    let err = load_profile(&path).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn delete_removes_the_file_and_tolerates_absence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    save_profile(&path, &profile()).unwrap();

    delete_profile(&path).unwrap();
    assert!(!path.exists());
    delete_profile(&path).unwrap();
}
