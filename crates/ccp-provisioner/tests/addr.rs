use ccp_provisioner::addr::{ApiVersion, Endpoint, ResourcePath};
use ccp_provisioner::caller::{classify, ApiResponse, Method};
use ccp_provisioner::error::ProvisionerError;
use ccp_provisioner::request::Goal;
use serde_json::json;

fn response(status: u16, body: &str) -> ApiResponse {
    ApiResponse {
        status,
        body: body.to_string(),
    }
}

#[test]
fn versions_map_to_url_segments() {
    let v2 = Endpoint::new("https://ccp.example.com/", ApiVersion::V2);
    let v3 = Endpoint::new("https://ccp.example.com", ApiVersion::V3);
    let path = ResourcePath::new("/clusters/");

    assert_eq!(v2.url(&path), "https://ccp.example.com/2/clusters/");
    assert_eq!(v3.url(&path), "https://ccp.example.com/v3/clusters/");
    assert_eq!(v3.login_url(), "https://ccp.example.com/v3/system/login");
}

#[test]
fn only_versions_two_and_three_are_supported() {
    assert_eq!(ApiVersion::try_from(2u8).unwrap(), ApiVersion::V2);
    assert_eq!(ApiVersion::try_from(3u8).unwrap(), ApiVersion::V3);
    assert!(matches!(
        ApiVersion::try_from(4u8),
        Err(ProvisionerError::UnsupportedVersion(4))
    ));
    assert!(serde_json::from_value::<ApiVersion>(json!(1)).is_err());
}

#[test]
fn identifier_is_appended_as_a_segment() {
    assert_eq!(
        ResourcePath::new("/clusters/").with_identifier("abc").as_str(),
        "/clusters/abc/"
    );
    assert_eq!(
        ResourcePath::new("clusters").with_identifier("abc").as_str(),
        "/clusters/abc/"
    );
}

#[test]
fn success_statuses_carry_payload() {
    let ok = classify(Method::Get, Goal::Present, response(200, r#"[{"id":"1"}]"#)).unwrap();
    assert_eq!(ok, Some(json!([{"id": "1"}])));

    let accepted = classify(Method::Post, Goal::Present, response(202, "")).unwrap();
    assert_eq!(accepted, Some(json!(null)));
}

#[test]
fn no_content_is_a_deletion_without_payload() {
    assert_eq!(
        classify(Method::Delete, Goal::Absent, response(204, "")).unwrap(),
        None
    );
}

#[test]
fn not_found_is_only_tolerated_for_absent_reads() {
    assert_eq!(
        classify(Method::Get, Goal::Absent, response(404, "gone")).unwrap(),
        None
    );
    assert!(classify(Method::Get, Goal::Present, response(404, "gone")).is_err());
    assert!(classify(Method::Delete, Goal::Absent, response(404, "gone")).is_err());
}

#[test]
fn other_statuses_fail_with_status_and_message() {
    let err = classify(Method::Get, Goal::Present, response(500, "boom")).unwrap_err();
    match err {
        ProvisionerError::Transport { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_payload_is_a_serialization_error() {
    assert!(matches!(
        classify(Method::Get, Goal::Present, response(200, "<html>")),
        Err(ProvisionerError::Serialization(_))
    ));
}
