//! Integration tests for loading configuration and building clients from it.

use radosgw_admin::{AdminClient, AdminConfig, AdminError, ConfigurationError, ZoneSpec};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_from_file() {
    let file = write_temp(
        r#"
        [admin_api]
        server_url = "http://rgw.internal:7480"
        admin_path = "/ops/"
        access_key_id = "AKID"
        secret_access_key = "SECRET"
        zone_name = "+05:30"
        connect_timeout = "2s"
        "#,
    );

    let config = AdminConfig::from_file(file.path()).unwrap();

    assert_eq!(config.connect_timeout, Duration::from_secs(2));
    assert_eq!(
        config.zone,
        ZoneSpec::Fixed(chrono::FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap())
    );
    assert_eq!(config.admin_url().unwrap().as_str(), "http://rgw.internal:7480/ops");
}

#[test]
fn test_from_missing_file() {
    let err = AdminConfig::from_file("/nonexistent/rgw-admin.toml").unwrap_err();
    assert!(matches!(err, ConfigurationError::Load { .. }));
}

#[test]
fn test_unreadable_ca_bundle_path_fails_client_build() {
    let config = AdminConfig::builder()
        .server_url("https://rgw.internal")
        .credentials("AKID", "SECRET")
        .ca_cert_bundle_path("/nonexistent/ca.pem")
        .build()
        .unwrap();

    let err = AdminClient::builder().config(config).build().unwrap_err();
    assert!(matches!(
        err,
        AdminError::Configuration(ConfigurationError::CaBundleUnreadable { .. })
    ));
    assert!(err.to_string().contains("Cannot open ca cert bundle"));
}

#[test]
fn test_ca_bundle_without_certificates_fails_client_build() {
    let file = write_temp("this is not a certificate\n");
    let config = AdminConfig::builder()
        .server_url("https://rgw.internal")
        .credentials("AKID", "SECRET")
        .ca_cert_bundle_path(file.path())
        .build()
        .unwrap();

    let err = AdminClient::builder().config(config).build().unwrap_err();
    assert!(matches!(
        err,
        AdminError::Configuration(ConfigurationError::InvalidCaBundle { .. })
    ));
}

#[test]
fn test_from_env() {
    std::env::set_var("RGW_ADMIN_SERVER_URL", "http://env-rgw:7480");
    std::env::set_var("RGW_ADMIN_ACCESS_KEY_ID", "ENVAKID");
    std::env::set_var("RGW_ADMIN_SECRET_ACCESS_KEY", "ENVSECRET");
    std::env::set_var("RGW_ADMIN_TIMEOUT", "45s");
    std::env::set_var("RGW_ADMIN_ZONE_NAME", "UTC");

    let client = radosgw_admin::create_client_from_env().unwrap();

    assert_eq!(client.config().server_url, "http://env-rgw:7480");
    assert_eq!(client.config().client_timeout, Duration::from_secs(45));
    assert_eq!(client.config().credentials.access_key_id(), "ENVAKID");
    assert_eq!(client.config().zone, ZoneSpec::Utc);

    // The environment is process-wide, so these checks stay in one test.
    std::env::set_var("RGW_ADMIN_ZONE_NAME", "Europe/Berlin");
    let config = AdminConfig::builder().from_env().build().unwrap();
    assert_eq!(config.zone, ZoneSpec::Named(chrono_tz::Europe::Berlin));

    std::env::set_var("RGW_ADMIN_TIMEOUT", "soonish");
    let err = AdminConfig::builder().from_env().build().unwrap_err();
    match err {
        ConfigurationError::InvalidConfiguration { field, message } => {
            assert_eq!(field, "RGW_ADMIN_TIMEOUT");
            assert!(message.contains("soonish"));
        }
        other => panic!("expected invalid configuration, got {other:?}"),
    }
    std::env::remove_var("RGW_ADMIN_TIMEOUT");
}
