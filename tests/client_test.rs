//! Integration tests for the request pipeline shared by all services.

use radosgw_admin::error::{AdminError, DecodeError, TransportError, ValidationError};
use radosgw_admin::mocks::{MockResponse, MockSigner, MockTransport, TestFixtures, MOCK_AUTHORIZATION};
use radosgw_admin::time::ZoneSpec;
use radosgw_admin::{AdminClient, RequestContext};
use chrono::{FixedOffset, TimeZone, Timelike, Utc};
use std::sync::Arc;
use std::time::Duration;

fn client_with(responses: Vec<MockResponse>) -> (AdminClient, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::with_responses(responses));
    (TestFixtures::client(transport.clone()), transport)
}

#[tokio::test]
async fn test_non_200_returns_upstream_status() {
    let (client, _) = client_with(vec![MockResponse::error(
        404,
        TestFixtures::error_json("NoSuchUser"),
    )]);

    let err = client.users().info("ghost").await.unwrap_err();

    match &err {
        AdminError::UpstreamStatus {
            status,
            status_text,
            body,
        } => {
            assert_eq!(*status, 404);
            assert_eq!(status_text, "Not Found");
            assert!(body.contains("NoSuchUser"));
        }
        other => panic!("expected upstream status, got {other:?}"),
    }
    assert!(err.is_not_found());
    assert_eq!(err.upstream_code().as_deref(), Some("NoSuchUser"));
    assert!(err
        .to_string()
        .starts_with("Invalid status code 404 : Not Found : body: {\"Code\":\"NoSuchUser\""));
}

#[tokio::test]
async fn test_non_200_success_class_is_still_an_error() {
    let (client, _) = client_with(vec![MockResponse::error(204, "")]);

    let err = client.users().remove("alice", false).await.unwrap_err();
    assert_eq!(err.status_code(), Some(204));
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let (client, transport) = client_with(vec![MockResponse::ok()]);

    let err = client.users().info("").await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        "Validation error: Required field uid is missing or empty"
    );
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_raw_validator_errors() {
    let transport = Arc::new(MockTransport::new());
    let mut config = TestFixtures::config();
    config.raw_validator_errors = true;
    let client = TestFixtures::client_with(config, transport.clone());

    let err = client.users().info("").await.unwrap_err();

    match err {
        AdminError::Validation(ValidationError::Raw(violations)) => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].namespace, "UserInfoRequest.uid");
        }
        other => panic!("expected raw violations, got {other:?}"),
    }
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_discard_ignores_body() {
    let (client, transport) = client_with(vec![MockResponse::ok_with_body("not json at all")]);

    client.users().remove("alice", true).await.unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, "DELETE");
    assert_eq!(
        request.url,
        "http://rgw.test:7480/admin/user?purge-data=true&uid=alice&format=json"
    );
    assert!(!request.read_body);
}

#[tokio::test]
async fn test_decoding_calls_ask_for_the_body() {
    let (client, transport) = client_with(vec![MockResponse::json(TestFixtures::user_json("alice"))]);

    client.users().info("alice").await.unwrap();

    assert!(transport.last_request().unwrap().read_body);
}

#[tokio::test]
async fn test_empty_body_is_a_decode_error() {
    let (client, _) = client_with(vec![MockResponse::ok()]);

    let err = client.users().info("alice").await.unwrap_err();
    assert!(matches!(err, AdminError::Decode(DecodeError::EmptyBody)));
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let (client, _) = client_with(vec![MockResponse::json("{\"user_id\": ")]);

    let err = client.users().info("alice").await.unwrap_err();
    assert!(matches!(err, AdminError::Decode(DecodeError::Json(_))));
}

#[tokio::test]
async fn test_requests_are_signed() {
    let (client, transport) = client_with(vec![MockResponse::json(TestFixtures::user_json("alice"))]);

    client.users().info("alice").await.unwrap();

    let request = transport.last_request().unwrap();
    let auth = request.get_header("authorization").unwrap();
    assert!(auth.starts_with("AWS AKIDTEST:"), "got {auth}");
    assert!(request.get_header("date").unwrap().ends_with(" GMT"));
    assert!(request.url.ends_with("&format=json"));
}

#[tokio::test]
async fn test_custom_signer_receives_configured_credentials() {
    let transport = Arc::new(MockTransport::with_default(MockResponse::json(
        TestFixtures::caps_json(),
    )));
    let signer = Arc::new(MockSigner::new());
    let client = AdminClient::builder()
        .config(TestFixtures::config())
        .transport(transport.clone())
        .signer(signer.clone())
        .build()
        .unwrap();

    client
        .users()
        .add_caps(radosgw_admin::UserCapsRequest::new(
            "alice",
            vec![radosgw_admin::UserCap::new("buckets", "*")],
        ))
        .await
        .unwrap();

    assert_eq!(signer.access_keys(), vec!["AKIDTEST".to_string()]);
    assert_eq!(
        transport.last_request().unwrap().get_header("authorization"),
        Some(MOCK_AUTHORIZATION)
    );
}

#[tokio::test]
async fn test_signer_failure_sends_nothing() {
    let transport = Arc::new(MockTransport::with_default(MockResponse::ok()));
    let client = AdminClient::builder()
        .config(TestFixtures::config())
        .transport(transport.clone())
        .signer(Arc::new(MockSigner::failing()))
        .build()
        .unwrap();

    let err = client.users().info("alice").await.unwrap_err();
    assert!(matches!(err, AdminError::Encode(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let transport = Arc::new(MockTransport::new());
    transport.queue_failure(TransportError::Connect {
        message: "connection refused".to_string(),
    });
    let client = TestFixtures::client(transport);

    let err = client.users().info("alice").await.unwrap_err();
    assert!(matches!(
        err,
        AdminError::Transport(TransportError::Connect { .. })
    ));
}

#[tokio::test]
async fn test_offset_less_times_use_client_zone() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::json(
        TestFixtures::bucket_stats_json("photos", "alice"),
    )]));
    let mut config = TestFixtures::config();
    config.zone = ZoneSpec::Fixed(FixedOffset::east_opt(2 * 3600).unwrap());
    let client = TestFixtures::client_with(config, transport);

    let stats = client.buckets().stats("", "photos").await.unwrap();

    let mtime = stats[0].mtime.to_utc();
    assert_eq!(
        mtime.with_nanosecond(0).unwrap(),
        Utc.with_ymd_and_hms(2017, 3, 16, 2, 19, 58).unwrap()
    );
}

#[tokio::test]
async fn test_offset_less_times_follow_named_zone_dst() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::json(
        TestFixtures::bucket_stats_json("photos", "alice"),
    )]));
    let mut config = TestFixtures::config();
    config.zone = ZoneSpec::parse("Europe/Berlin").unwrap();
    let client = TestFixtures::client_with(config, transport);

    let stats = client.buckets().stats("", "photos").await.unwrap();

    // Central European winter time on 2017-03-16.
    let mtime = stats[0].mtime;
    assert_eq!(mtime.datetime().offset().local_minus_utc(), 3600);
    assert_eq!(
        mtime.to_utc().with_nanosecond(0).unwrap(),
        Utc.with_ymd_and_hms(2017, 3, 16, 3, 19, 58).unwrap()
    );
}

#[tokio::test(start_paused = true)]
async fn test_context_timeout() {
    let (client, _) = client_with(vec![MockResponse::json(TestFixtures::user_json("alice"))
        .with_delay(Duration::from_secs(30))]);

    let err = RequestContext::new()
        .with_timeout(Duration::from_secs(1))
        .run(client.users().info("alice"))
        .await
        .unwrap_err();

    match err {
        AdminError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_context_cancel() {
    let (client, _) = client_with(vec![MockResponse::json(TestFixtures::user_json("alice"))
        .with_delay(Duration::from_secs(30))]);

    let err = RequestContext::new()
        .with_cancel(tokio::time::sleep(Duration::from_millis(10)))
        .run(client.users().info("alice"))
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let transport = Arc::new(MockTransport::with_default(MockResponse::json(
        TestFixtures::user_json("alice"),
    )));
    let client = Arc::new(TestFixtures::client(transport.clone()));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move { client.users().info(format!("user{i}")).await })
        })
        .collect();

    for handle in handles {
        let user = handle.await.unwrap().unwrap();
        assert_eq!(user.user_id, "alice");
    }
    assert_eq!(transport.request_count(), 16);
}
