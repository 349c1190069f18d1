//! Integration tests for MetadataService.

use radosgw_admin::mocks::{MockResponse, MockTransport, TestFixtures};
use radosgw_admin::AdminClient;
use std::sync::Arc;

fn create_test_client(responses: Vec<MockResponse>) -> (AdminClient, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::with_responses(responses));
    (TestFixtures::client(transport.clone()), transport)
}

#[tokio::test]
async fn test_list_sections() {
    let (client, transport) = create_test_client(vec![
        MockResponse::json(r#"["alice","bob"]"#),
        MockResponse::json(r#"["photos"]"#),
        MockResponse::json(r#"["photos:default.4101.1"]"#),
    ]);

    assert_eq!(client.metadata().list_users().await.unwrap(), vec!["alice", "bob"]);
    assert_eq!(
        transport.last_request().unwrap().url,
        "http://rgw.test:7480/admin/metadata/user?format=json"
    );

    assert_eq!(client.metadata().list_buckets().await.unwrap(), vec!["photos"]);
    assert!(transport.last_request().unwrap().url.contains("/metadata/bucket?"));

    client.metadata().list_bucket_instances().await.unwrap();
    assert!(transport
        .last_request()
        .unwrap()
        .url
        .contains("/metadata/bucket.instance?"));
}

#[tokio::test]
async fn test_get_user_metadata() {
    let (client, transport) = create_test_client(vec![MockResponse::json(include_str!(
        "fixtures/muser.json"
    ))]);

    let entry = client.metadata().get_user("alice").await.unwrap();

    assert_eq!(entry.key, "user:alice");
    assert_eq!(entry.ver.ver, 3);
    assert_eq!(entry.data.user_id, "alice");
    assert_eq!(entry.data.keys[0].access_key, "AKALICE");
    assert_eq!(transport.last_request().unwrap().query(), Some("key=alice&format=json"));
}

#[tokio::test]
async fn test_get_bucket_metadata() {
    let (client, _) = create_test_client(vec![MockResponse::json(include_str!(
        "fixtures/mbucket.json"
    ))]);

    let entry = client.metadata().get_bucket("photos").await.unwrap();

    assert_eq!(entry.data.bucket.name, "photos");
    assert_eq!(entry.data.owner, "alice");
    assert_eq!(entry.data.linked, "true");
}

#[tokio::test]
async fn test_get_bucket_instance_metadata() {
    let (client, transport) = create_test_client(vec![MockResponse::json(include_str!(
        "fixtures/mbucketinstance.json"
    ))]);

    let entry = client
        .metadata()
        .get_bucket_instance("photos:default.4101.1")
        .await
        .unwrap();

    assert_eq!(entry.data.bucket_info.bucket.bucket_id, "default.4101.1");
    assert_eq!(entry.data.bucket_info.quota.max_objects, -1);
    assert_eq!(entry.data.bucket_info.has_instance_object, "true");
    assert_eq!(entry.data.attrs.len(), 2);
    assert_eq!(
        transport.last_request().unwrap().query(),
        Some("key=photos%3Adefault.4101.1&format=json")
    );
}
