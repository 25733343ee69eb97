//! HTTP document store adapter tests against a mock server

use mockito::Matcher;
use serde_json::json;
use vitalex::adapters::store::{DocumentStore, HttpDocumentStore};
use vitalex::config::StoreConfig;

fn store_for(server: &mockito::ServerGuard) -> HttpDocumentStore {
    store_with_extra(server, "")
}

fn store_with_extra(server: &mockito::ServerGuard, extra: &str) -> HttpDocumentStore {
    // Single retry keeps the failure tests fast
    let config: StoreConfig = toml::from_str(&format!(
        r#"
        base_url = "{}"
        {extra}

        [retry]
        max_retries = 1
        "#,
        server.url()
    ))
    .unwrap();
    HttpDocumentStore::new(config).unwrap()
}

#[tokio::test]
async fn test_count_events_reads_bundle_total() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/Composition")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("date".into(), "ge2022-01-01T00:00:00.000".into()),
            Matcher::UrlEncoded("date".into(), "le2022-01-31T23:59:59.000".into()),
            Matcher::UrlEncoded("_count".into(), "0".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"total": 5, "entry": []}).to_string())
        .create_async()
        .await;

    let store = store_for(&server);
    let count = store
        .count_events("2022-01-01T00:00:00.000", "2022-01-31T23:59:59.000")
        .await
        .unwrap();

    assert_eq!(count, 5);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_events_page_decodes_records() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/Composition")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("_count".into(), "2".into()),
            Matcher::UrlEncoded("_getpagesoffset".into(), "0".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "total": 2,
                "entry": [
                    {"resource": {"id": "evt-1", "title": "Birth Declaration", "date": "2022-01-02"}},
                    {"resource": {"id": "evt-2", "title": "Death Declaration", "date": "2022-01-03"}}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = store_for(&server);
    let events = store
        .events_page("2022-01-01T00:00:00.000", "2022-01-31T23:59:59.000", 0, 2)
        .await
        .unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "evt-1");
    assert_eq!(events[1].title, "Death Declaration");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_locations_without_ids_queries_full_collection() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/Location")
        .with_status(200)
        .with_body(
            json!({
                "total": 2,
                "entry": [
                    {"resource": {"id": "l-1", "name": "Ibombo District"}},
                    {"resource": {"id": "l-2", "name": "Central Province"}}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = store_for(&server);
    let locations = store.locations_by_ids(&[]).await.unwrap();

    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0].name, "Ibombo District");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_patients_by_ids_joins_id_list() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/Patient")
        .match_query(Matcher::UrlEncoded("_id".into(), "p-1,p-2".into()))
        .with_status(200)
        .with_body(
            json!({
                "total": 2,
                "entry": [
                    {"resource": {"id": "p-1"}},
                    {"resource": {"id": "p-2"}}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = store_for(&server);
    let patients = store
        .patients_by_ids(&["p-1".to_string(), "p-2".to_string()])
        .await
        .unwrap();

    assert_eq!(patients.len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_task_for_event_queries_focus_reference() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/Task")
        .match_query(Matcher::UrlEncoded(
            "focus.reference".into(),
            "Composition/evt-1".into(),
        ))
        .with_status(200)
        .with_body(
            json!({
                "total": 1,
                "entry": [{
                    "resource": {
                        "id": "t-1",
                        "focus": {"reference": "Composition/evt-1"},
                        "businessStatus": {"coding": [{"code": "REGISTERED"}]}
                    }
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = store_for(&server);
    let task = store.task_for_event("evt-1").await.unwrap().unwrap();

    assert_eq!(task.status_code(), "REGISTERED");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_task_for_event_empty_bundle_is_none() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/Task")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"total": 0, "entry": []}).to_string())
        .create_async()
        .await;

    let store = store_for(&server);
    assert!(store.task_for_event("evt-9").await.unwrap().is_none());
}

#[tokio::test]
async fn test_server_error_surfaces_as_store_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/Composition")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let store = store_for(&server);
    let result = store
        .count_events("2022-01-01T00:00:00.000", "2022-01-31T23:59:59.000")
        .await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Server error: 500"));
}

#[tokio::test]
async fn test_bearer_token_sent_on_requests() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/Location")
        .match_header("authorization", "Bearer tok-123")
        .with_status(200)
        .with_body(json!({"total": 0, "entry": []}).to_string())
        .create_async()
        .await;

    let store = store_with_extra(&server, "auth_token = \"tok-123\"");
    store.locations_by_ids(&[]).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_document_fails_boundary_validation() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/Patient")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            // Patient resource with no id fails the typed boundary
            json!({"total": 1, "entry": [{"resource": {"gender": "female"}}]}).to_string(),
        )
        .create_async()
        .await;

    let store = store_for(&server);
    let result = store.patients_by_ids(&["p-1".to_string()]).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Invalid Patient document"));
}
