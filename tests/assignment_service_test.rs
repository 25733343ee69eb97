//! HTTP collaborator tests for the assignment service

use mockito::Matcher;
use serde_json::json;
use vitalex::assignment::{
    AssignmentDetails, AssignmentDocument, HttpSearchIndexWriter, HttpUserDirectory,
    SearchIndexWriter, UserDirectory,
};
use vitalex::config::UserApiConfig;

fn user_api_config(server: &mockito::ServerGuard) -> UserApiConfig {
    toml::from_str(&format!(
        r#"
        base_url = "{}"
        auth_token = "tok-users"
        "#,
        server.url()
    ))
    .unwrap()
}

#[tokio::test]
async fn test_user_lookup_posts_practitioner_id() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/getUser")
        .match_header("authorization", "Bearer tok-users")
        .match_body(Matcher::Json(json!({"practitionerId": "pr-1"})))
        .with_status(200)
        .with_body(
            json!({
                "name": [{"given": ["Kennedy"], "family": "Mweene"}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let directory = HttpUserDirectory::new(user_api_config(&server)).unwrap();
    let user = directory.user_by_id("pr-1").await.unwrap();

    assert_eq!(user.first_name, "Kennedy");
    assert_eq!(user.last_name, "Mweene");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_user_lookup_failure_is_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/getUser")
        .with_status(404)
        .create_async()
        .await;

    let directory = HttpUserDirectory::new(user_api_config(&server)).unwrap();
    assert!(directory.user_by_id("pr-missing").await.is_err());
}

#[tokio::test]
async fn test_upsert_puts_document_keyed_by_record_id() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/SearchAssignment/evt-1")
        .match_header("authorization", "Bearer tok-users")
        .match_body(Matcher::Json(json!({
            "modifiedAt": 1654041600000i64,
            "assignment": {
                "officeName": "Ibombo District Office",
                "practitionerId": "pr-1",
                "firstName": "Kennedy",
                "lastName": "Mweene"
            },
            "updatedBy": "pr-1"
        })))
        .with_status(200)
        .create_async()
        .await;

    let writer = HttpSearchIndexWriter::new(user_api_config(&server)).unwrap();
    let document = AssignmentDocument::assigned(
        1654041600000,
        AssignmentDetails {
            office_name: "Ibombo District Office".to_string(),
            practitioner_id: "pr-1".to_string(),
            first_name: "Kennedy".to_string(),
            last_name: "Mweene".to_string(),
        },
        "pr-1".to_string(),
    );

    writer.upsert_assignment("evt-1", &document).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upsert_removal_document() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/SearchAssignment/evt-2")
        .match_body(Matcher::Json(json!({"assignment": null})))
        .with_status(200)
        .create_async()
        .await;

    let writer = HttpSearchIndexWriter::new(user_api_config(&server)).unwrap();
    writer
        .upsert_assignment("evt-2", &AssignmentDocument::removed())
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upsert_failure_is_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("PUT", "/SearchAssignment/evt-3")
        .with_status(500)
        .create_async()
        .await;

    let writer = HttpSearchIndexWriter::new(user_api_config(&server)).unwrap();
    let result = writer
        .upsert_assignment("evt-3", &AssignmentDocument::removed())
        .await;
    assert!(result.is_err());
}
