use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Form-encoded sync request. The field values used in these tests contain
/// no `&`, `=`, `+`, or `%`, so they need no escaping.
fn sync_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/sync")
        .header(
            http::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(body.to_string())
        .unwrap()
}

#[tokio::test]
async fn missing_token_returns_401() {
    let app = app();
    let resp = app
        .oneshot(sync_request(r#"sync_token=*&resource_types=["all"]"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_state_sync_returns_empty_projects() {
    let app = app();
    let resp = app
        .oneshot(sync_request(
            r#"token=abc&sync_token=*&resource_types=["projects"]"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let reply = body_json(resp).await;
    assert_eq!(reply["projects"], serde_json::json!([]));
    assert_eq!(reply["temp_id_mapping"], serde_json::json!({}));
    assert!(reply["sync_token"].as_str().unwrap().starts_with("sync-"));
}

#[tokio::test]
async fn unrequested_resource_keys_are_absent() {
    let app = app();
    let resp = app
        .oneshot(sync_request(
            r#"token=abc&sync_token=*&resource_types=["labels"]"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let reply = body_json(resp).await;
    assert!(reply.get("projects").is_none());
}

#[tokio::test]
async fn malformed_resource_types_returns_400() {
    let app = app();
    let resp = app
        .oneshot(sync_request(r#"token=abc&resource_types=projects"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_commands_returns_400() {
    let app = app();
    let resp = app
        .oneshot(sync_request(
            r#"token=abc&resource_types=["all"]&commands=not-json"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn command_batch_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // add with a temp id
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(sync_request(
            r#"token=abc&sync_token=*&resource_types=["projects"]&commands=[{"type":"project_add","args":{"name":"Inbox"},"uuid":"op-1","temp_id":"tmp-1"}]"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let reply = body_json(resp).await;
    let id = reply["temp_id_mapping"]["tmp-1"].as_i64().unwrap();
    assert_eq!(reply["sync_status"]["op-1"], "ok");
    assert_eq!(reply["projects"][0]["name"], "Inbox");

    // rename by permanent id
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(sync_request(&format!(
            r#"token=abc&resource_types=["projects"]&commands=[{{"type":"project_update","args":{{"id":"{id}","name":"Renamed"}},"uuid":"op-2"}}]"#,
        )))
        .await
        .unwrap();
    let reply = body_json(resp).await;
    assert_eq!(reply["projects"][0]["name"], "Renamed");

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(sync_request(&format!(
            r#"token=abc&resource_types=["projects"]&commands=[{{"type":"project_delete","args":{{"id":"{id}"}},"uuid":"op-3"}}]"#,
        )))
        .await
        .unwrap();
    let reply = body_json(resp).await;
    assert_eq!(reply["projects"], serde_json::json!([]));
}
