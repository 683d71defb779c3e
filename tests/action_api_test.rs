//! Integration tests for player-facing action endpoints.

mod helpers;

use axum::http::StatusCode;

use helpers::{LOCAL, TestApp, action_body};

const PLAYER: &str = "bob@example.com";

async fn app_with_player() -> (TestApp, String) {
    let app = TestApp::new().await;
    app.create_user(PLAYER, "PLAYER").await;
    let element = app.create_element(PLAYER).await;
    (app, element)
}

#[tokio::test]
async fn test_health_reports_memory_store() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["store"], "memory");
    assert_eq!(response.body["data"]["smartspace"], LOCAL);
}

#[tokio::test]
async fn test_invoke_echo_assigns_identity() {
    let (app, element) = app_with_player().await;

    let response = app.invoke("echo", PLAYER, &element).await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let action = &response.body["data"];
    assert_eq!(action["actionSmartspace"], LOCAL);
    assert_eq!(action["actionType"], "echo");
    assert!(!action["actionId"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_invoke_unregistered_type_fails() {
    let (app, element) = app_with_player().await;

    let response = app.invoke("Teleport", PLAYER, &element).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.error_code(), "ACTION_INVOCATION_FAILED");
    assert!(response.body["details"]["cause"].is_string());
}

#[tokio::test]
async fn test_invoke_without_type_is_rejected() {
    let (app, element) = app_with_player().await;

    let response = app.invoke("  ", PLAYER, &element).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_invoke_with_unknown_player_is_rejected() {
    let (app, element) = app_with_player().await;

    let response = app.invoke("Echo", "ghost@example.com", &element).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_new_action_requires_existing_element() {
    let (app, _) = app_with_player().await;

    let response = app
        .request(
            "POST",
            "/smartspace/actions/new",
            Some(action_body("Echo", PLAYER, "999")),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_new_action_from_foreign_smartspace_is_rejected() {
    let (app, element) = app_with_player().await;
    let mut body = action_body("Echo", PLAYER, &element);
    body["playerSmartspace"] = "remote".into();

    let response = app
        .request("POST", "/smartspace/actions/new", Some(body))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_check_out_without_check_in_fails() {
    let (app, element) = app_with_player().await;

    let response = app.invoke("CheckOut", PLAYER, &element).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_session_spans_check_in_to_check_out() {
    let (app, element) = app_with_player().await;

    for action_type in ["CheckIn", "Echo", "CheckOut"] {
        let response = app.invoke(action_type, PLAYER, &element).await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    }

    let response = app
        .request(
            "GET",
            &format!("/smartspace/actions/session?email={PLAYER}"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let actions = response.data_list();
    let types: Vec<&str> = actions
        .iter()
        .filter_map(|a| a["actionType"].as_str())
        .collect();
    assert_eq!(types, vec!["CheckIn", "Echo", "CheckOut"]);
}

#[tokio::test]
async fn test_session_without_check_in_is_not_found() {
    let (app, element) = app_with_player().await;
    app.invoke("Echo", PLAYER, &element).await;

    let response = app
        .request(
            "GET",
            &format!("/smartspace/actions/session?email={PLAYER}"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_latest_and_by_type() {
    let (app, element) = app_with_player().await;
    let first = app.invoke("Echo", PLAYER, &element).await;
    let second = app.invoke("Echo", PLAYER, &element).await;

    let latest = app
        .request(
            "GET",
            &format!("/smartspace/actions/latest?email={PLAYER}&type=Echo"),
            None,
        )
        .await;
    assert_eq!(latest.status, StatusCode::OK);
    assert_eq!(latest.body["data"]["actionId"], second.body["data"]["actionId"]);

    let listed = app
        .request(
            "GET",
            &format!("/smartspace/actions/by-type?email={PLAYER}&type=Echo"),
            None,
        )
        .await;
    let ids: Vec<_> = listed
        .data_list()
        .iter()
        .map(|a| a["actionId"].clone())
        .collect();
    assert_eq!(
        ids,
        vec![
            second.body["data"]["actionId"].clone(),
            first.body["data"]["actionId"].clone()
        ]
    );
}

#[tokio::test]
async fn test_by_type_without_matches_returns_null() {
    let (app, _) = app_with_player().await;

    let response = app
        .request(
            "GET",
            &format!("/smartspace/actions/by-type?email={PLAYER}&type=Echo"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"].is_null());
}

#[tokio::test]
async fn test_window_between_two_actions() {
    let (app, element) = app_with_player().await;
    let first = app.invoke("Echo", PLAYER, &element).await;
    let second = app.invoke("Echo", PLAYER, &element).await;
    app.invoke("Echo", PLAYER, &element).await;

    let from = first.body["data"]["actionId"].as_str().unwrap_or_default();
    let to = second.body["data"]["actionId"].as_str().unwrap_or_default();

    let bounded = app
        .request(
            "GET",
            &format!("/smartspace/actions/window?email={PLAYER}&type=Echo&from={from}&to={to}"),
            None,
        )
        .await;
    assert_eq!(bounded.status, StatusCode::OK);
    assert_eq!(bounded.data_list().len(), 2);

    let open_ended = app
        .request(
            "GET",
            &format!("/smartspace/actions/window?email={PLAYER}&type=Echo&from={from}&to=empty"),
            None,
        )
        .await;
    assert_eq!(open_ended.data_list().len(), 3);
}

#[tokio::test]
async fn test_delete_removes_action() {
    let (app, element) = app_with_player().await;
    let created = app.invoke("Echo", PLAYER, &element).await;
    let id = created.body["data"]["actionId"].as_str().unwrap_or_default();

    let response = app
        .request("DELETE", &format!("/smartspace/actions/{LOCAL}/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let latest = app
        .request(
            "GET",
            &format!("/smartspace/actions/latest?email={PLAYER}&type=Echo"),
            None,
        )
        .await;
    assert!(latest.body["data"].is_null());
}

#[tokio::test]
async fn test_list_plugins() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/smartspace/plugins", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let types: Vec<&str> = response.body["data"]
        .as_array()
        .map(|plugins| {
            plugins
                .iter()
                .filter_map(|p| p["actionType"].as_str())
                .collect()
        })
        .unwrap_or_default();
    assert!(types.contains(&"CheckIn"));
    assert!(types.contains(&"CheckOut"));
    assert!(types.contains(&"Echo"));
}
