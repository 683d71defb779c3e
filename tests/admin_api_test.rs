//! Integration tests for admin import/listing and manager listings.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};

use helpers::{LOCAL, TestApp};

const ADMIN: &str = "admin@example.com";
const MANAGER: &str = "manager@example.com";
const PLAYER: &str = "bob@example.com";

async fn seeded_app() -> (TestApp, String) {
    let app = TestApp::new().await;
    app.create_user(ADMIN, "ADMIN").await;
    app.create_user(MANAGER, "MANAGER").await;
    app.create_user(PLAYER, "PLAYER").await;
    let element = app.create_element(ADMIN).await;
    (app, element)
}

fn foreign_action(id: &str, player_smartspace: &str) -> Value {
    json!({
        "actionId": id,
        "actionSmartspace": "remote",
        "actionType": "Echo",
        "playerEmail": "alice@remote.org",
        "playerSmartspace": player_smartspace,
        "elementId": "7",
        "elementSmartspace": "remote",
        "creationTimestamp": "2024-03-01T10:00:00Z",
        "moreAttributes": { "source": "federation" },
    })
}

#[tokio::test]
async fn test_admin_imports_foreign_actions() {
    let (app, _) = seeded_app().await;

    let response = app
        .request(
            "POST",
            &format!("/smartspace/admin/actions/{LOCAL}/{ADMIN}"),
            Some(json!([
                foreign_action("100", "remote"),
                foreign_action("101", "remote")
            ])),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data_list().len(), 2);

    let listed = app
        .request(
            "GET",
            &format!("/smartspace/admin/actions/{LOCAL}/{ADMIN}?page=0&size=10"),
            None,
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let ids: Vec<&str> = listed
        .body["data"]
        .as_array()
        .map(|a| a.iter().filter_map(|v| v["actionId"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec!["100", "101"]);
}

#[tokio::test]
async fn test_import_of_local_player_actions_is_refused_whole() {
    let (app, _) = seeded_app().await;

    let response = app
        .request(
            "POST",
            &format!("/smartspace/admin/actions/{LOCAL}/{ADMIN}"),
            Some(json!([
                foreign_action("100", "remote"),
                foreign_action("101", LOCAL)
            ])),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let listed = app
        .request(
            "GET",
            &format!("/smartspace/admin/actions/{LOCAL}/{ADMIN}"),
            None,
        )
        .await;
    assert!(listed.data_list().is_empty());
}

#[tokio::test]
async fn test_import_requires_admin() {
    let (app, _) = seeded_app().await;

    for caller in [PLAYER, "nobody@example.com"] {
        let response = app
            .request(
                "POST",
                &format!("/smartspace/admin/actions/{LOCAL}/{caller}"),
                Some(json!([foreign_action("100", "remote")])),
            )
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "caller {caller}");
    }
}

#[tokio::test]
async fn test_duplicate_import_keeps_nothing_of_the_batch() {
    let (app, _) = seeded_app().await;
    let path = format!("/smartspace/admin/actions/{LOCAL}/{ADMIN}");

    let first = app
        .request("POST", &path, Some(json!([foreign_action("100", "remote")])))
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request(
            "POST",
            &path,
            Some(json!([
                foreign_action("200", "remote"),
                foreign_action("100", "remote")
            ])),
        )
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);

    let listed = app.request("GET", &path, None).await;
    assert_eq!(listed.data_list().len(), 1);
}

#[tokio::test]
async fn test_admin_listing_checks_caller() {
    let (app, _) = seeded_app().await;

    let player = app
        .request(
            "GET",
            &format!("/smartspace/admin/actions/{LOCAL}/{PLAYER}"),
            None,
        )
        .await;
    assert_eq!(player.status, StatusCode::FORBIDDEN);

    let unknown = app
        .request(
            "GET",
            &format!("/smartspace/admin/actions/{LOCAL}/ghost@example.com"),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_manager_lists_local_actions_by_type() {
    let (app, element) = seeded_app().await;
    app.invoke("Echo", PLAYER, &element).await;
    app.invoke("CheckIn", PLAYER, &element).await;
    app.request(
        "POST",
        &format!("/smartspace/admin/actions/{LOCAL}/{ADMIN}"),
        Some(json!([foreign_action("100", "remote")])),
    )
    .await;

    let response = app
        .request(
            "GET",
            &format!("/smartspace/manager/actions/{LOCAL}/{MANAGER}?type=Echo"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let actions = response.data_list();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0]["actionSmartspace"], LOCAL);
}

#[tokio::test]
async fn test_manager_window_listing() {
    let (app, element) = seeded_app().await;
    app.invoke("Echo", PLAYER, &element).await;

    let response = app
        .request(
            "GET",
            &format!(
                "/smartspace/manager/actions/{LOCAL}/{MANAGER}?type=Echo&from=2000-01-01T00:00:00Z&to=2100-01-01T00:00:00Z"
            ),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data_list().len(), 1);

    let empty = app
        .request(
            "GET",
            &format!(
                "/smartspace/manager/actions/{LOCAL}/{MANAGER}?type=Echo&from=2000-01-01T00:00:00Z&to=2000-01-02T00:00:00Z"
            ),
            None,
        )
        .await;
    assert!(empty.data_list().is_empty());
}

#[tokio::test]
async fn test_manager_listing_rejects_other_roles() {
    let (app, _) = seeded_app().await;

    let response = app
        .request(
            "GET",
            &format!("/smartspace/manager/actions/{LOCAL}/{PLAYER}?type=Echo"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_REQUEST");
}

#[tokio::test]
async fn test_manager_window_needs_both_bounds() {
    let (app, _) = seeded_app().await;

    let response = app
        .request(
            "GET",
            &format!(
                "/smartspace/manager/actions/{LOCAL}/{MANAGER}?type=Echo&from=2000-01-01T00:00:00Z"
            ),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}
