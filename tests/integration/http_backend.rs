//! Integration tests for the HTTP backend against a local fake server

use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pawnav::api::PluginStatus;
use pawnav::{ApiError, Backend, HttpBackend};
use serde_json::{json, Value};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fake server");
    });
    format!("http://{addr}")
}

async fn plugin_by_id(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    if id == "counter" {
        Ok(Json(json!({
            "plugin": { "id": "counter", "name": "Counter", "status": "running", "port": 9100 }
        })))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

async fn project_by_id(Path(id): Path<String>) -> Json<Value> {
    Json(json!({ "project": { "id": id, "name": "Echo" } }))
}

fn dashboard_api() -> Router {
    Router::new()
        .route(
            "/api/ai-ui/plugins",
            get(|| async {
                Json(json!({
                    "plugins": [
                        { "id": "counter", "name": "Counter", "status": "running" },
                        { "id": "notes", "name": "Notes", "icon": "book", "extra": true }
                    ]
                }))
            }),
        )
        .route("/api/ai-ui/plugins/{id}", get(plugin_by_id))
        .route(
            "/api/ai-ui/gallery",
            get(|| async { Json(json!({ "apps": [{ "id": "todo", "name": "Todo" }] })) }),
        )
        .route("/api/projects/{id}", get(project_by_id))
        .route(
            "/api/browser/profiles",
            get(|| async { Json(json!({ "profiles": [{ "id": "p1", "name": "Work" }] })) }),
        )
        .route(
            "/api/sessions",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route("/api/missions", get(|| async { "not json" }))
}

async fn backend() -> HttpBackend {
    let base_url = serve(dashboard_api()).await;
    HttpBackend::new(format!("{base_url}/"), Duration::from_secs(5)).expect("valid base url")
}

#[tokio::test]
async fn test_lists_unwrap_envelopes() {
    let backend = backend().await;

    let plugins = backend.list_plugins().await.unwrap();
    assert_eq!(plugins.len(), 2);
    assert_eq!(plugins[0].status, PluginStatus::Running);
    assert_eq!(plugins[1].status, PluginStatus::Stopped);
    assert_eq!(plugins[0].icon, "package");
    assert_eq!(plugins[1].icon, "book");

    let apps = backend.gallery().await.unwrap();
    assert_eq!(apps[0].id, "todo");

    let profiles = backend.list_browser_profiles().await.unwrap();
    assert_eq!(profiles[0].name, "Work");
}

#[tokio::test]
async fn test_get_maps_not_found_to_none() {
    let backend = backend().await;

    let plugin = backend.get_plugin("counter").await.unwrap();
    assert_eq!(plugin.and_then(|p| p.port), Some(9100));

    assert!(backend.get_plugin("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_ids_are_encoded_in_paths() {
    let backend = backend().await;

    let project = backend.get_project("a b/c").await.unwrap();
    assert_eq!(project.map(|p| p.id), Some("a b/c".to_string()));
}

#[tokio::test]
async fn test_server_errors_are_reported() {
    let backend = backend().await;

    match backend.list_sessions().await {
        Err(ApiError::Status { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/api/sessions"));
        }
        other => panic!("expected status error, got {other:?}"),
    }

    assert!(matches!(
        backend.list_missions().await,
        Err(ApiError::Decode { .. })
    ));

    // A missing list endpoint is an error, not an empty list
    assert!(matches!(
        backend.list_projects().await,
        Err(ApiError::Status { status: 404, .. })
    ));
}
