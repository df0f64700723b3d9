//! Integration tests for the cluster status server.
//!
//! Drives the full router against an in-memory `ClusterState`.
//! Run with: cargo test --test integration

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::json;
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;

use cluster_status::api::{create_router, AppState};
use cluster_status::cluster::{
    ClusterState, Member, MemberStatus, ServiceGroups, ServiceRegistration, ServiceRegistry,
};

fn member(name: &str, status: i64) -> Member {
    Member::new(name, "10.0.0.1:7946".parse().unwrap()).with_status(MemberStatus::from(status))
}

fn seeded_state() -> Arc<ClusterState> {
    let state = ClusterState::new();
    state.upsert_member(member("b", 0));
    state.upsert_member(member("a", 1));

    let updated = OffsetDateTime::now_utc() - Duration::minutes(30);
    state.upsert_service(
        ServiceRegistration::new("deadbeef", "web", "b", updated)
            .with_field("image", json!("nginx:1.25"))
            .with_field("ports", json!([{"port": 8080, "type": "tcp"}])),
    );
    state.upsert_service(ServiceRegistration::new("cafe", "db", "a", updated));

    Arc::new(state)
}

fn app(state: Arc<ClusterState>) -> Router {
    create_router(AppState::from_cluster(state))
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// `/services.json` parses back to exactly what the registry returned.
#[tokio::test]
async fn services_json_round_trips_registry_groups() {
    let state = seeded_state();
    let response = get(app(state.clone()), "/services.json").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    let body = body_string(response).await;
    let parsed: ServiceGroups = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed, state.by_service().unwrap());
}

/// Opaque registration fields are passed through untouched.
#[tokio::test]
async fn services_json_passes_extra_fields_through() {
    let body = body_string(get(app(seeded_state()), "/services.json").await).await;
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(value["web"][0]["image"], json!("nginx:1.25"));
    assert_eq!(value["web"][0]["ports"][0]["port"], json!(8080));
    assert!(value.get("members").is_none());
}

/// Unchanged state yields byte-identical JSON bodies.
#[tokio::test]
async fn services_json_is_idempotent() {
    let state = seeded_state();

    let first = body_string(get(app(state.clone()), "/services.json").await).await;
    let second = body_string(get(app(state), "/services.json").await).await;

    assert_eq!(first, second);
}

/// The page lists "a" before "b" with their status labels.
#[tokio::test]
async fn services_page_orders_members_and_labels_status() {
    let response = get(app(seeded_state()), "/services").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));

    let body = body_string(response).await;
    assert!(body.contains(r#"<meta http-equiv="refresh" content="4">"#));

    let row_a = body.find(r#"<td class="member-name">a</td>"#).unwrap();
    let row_b = body.find(r#"<td class="member-name">b</td>"#).unwrap();
    assert!(row_a < row_b);

    let tombstone = body.find("<td>Tombstone</td>").unwrap();
    let alive = body.find("<td>Alive</td>").unwrap();
    assert!(row_a < tombstone && tombstone < row_b);
    assert!(row_b < alive);
}

/// Every member is listed exactly once.
#[tokio::test]
async fn services_page_lists_each_member_once() {
    let state = ClusterState::new();
    for name in ["gamma-node", "alpha-node", "beta-node"] {
        state.upsert_member(member(name, 0));
    }

    let body = body_string(get(app(Arc::new(state)), "/services").await).await;

    for name in ["alpha-node", "beta-node", "gamma-node"] {
        assert_eq!(body.matches(name).count(), 1, "{} listed once", name);
    }
}

/// Service ages are relative to the request time.
#[tokio::test]
async fn services_page_shows_relative_ages() {
    let body = body_string(get(app(seeded_state()), "/services").await).await;

    assert!(body.contains("30.0 mins ago"));
    assert!(body.contains("deadbeef"));
}

/// `/servers` dispatches like `/services{extension}` with no extension.
#[tokio::test]
async fn servers_alias_serves_page() {
    let response = get(app(seeded_state()), "/servers").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(r#"<td class="member-name">a</td>"#));
}

/// Mutations by the owning process show up on the next request.
#[tokio::test]
async fn responses_reflect_latest_state() {
    let state = seeded_state();

    state.remove_service("deadbeef");
    state.upsert_member(member("c", 0));

    let json_body = body_string(get(app(state.clone()), "/services.json").await).await;
    let parsed: ServiceGroups = serde_json::from_str(&json_body).unwrap();
    assert!(!parsed.contains_key("web"));

    let page = body_string(get(app(state), "/services").await).await;
    assert!(page.contains(r#"<td class="member-name">c</td>"#));
}
