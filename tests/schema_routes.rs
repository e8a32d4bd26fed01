use std::sync::Arc;

use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode, header},
};
use serde_json::json;
use tower::ServiceExt;

use querygraph::{
    routes::API_PREFIX,
    test_helpers::{StubQueryApi, test_router, test_state},
};

fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

fn app() -> Router {
    test_router(test_state(Arc::new(StubQueryApi::default())))
}

async fn json_response(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.expect("request should succeed");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("body should be json");
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_matching_mode() {
    let (status, json) = json_response(app(), get(&api_path("/health"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["ok"], true);
    assert_eq!(json["data"]["table_match"], "exact");
    assert_eq!(json["data"]["active_sessions"], 0);
}

#[tokio::test]
async fn sample_stats_cover_every_projection() {
    let (status, json) = json_response(app(), get(&api_path("/schema/sample/stats"))).await;

    assert_eq!(status, StatusCode::OK);
    let report = &json["data"];
    assert_eq!(report["tableCount"], 5);
    assert_eq!(report["columnCount"], 22);
    assert_eq!(report["columnTypes"], json!({ "uuid": 9, "varchar": 5, "timestamp": 5, "text": 3 }));
    assert_eq!(report["tables"][0]["name"], "Users");
    assert_eq!(report["tables"][0]["columnCount"], 6);
    assert_eq!(report["relationshipCounts"][1]["incoming"], 2);
    assert_eq!(report["sizeRanking"][0]["name"], "Comments");
    assert_eq!(report["sizeRanking"][0]["estimatedBytes"], 87_500 * 5 * 10);
    assert_eq!(report["relationshipMatrix"]["cells"][0][1], 1);
}

#[tokio::test]
async fn posted_schema_matches_worked_example() {
    let schema = json!({
        "tables": [
            {
                "name": "Users",
                "rowCount": 100,
                "columns": [
                    { "name": "id", "type": "uuid", "isPrimary": true },
                    { "name": "name", "type": "varchar" },
                    { "name": "email", "type": "varchar" }
                ]
            },
            {
                "name": "Posts",
                "rowCount": 400,
                "columns": [
                    { "name": "id", "type": "uuid", "isPrimary": true },
                    { "name": "user_id", "type": "uuid", "isForeign": true, "references": "Users.id" },
                    { "name": "title", "type": "varchar" },
                    { "name": "body", "type": "text" }
                ]
            }
        ],
        "relationships": [{ "from": "Posts.user_id", "to": "Users.id" }]
    });

    let (status, json) = json_response(app(), post_json(&api_path("/schema/stats"), schema)).await;

    assert_eq!(status, StatusCode::OK);
    let report = &json["data"]["report"];
    assert_eq!(
        report["relationshipCounts"],
        json!([
            { "name": "Users", "incoming": 1, "outgoing": 0, "total": 1 },
            { "name": "Posts", "incoming": 0, "outgoing": 1, "total": 1 }
        ])
    );
    assert_eq!(report["tables"][1]["foreignKeys"], 1);
    assert_eq!(report["sizeRanking"][0]["name"], "Posts");
    assert_eq!(report["sizeRanking"][0]["estimatedBytes"], 16_000);
    assert_eq!(report["sizeRanking"][1]["estimatedBytes"], 3_000);
    let share = report["sizeShares"][0]["percent"].as_f64().expect("percent");
    assert!((share - 84.21).abs() < 0.01);
    assert_eq!(json["data"]["issues"], json!([]));
}

#[tokio::test]
async fn posted_schema_issues_are_reported_not_rejected() {
    let schema = json!({
        "tables": [{ "name": "Users", "columns": [] }],
        "relationships": [{ "from": "Ghost", "to": "Users.id" }]
    });

    let (status, json) = json_response(app(), post_json(&api_path("/schema/stats"), schema)).await;

    assert_eq!(status, StatusCode::OK);
    let kinds: Vec<&str> = json["data"]["issues"]
        .as_array()
        .expect("issues array")
        .iter()
        .filter_map(|issue| issue["kind"].as_str())
        .collect();
    assert_eq!(kinds, vec!["missing_delimiter", "unknown_column"]);
    assert_eq!(json["data"]["report"]["relationshipCounts"][0]["incoming"], 1);
}

#[tokio::test]
async fn oversized_relationship_sets_are_refused() {
    let relationships: Vec<serde_json::Value> = (0..4097)
        .map(|_| json!({ "from": "Posts.user_id", "to": "Users.id" }))
        .collect();
    let schema = json!({
        "tables": [{ "name": "Users" }, { "name": "Posts" }],
        "relationships": relationships
    });

    let (status, json) = json_response(app(), post_json(&api_path("/schema/stats"), schema)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "schema has too many relationships (max 4096)");
}

#[tokio::test]
async fn malformed_body_is_wrapped_in_json_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri(api_path("/schema/stats"))
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let (status, json) = json_response(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert!(json["data"].is_null());
}

#[tokio::test]
async fn table_detail_and_unknown_table() {
    let (status, json) =
        json_response(app(), get(&api_path("/schema/sample/tables/Categories"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["table"]["name"], "Categories");
    assert_eq!(json["data"]["relationshipCount"]["incoming"], 1);
    assert_eq!(
        json["data"]["relationships"],
        json!([{ "from": "PostCategories.category_id", "to": "Categories.id" }])
    );

    let (status, json) =
        json_response(app(), get(&api_path("/schema/sample/tables/Tags"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Table not found: Tags");
}

#[tokio::test]
async fn unknown_api_route_returns_json_not_found() {
    let (status, json) = json_response(app(), get(&api_path("/nope"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
    assert_eq!(json["message"], "Not Found");
}

#[tokio::test]
async fn schema_page_renders_report() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/schema")
                .header(header::ACCEPT, "text/html")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("PostCategories"));
    assert!(html.contains("Comments.post_id"));
}
