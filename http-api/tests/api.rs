use axum::{
    body::Body,
    http::{self, Request, StatusCode},
    Router,
};
use http_api::ApiServer;
use http_body_util::BodyExt;
use mocks::{MockTodoRepository, TodoBuilder};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    ApiServer::new(Arc::new(MockTodoRepository::new())).create_router()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create_todo(app: &Router, body: Value) -> Value {
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/todos", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

// --- health ---

#[tokio::test]
async fn health_returns_ok() {
    let resp = app()
        .oneshot(get_request("/api/v1/health"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"status": "ok"}));
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = app().oneshot(get_request("/api/v1/todos")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));
}

#[tokio::test]
async fn list_todos_returns_store_order() {
    let repo = MockTodoRepository::with_todos(vec![
        TodoBuilder::new().id(2).title("second").build(),
        TodoBuilder::new().id(1).title("first").build(),
    ]);
    let app = ApiServer::new(Arc::new(repo)).create_router();

    let resp = app.oneshot(get_request("/api/v1/todos")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos = body_json(resp).await;
    let titles: Vec<&str> = todos
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["first", "second"]);
}

#[tokio::test]
async fn list_todos_filters_by_completed() {
    let app = app();
    create_todo(&app, json!({"title": "Open task"})).await;
    create_todo(&app, json!({"title": "Done task", "completed": true})).await;

    let resp = app
        .clone()
        .oneshot(get_request("/api/v1/todos?completed=true"))
        .await
        .unwrap();
    let todos = body_json(resp).await;
    assert_eq!(todos.as_array().unwrap().len(), 1);
    assert_eq!(todos[0]["title"], "Done task");

    // Any casing of "true" matches true
    let resp = app
        .clone()
        .oneshot(get_request("/api/v1/todos?completed=TRUE"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);

    // "False" and arbitrary strings both mean false
    for param in ["false", "False", "anything-else"] {
        let resp = app
            .clone()
            .oneshot(get_request(&format!("/api/v1/todos?completed={param}")))
            .await
            .unwrap();
        let todos = body_json(resp).await;
        assert_eq!(todos.as_array().unwrap().len(), 1);
        assert_eq!(todos[0]["title"], "Open task");
    }
}

#[tokio::test]
async fn list_todos_filters_by_window() {
    let app = app();
    let soon = chrono::Utc::now() + chrono::Duration::days(2);
    let far = chrono::Utc::now() + chrono::Duration::days(30);

    create_todo(&app, json!({"title": "No deadline"})).await;
    create_todo(&app, json!({"title": "Due soon", "deadline_at": soon.to_rfc3339()})).await;
    create_todo(&app, json!({"title": "Due far out", "deadline_at": far.to_rfc3339()})).await;

    let resp = app
        .clone()
        .oneshot(get_request("/api/v1/todos?window=7"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos = body_json(resp).await;
    let titles: Vec<&str> = todos
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["No deadline", "Due soon"]);
}

#[tokio::test]
async fn list_todos_accepts_negative_window() {
    let app = app();
    let past = chrono::Utc::now() - chrono::Duration::days(2);

    create_todo(&app, json!({"title": "No deadline"})).await;
    create_todo(&app, json!({"title": "Overdue", "deadline_at": past.to_rfc3339()})).await;
    create_todo(
        &app,
        json!({"title": "Due soon", "deadline_at": (chrono::Utc::now() + chrono::Duration::days(2)).to_rfc3339()}),
    )
    .await;

    let resp = app
        .clone()
        .oneshot(get_request("/api/v1/todos?window=-1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos = body_json(resp).await;
    let titles: Vec<&str> = todos
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["No deadline", "Overdue"]);
}

#[tokio::test]
async fn list_todos_rejects_malformed_window() {
    let resp = app()
        .oneshot(get_request("/api/v1/todos?window=soon"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await,
        json!({"error": "Window must be an integer"})
    );
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201_with_representation() {
    let app = app();
    let todo = create_todo(
        &app,
        json!({"title": "Buy milk", "deadline_at": "2023-02-27T00:00:00"}),
    )
    .await;

    assert!(todo["id"].is_i64());
    assert_eq!(todo["title"], "Buy milk");
    assert_eq!(todo["completed"], false);
    assert!(todo["description"].is_null());
    assert_eq!(todo["deadline_at"], "2023-02-27T00:00:00Z");
    assert!(todo["created_at"].is_string());
    assert!(todo["updated_at"].is_string());
}

#[tokio::test]
async fn create_todo_requires_title() {
    let app = app();

    for body in [json!({}), json!({"title": ""}), json!({"title": null})] {
        let resp = app
            .clone()
            .oneshot(json_request("POST", "/api/v1/todos", &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, json!({"error": "Title is required"}));
    }

    // Nothing was persisted
    let resp = app.oneshot(get_request("/api/v1/todos")).await.unwrap();
    assert_eq!(body_json(resp).await, json!([]));
}

#[tokio::test]
async fn create_todo_rejects_unknown_field() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/todos",
            &json!({"title": "x", "foo": "bar"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await,
        json!({"error": "Field foo is not allowed"})
    );

    let resp = app.oneshot(get_request("/api/v1/todos")).await.unwrap();
    assert_eq!(body_json(resp).await, json!([]));
}

#[tokio::test]
async fn create_todo_rejects_malformed_deadline() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/v1/todos",
            &json!({"title": "x", "deadline_at": "next tuesday"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await,
        json!({"error": "Invalid timestamp: next tuesday"})
    );
}

// --- get ---

#[tokio::test]
async fn get_todo_by_id() {
    let app = app();
    let created = create_todo(&app, json!({"title": "Buy milk"})).await;
    let id = created["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, created);
}

#[tokio::test]
async fn get_missing_todo_returns_404() {
    let resp = app().oneshot(get_request("/api/v1/todos/42")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await, json!({"error": "Todo not found"}));
}

// --- update ---

#[tokio::test]
async fn update_todo_replaces_present_fields() {
    let app = app();
    let created = create_todo(&app, json!({"title": "Original", "description": "keep"})).await;
    let id = created["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/todos/{id}"),
            &json!({"completed": true}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["title"], "Original");
    assert_eq!(updated["description"], "keep");
}

#[tokio::test]
async fn update_todo_accepts_falsy_values() {
    let app = app();
    let created = create_todo(&app, json!({"title": "Original", "completed": true})).await;
    let id = created["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/todos/{id}"),
            &json!({"title": "", "completed": false}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["title"], "");
    assert_eq!(updated["completed"], false);
}

#[tokio::test]
async fn update_todo_rejects_id_change() {
    let app = app();
    let created = create_todo(&app, json!({"title": "Stable"})).await;
    let id = created["id"].as_i64().unwrap();

    // Rejected even when the body id matches the path id
    for body_id in [id, id + 10] {
        let resp = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/v1/todos/{id}"),
                &json!({"id": body_id}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, json!({"error": "Cannot change id"}));
    }
}

#[tokio::test]
async fn update_todo_rejects_unknown_field() {
    let app = app();
    let created = create_todo(&app, json!({"title": "x"})).await;
    let id = created["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/todos/{id}"),
            &json!({"owner": "me"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await,
        json!({"error": "Field owner is not allowed"})
    );
}

#[tokio::test]
async fn update_missing_todo_returns_404() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/api/v1/todos/42",
            &json!({"title": "nope"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await, json!({"error": "Todo not found"}));
}

#[tokio::test]
async fn update_deadline_null_clears_and_absent_preserves() {
    let app = app();
    let created = create_todo(
        &app,
        json!({"title": "Deadline dance", "deadline_at": "2023-02-27T00:00:00"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    // Omitting the key leaves the deadline unchanged
    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/todos/{id}"),
            &json!({"title": "Renamed"}),
        ))
        .await
        .unwrap();
    let updated = body_json(resp).await;
    assert_eq!(updated["deadline_at"], "2023-02-27T00:00:00Z");

    // An explicit null clears it
    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/todos/{id}"),
            &json!({"deadline_at": null}),
        ))
        .await
        .unwrap();
    let updated = body_json(resp).await;
    assert!(updated["deadline_at"].is_null());
}

// --- delete ---

#[tokio::test]
async fn delete_missing_todo_is_noop() {
    let resp = app()
        .oneshot(delete_request("/api/v1/todos/42"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({}));
}

#[tokio::test]
async fn delete_returns_removed_representation() {
    let app = app();
    let created = create_todo(&app, json!({"title": "Short lived"})).await;
    let id = created["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(delete_request(&format!("/api/v1/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, created);

    let resp = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- end-to-end scenario ---

#[tokio::test]
async fn create_get_delete_round_trip() {
    let app = app();

    let created = create_todo(
        &app,
        json!({"title": "Buy milk", "deadline_at": "2023-02-27T00:00:00"}),
    )
    .await;
    assert_eq!(created["completed"], false);
    assert!(created["description"].is_null());
    assert_eq!(created["deadline_at"], "2023-02-27T00:00:00Z");
    let id = created["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, created);

    let resp = app
        .clone()
        .oneshot(delete_request(&format!("/api/v1/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, created);

    let resp = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await, json!({"error": "Todo not found"}));
}
