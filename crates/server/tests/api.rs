//! The users api driven through the router against a temporary database.

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use chrono::Utc;
use exercise_tracker::{db, routes, AppState};
use serde_json::{json, Value};
use shared::api::Object;
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    // Keeps the database and assets alive for the test
    dir: TempDir,
}

fn app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.sqlite");
    let db_path = db_path.to_str().unwrap();

    db::run_migrations(db_path).unwrap();
    let pool = db::create_pool(db_path).unwrap();
    let router = routes::router(AppState::new(pool), dir.path());

    TestApp { router, dir }
}

impl TestApp {
    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::post(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    async fn post_form(&self, uri: &str, body: &'static str) -> (StatusCode, Value) {
        let req = Request::post(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(req).await
    }

    async fn create_user(&self, username: &str) -> i64 {
        let (status, body) = self
            .post_json(Object::Users.path(), json!({ "username": username }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    async fn add_exercise(&self, id: i64, body: Value) -> (StatusCode, Value) {
        self.post_json(&Object::UserExercises.path_for(id), body).await
    }
}

fn error(message: &str) -> Value {
    json!({ "error": message })
}

#[tokio::test]
async fn registers_and_lists_users() {
    let app = app();

    let (status, body) = app.post_json("/api/users", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 1, "username": "alice" }));

    let (status, body) = app.post_form("/api/users", "username=bob").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 2, "username": "bob" }));

    let (status, body) = app.get("/api/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "id": 1, "username": "alice" }, { "id": 2, "username": "bob" }])
    );
}

#[tokio::test]
async fn rejects_bad_registrations() {
    let app = app();
    app.create_user("alice").await;

    let (status, body) = app.post_json("/api/users", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, error("username already exists"));

    let (status, body) = app.post_json("/api/users", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error("username required"));

    let (_, users) = app.get("/api/users").await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn fetches_single_users() {
    let app = app();
    let id = app.create_user("alice").await;

    let (status, body) = app.get(&Object::UserId.path_for(id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": id, "username": "alice" }));

    let (status, body) = app.get("/api/users/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("user not found"));

    for bad in ["abc", "0", "-1"] {
        let (status, body) = app.get(&format!("/api/users/{bad}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{bad}");
        assert_eq!(body, error("invalid user id"));
    }
}

#[tokio::test]
async fn logs_exercises() {
    let app = app();
    let id = app.create_user("alice").await;

    let (status, body) = app
        .add_exercise(id, json!({ "description": " run ", "duration": 30, "date": "2024-01-05" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": 1, "userId": id, "description": "run", "duration": 30, "date": "2024-01-05" })
    );

    let (status, body) = app
        .post_form(
            "/api/users/1/exercises",
            "description=swim&duration=45&date=2024-01-01",
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "swim");
    assert_eq!(body["duration"], 45);
}

#[tokio::test]
async fn exercise_date_defaults_to_today() {
    let app = app();
    let id = app.create_user("alice").await;

    let before = Utc::now().date_naive().to_string();
    let (status, body) = app
        .add_exercise(id, json!({ "description": "walk", "duration": "20" }))
        .await;
    let after = Utc::now().date_naive().to_string();

    assert_eq!(status, StatusCode::OK);
    let date = body["date"].as_str().unwrap();
    assert!(date == before || date == after, "{date}");
}

#[tokio::test]
async fn rejects_bad_exercises() {
    let app = app();
    let id = app.create_user("alice").await;

    let cases = [
        (json!({ "duration": 10 }), "description is required"),
        (json!({ "description": ["run"], "duration": 10 }), "description must be a string"),
        (json!({ "description": "  ", "duration": 10 }), "description required"),
        (json!({ "description": "x".repeat(1001), "duration": 10 }), "description too long"),
        (json!({ "description": "run" }), "duration is required"),
        (json!({ "description": "run", "duration": -5 }), "duration must be a non-negative integer"),
        (json!({ "description": "run", "duration": 10, "date": "someday" }), "invalid date format"),
        (json!({ "description": "run", "duration": 10, "date": "+10000-01-01" }), "invalid date format"),
    ];
    for (body, message) in cases {
        let (status, response) = app.add_exercise(id, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{message}");
        assert_eq!(response, error(message));
    }

    let (status, body) = app
        .add_exercise(42, json!({ "description": "run", "duration": 10 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("user not found"));

    let (status, body) = app
        .post_json("/api/users/zero/exercises", json!({ "description": "run", "duration": 10 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error("invalid user id"));

    let (_, log) = app.get(&Object::UserLogs.path_for(id)).await;
    assert_eq!(log["count"], 0);
}

#[tokio::test]
async fn filters_and_limits_logs() {
    let app = app();
    let id = app.create_user("alice").await;
    app.add_exercise(id, json!({ "description": "run", "duration": 30, "date": "2024-01-05" }))
        .await;
    app.add_exercise(id, json!({ "description": "swim", "duration": 45, "date": "2024-01-01" }))
        .await;

    let logs = Object::UserLogs.path_for(id);

    let (status, body) = app.get(&logs).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": id,
            "username": "alice",
            "logs": [
                { "id": 2, "description": "swim", "duration": 45, "date": "2024-01-01" },
                { "id": 1, "description": "run", "duration": 30, "date": "2024-01-05" },
            ],
            "count": 2,
        })
    );

    let (_, body) = app.get(&format!("{logs}?from=2024-01-03")).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["logs"][0]["description"], "run");

    let (_, body) = app.get(&format!("{logs}?to=2024-01-03")).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["logs"][0]["description"], "swim");

    let (_, body) = app.get(&format!("{logs}?from=2024-01-01&to=2024-01-05&limit=1")).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["logs"][0]["description"], "swim");
}

#[tokio::test]
async fn rejects_bad_log_queries() {
    let app = app();
    let id = app.create_user("alice").await;
    let logs = Object::UserLogs.path_for(id);

    let cases = [
        ("limit=0", "invalid limit format"),
        ("limit=abc", "invalid limit format"),
        ("from=nope", "invalid from date format"),
        ("to=nope", "invalid to date format"),
        ("from=%2B10000-01-01", "invalid from date format"),
        ("to=-0001-01-01", "invalid to date format"),
        ("from=2024-02-01&to=2024-01-01", "invalid date range"),
    ];
    for (query, message) in cases {
        let (status, body) = app.get(&format!("{logs}?{query}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(body, error(message));
    }

    let (status, body) = app.get("/api/users/7/logs").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("user not found"));
}

#[tokio::test]
async fn serves_static_files_outside_the_api() {
    let app = app();
    std::fs::write(app.dir.path().join("index.html"), "<h1>Exercise tracker</h1>").unwrap();

    let res = app
        .router
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>Exercise tracker</h1>");
}
