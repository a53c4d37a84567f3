//! Integration tests for the todo API.
//!
//! Each test binds a real listener on an ephemeral port and talks to it over
//! HTTP. Run with: cargo test --test integration

use std::net::SocketAddr;

use pretty_assertions::assert_eq;
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use todo_api::api::{create_router, AppState};
use todo_api::config::Config;
use todo_api::todo::{Todo, TodoStore};

/// Start a server on 127.0.0.1 with a seeded store and return its base URL.
async fn spawn_server() -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    let router = create_router(AppState::new(TodoStore::seeded()), &Config::default());
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server error");
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_crud_round_over_http() {
    let base = spawn_server().await;
    let client = Client::new();

    let created: Todo = {
        let response = client
            .post(format!("{base}/api/todos"))
            .json(&json!({"name": "Write spec"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        response.json().await.unwrap()
    };
    assert_eq!(created.id, 4);
    assert!(!created.is_complete);

    let response = client
        .put(format!("{base}/api/todos/4"))
        .json(&json!({"isComplete": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Todo = response.json().await.unwrap();
    assert_eq!(updated.name, "Write spec");
    assert!(updated.is_complete);

    let response = client
        .delete(format!("{base}/api/todos/2"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.text().await.unwrap().is_empty());

    let response = client
        .get(format!("{base}/api/todos/2"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Todo not found"}));

    let todos: Vec<Todo> = client
        .get(format!("{base}/api/todos"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<i64> = todos.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3, 4]);
}

#[tokio::test]
async fn test_invalid_requests_leave_store_unchanged() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{base}/api/todos/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{base}/api/todos"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let todos: Vec<Todo> = client
        .get(format!("{base}/api/todos"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(todos.len(), 3);

    // Counter was not consumed by the rejected create.
    let created: Todo = client
        .post(format!("{base}/api/todos"))
        .json(&json!({"name": "fourth"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created.id, 4);
}

#[tokio::test]
async fn test_cors_preflight_from_frontend_origin() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .request(Method::OPTIONS, format!("{base}/api/todos/1"))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "PUT")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:3000"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("PUT"));
    assert!(methods.contains("DELETE"));
}

#[tokio::test]
async fn test_concurrent_creates_over_http() {
    let base = spawn_server().await;
    let client = Client::new();

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let client = client.clone();
            let url = format!("{base}/api/todos");
            tokio::spawn(async move {
                let todo: Todo = client
                    .post(url)
                    .json(&json!({"name": format!("task {i}")}))
                    .send()
                    .await
                    .unwrap()
                    .json()
                    .await
                    .unwrap();
                todo.id
            })
        })
        .collect();

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (4..24).collect::<Vec<i64>>());
}
