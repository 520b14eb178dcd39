use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use cars_api::{
    auth::{Claims, JwtAuth},
    handlers,
    repository::InMemoryCarStore,
    state::AppState,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::{Client, StatusCode};
use serde_json::json;
use tokio::net::TcpListener;

const SECRET: &str = "integration-secret";

fn token(role: &str) -> String {
    let claims = Claims {
        sub: "integration".to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as u64,
        iss: None,
        role: vec![role.to_string()],
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

async fn create_test_server() -> SocketAddr {
    let state = AppState::new(
        Arc::new(InMemoryCarStore::new()),
        JwtAuth::new(SECRET, None, "Teacher"),
    );
    let app = handlers::app(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Verify server is actually listening by trying to connect
    let mut retries = 0;
    while retries < 10 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        retries += 1;
    }

    addr
}

#[tokio::test]
async fn test_car_lifecycle_scenario() {
    let addr = create_test_server().await;
    let client = Client::new();
    let bearer = token("Teacher");
    let base = format!("http://{}/api/v1/cars", addr);

    let response = client
        .post(&base)
        .bearer_auth(&bearer)
        .json(&json!({
            "brandName": "Toyota",
            "modelName": "Corolla",
            "yearOfConstruction": 2020
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()["location"], "/api/v1/cars/1");
    let created: serde_json::Value = response.json().await.unwrap();
    assert_eq!(created["id"], 1);

    let response = client
        .get(format!("{}/1", base))
        .bearer_auth(&bearer)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "id": 1, "brandName": "Toyota", "modelName": "Corolla", "yearOfConstruction": 2020 })
    );

    let response = client
        .put(format!("{}/1", base))
        .bearer_auth(&bearer)
        .json(&json!({
            "id": 1,
            "brandName": "Toyota",
            "modelName": "Corolla Hybrid",
            "yearOfConstruction": 2021
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.text().await.unwrap().is_empty());

    let body: serde_json::Value = client
        .get(format!("{}/1", base))
        .bearer_auth(&bearer)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["modelName"], "Corolla Hybrid");
    assert_eq!(body["yearOfConstruction"], 2021);

    let response = client
        .delete(format!("{}/1", base))
        .bearer_auth(&bearer)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .get(format!("{}/1", base))
        .bearer_auth(&bearer)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_created_ids_are_unique() {
    let addr = create_test_server().await;
    let client = Client::new();
    let bearer = token("Teacher");
    let base = format!("http://{}/api/v1/cars", addr);

    let mut ids = Vec::new();
    for model in ["Corolla", "Yaris", "Prius"] {
        let body: serde_json::Value = client
            .post(&base)
            .bearer_auth(&bearer)
            .json(&json!({ "brandName": "Toyota", "modelName": model, "yearOfConstruction": 2019 }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        ids.push(body["id"].as_i64().unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);

    let listed: Vec<serde_json::Value> = client
        .get(&base)
        .bearer_auth(&bearer)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 3);
}

#[tokio::test]
async fn test_patch_with_json_patch_content_type() {
    let addr = create_test_server().await;
    let client = Client::new();
    let bearer = token("Teacher");
    let base = format!("http://{}/api/v1/cars", addr);

    client
        .post(&base)
        .bearer_auth(&bearer)
        .json(&json!({ "brandName": "Volvo", "modelName": "V70", "yearOfConstruction": 2004 }))
        .send()
        .await
        .unwrap();

    let response = client
        .patch(format!("{}/1", base))
        .bearer_auth(&bearer)
        .header(reqwest::header::CONTENT_TYPE, "application/json-patch+json")
        .body(
            json!([
                { "op": "test", "path": "/brandName", "value": "Volvo" },
                { "op": "replace", "path": "/yearOfConstruction", "value": 2005 }
            ])
            .to_string(),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["yearOfConstruction"], 2005);

    let response = client
        .patch(format!("{}/1", base))
        .bearer_auth(&bearer)
        .header(reqwest::header::CONTENT_TYPE, "application/json-patch+json")
        .body(json!([{ "op": "replace", "path": "/id", "value": 2 }]).to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_requests_without_role_are_rejected_before_handlers() {
    let addr = create_test_server().await;
    let client = Client::new();
    let base = format!("http://{}/api/v1/cars", addr);

    let response = client
        .post(&base)
        .json(&json!({ "brandName": "Volvo", "modelName": "V70", "yearOfConstruction": 2004 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .post(&base)
        .bearer_auth(token("Student"))
        .json(&json!({ "brandName": "Volvo", "modelName": "V70", "yearOfConstruction": 2004 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let listed: Vec<serde_json::Value> = client
        .get(&base)
        .bearer_auth(token("Teacher"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_health_check() {
    let addr = create_test_server().await;
    let client = Client::new();

    let response = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}
