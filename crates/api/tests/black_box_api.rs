use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

use accrue_api::app::{self, services::AppServices};
use accrue_auth::{Hs256Jwt, PasswordHasher};
use accrue_core::UserId;

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory stores and a cheap hasher, ephemeral port.
        let services = AppServices::in_memory(
            Hs256Jwt::new(JWT_SECRET, ChronoDuration::minutes(10)),
            PasswordHasher::with_params(8, 1, 1).unwrap(),
        );
        let app = app::router(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn register_and_login(client: &reqwest::Client, srv: &TestServer, email: &str) -> String {
    let res = client
        .post(srv.url("/register"))
        .json(&json!({ "email": email, "password": "correct horse" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(srv.url("/login"))
        .json(&json!({ "email": email, "password": "correct horse" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["token_type"], "Bearer");
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for path in ["/whoami", "/investments"] {
        let res = client.get(srv.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{path}");
    }

    let res = client
        .post(srv.url("/investments"))
        .bearer_auth("not-a-token")
        .json(&json!({ "amount": 1000, "interest_rate": 5, "time_period": 2, "interest_type": "simple" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_or_foreign_tokens_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &srv, "alice@example.com").await;

    let res = client
        .get(srv.url("/whoami"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let me: serde_json::Value = res.json().await.unwrap();
    let user_id = me["user_id"].as_str().unwrap().to_string();

    let now = Utc::now();
    let expired = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &json!({
            "sub": user_id,
            "iat": (now - ChronoDuration::hours(2)).timestamp(),
            "exp": (now - ChronoDuration::hours(1)).timestamp(),
        }),
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();
    let foreign = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &json!({
            "sub": user_id,
            "iat": now.timestamp(),
            "exp": (now + ChronoDuration::minutes(5)).timestamp(),
        }),
        &EncodingKey::from_secret(b"someone-else"),
    )
    .unwrap();

    for token in [expired, foreign] {
        let res = client
            .get(srv.url("/whoami"))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn token_for_unregistered_user_cannot_record() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Correctly signed and unexpired, but nobody registered this subject.
    let now = Utc::now();
    let token = Hs256Jwt::new(JWT_SECRET, ChronoDuration::minutes(10))
        .issue(UserId::new(), now)
        .unwrap()
        .token;

    let res = client
        .post(srv.url("/investments"))
        .bearer_auth(&token)
        .json(&json!({ "amount": 1000, "interest_rate": 5, "time_period": 2, "interest_type": "simple" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    for path in ["/investments", "/whoami"] {
        let res = client.get(srv.url(path)).bearer_auth(&token).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{path}");
    }
}

#[tokio::test]
async fn register_conflicts_and_bad_credentials() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    register_and_login(&client, &srv, "alice@example.com").await;

    let res = client
        .post(srv.url("/register"))
        .json(&json!({ "email": "ALICE@example.com", "password": "whatever123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "email_taken");

    let res = client
        .post(srv.url("/register"))
        .json(&json!({ "email": "bob@example.com", "password": "short" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(srv.url("/login"))
        .json(&json!({ "email": "alice@example.com", "password": "wrong password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_credentials");
}

#[tokio::test]
async fn investment_lifecycle_record_and_list() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &srv, "alice@example.com").await;

    let res = client
        .post(srv.url("/investments"))
        .bearer_auth(&token)
        .json(&json!({ "amount": 1000, "interest_rate": 5, "time_period": 2, "interest_type": "simple" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let first: serde_json::Value = res.json().await.unwrap();
    assert!((first["interest"].as_f64().unwrap() - 100.0).abs() < 1e-9);
    assert!((first["total_amount"].as_f64().unwrap() - 1100.0).abs() < 1e-9);

    // Numeric fields as strings go through the same parsing.
    let res = client
        .post(srv.url("/investments"))
        .bearer_auth(&token)
        .json(&json!({ "amount": "1000", "interest_rate": "5", "time_period": "2", "interest_type": "compound" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let second: serde_json::Value = res.json().await.unwrap();
    assert!((second["total_amount"].as_f64().unwrap() - 1102.5).abs() < 1e-9);

    let res = client
        .get(srv.url("/investments"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], first["id"]);
    assert_eq!(items[1]["id"], second["id"]);
}

#[tokio::test]
async fn invalid_submissions_are_rejected_and_not_stored() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &srv, "alice@example.com").await;

    let cases = [
        (json!({ "amount": "lots", "interest_rate": 5, "time_period": 2, "interest_type": "simple" }), StatusCode::BAD_REQUEST, "malformed_input"),
        (json!({ "amount": 1000, "interest_rate": 5, "time_period": 2, "interest_type": "annual" }), StatusCode::BAD_REQUEST, "unrecognized_interest_kind"),
        (json!({ "amount": -5, "interest_rate": 5, "time_period": 2, "interest_type": "simple" }), StatusCode::UNPROCESSABLE_ENTITY, "out_of_range"),
        (json!({ "amount": 1000, "interest_type": "simple" }), StatusCode::BAD_REQUEST, "malformed_input"),
    ];

    for (body, status, code) in cases {
        let res = client
            .post(srv.url("/investments"))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), status, "{body}");
        let err: serde_json::Value = res.json().await.unwrap();
        assert_eq!(err["error"], code, "{body}");
    }

    let res = client
        .get(srv.url("/investments"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn owners_only_see_their_own_investments() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let alice = register_and_login(&client, &srv, "alice@example.com").await;
    let bob = register_and_login(&client, &srv, "bob@example.com").await;

    for (token, amount) in [(&alice, 100), (&bob, 200), (&alice, 300)] {
        let res = client
            .post(srv.url("/investments"))
            .bearer_auth(token)
            .json(&json!({ "amount": amount, "interest_rate": 1, "time_period": 1, "interest_type": "simple" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let amounts = |body: serde_json::Value| -> Vec<f64> {
        body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["amount"].as_f64().unwrap())
            .collect()
    };

    let res = client.get(srv.url("/investments")).bearer_auth(&alice).send().await.unwrap();
    assert_eq!(amounts(res.json().await.unwrap()), vec![100.0, 300.0]);

    let res = client.get(srv.url("/investments")).bearer_auth(&bob).send().await.unwrap();
    assert_eq!(amounts(res.json().await.unwrap()), vec![200.0]);
}

#[tokio::test]
async fn quote_computes_without_recording() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/interest/quote"))
        .json(&json!({ "amount": 1000, "interest_rate": 5, "time_period": 2, "interest_type": "compound" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!((body["interest"].as_f64().unwrap() - 102.5).abs() < 1e-9);
    assert!((body["total_amount"].as_f64().unwrap() - 1102.5).abs() < 1e-9);
    assert_eq!(body["interest_type"], "compound");
}
