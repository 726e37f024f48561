#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use laptop_city_api::{
    gateway::{GatewayError, GatewayResult, PaymentGateway, PaymentIntent},
    middleware::auth::TokenKeys,
    models::Document,
    routes::create_app,
    state::AppState,
    store::{
        Collection, DeleteResult, DocumentStore, Filter, InsertResult, MemoryStore, StoreError,
        StoreResult, Update, UpdateResult, WriteBatch, WriteOptions, WriteOutcome,
    },
};
use serde_json::Value;
use tower::util::ServiceExt;

pub const SECRET: &str = "integration-test-secret";

/// Gateway double that records every requested intent.
#[derive(Default)]
pub struct FakeGateway {
    pub calls: Mutex<Vec<(i64, String)>>,
    pub fail: bool,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> GatewayResult<PaymentIntent> {
        self.calls
            .lock()
            .unwrap()
            .push((amount, currency.to_string()));
        if self.fail {
            return Err(GatewayError::Network("connection refused".into()));
        }
        Ok(PaymentIntent {
            id: format!("pi_{amount}"),
            client_secret: format!("pi_{amount}_secret_test"),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

/// Cause carried by every `FailingStore` error. It must never reach a client.
pub const STORE_FAILURE: &str = "connection to 10.0.0.9:5432 refused";

/// Store double that fails every call like an unreachable database.
pub struct FailingStore;

fn unreachable_db<T>() -> StoreResult<T> {
    Err(StoreError::Database(sqlx::Error::Protocol(
        STORE_FAILURE.to_string(),
    )))
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn ping(&self) -> StoreResult<()> {
        unreachable_db()
    }

    async fn find(&self, _: Collection, _: &Filter) -> StoreResult<Vec<Document>> {
        unreachable_db()
    }

    async fn find_one(&self, _: Collection, _: &Filter) -> StoreResult<Option<Document>> {
        unreachable_db()
    }

    async fn insert_one(&self, _: Collection, _: Document) -> StoreResult<InsertResult> {
        unreachable_db()
    }

    async fn update_one(
        &self,
        _: Collection,
        _: &Filter,
        _: Update,
        _: WriteOptions,
    ) -> StoreResult<UpdateResult> {
        unreachable_db()
    }

    async fn delete_one(&self, _: Collection, _: &Filter) -> StoreResult<DeleteResult> {
        unreachable_db()
    }

    async fn apply(&self, _: WriteBatch) -> StoreResult<Vec<WriteOutcome>> {
        unreachable_db()
    }
}

/// Router over `FailingStore`, plus keys that pass its auth gate.
pub fn spawn_failing_app() -> (Router, TokenKeys) {
    let keys = TokenKeys::new(SECRET);
    let state = AppState {
        store: Arc::new(FailingStore),
        gateway: Arc::new(FakeGateway::default()),
        tokens: keys.clone(),
    };
    (create_app(state), keys)
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub gateway: Arc<FakeGateway>,
    pub keys: TokenKeys,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(FakeGateway::default())
}

pub fn spawn_app_with(gateway: FakeGateway) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let gateway = Arc::new(gateway);
    let keys = TokenKeys::new(SECRET);
    let state = AppState {
        store: store.clone(),
        gateway: gateway.clone(),
        tokens: keys.clone(),
    };
    TestApp {
        router: create_app(state),
        store,
        gateway,
        keys,
    }
}

/// Drives one request through `router` and decodes the body; non-JSON
/// bodies come back as a JSON string.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

pub fn doc(value: Value) -> Document {
    value.as_object().cloned().expect("test document must be an object")
}

impl TestApp {
    /// A valid token for a user document carrying `email`.
    pub fn token_for(&self, email: &str, role: &str) -> String {
        self.keys
            .issue(&doc(serde_json::json!({ "email": email, "role": role })))
            .expect("token")
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        send(&self.router, method, uri, token, body).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, token, body).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }
}
