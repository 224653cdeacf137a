//! In-memory SendoraCity API served over a real socket.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

/// First identifier handed out by the mock.
pub const FIRST_ID: i64 = 7;

#[derive(Debug, Default)]
pub struct MockState {
    next_id: i64,
    collections: HashMap<String, BTreeMap<i64, Value>>,
    queries: Vec<(String, HashMap<String, String>)>,
    canned: HashMap<String, (StatusCode, String)>,
    requests: usize,
}

impl MockState {
    /// Canned reply registered for `path`, if any.
    fn canned(&self, path: &str) -> Option<Response> {
        self.canned
            .get(path)
            .map(|(status, body)| (*status, body.clone()).into_response())
    }
}

pub type Db = Arc<RwLock<MockState>>;

pub struct MockApi {
    pub base_uri: String,
    db: Db,
}

impl MockApi {
    pub async fn start() -> Self {
        let _ = sendoracity_provider::try_init_logging();

        let db: Db = Arc::new(RwLock::new(MockState {
            next_id: FIRST_ID,
            ..MockState::default()
        }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = app(db.clone());
        tokio::spawn(async move { axum::serve(listener, router).await });

        Self {
            base_uri: format!("http://{}", addr),
            db,
        }
    }

    /// Number of requests the mock has answered.
    pub async fn requests(&self) -> usize {
        self.db.read().await.requests
    }

    /// Query parameters of the last list call on `collection`.
    pub async fn last_query(&self, collection: &str) -> Option<HashMap<String, String>> {
        self.db
            .read()
            .await
            .queries
            .iter()
            .rev()
            .find(|(name, _)| name == collection)
            .map(|(_, query)| query.clone())
    }

    /// Answer every create or read of `path` with a fixed status and raw body.
    pub async fn respond_with(&self, path: &str, status: StatusCode, body: &str) {
        self.db
            .write()
            .await
            .canned
            .insert(path.to_string(), (status, body.to_string()));
    }

    /// Stored record, bypassing the HTTP layer.
    pub async fn record(&self, collection: &str, id: i64) -> Option<Value> {
        self.db
            .read()
            .await
            .collections
            .get(collection)
            .and_then(|records| records.get(&id))
            .cloned()
    }
}

fn app(db: Db) -> Router {
    Router::new()
        .route("/reply/{code}/{kind}", get(reply).post(reply).patch(reply).delete(reply))
        .route("/{collection}", get(list_records).post(create_record))
        .route(
            "/{collection}/{id}",
            get(get_record).patch(update_record).delete(delete_record),
        )
        .with_state(db)
}

fn matches(record: &Value, filters: &HashMap<String, String>) -> bool {
    filters.iter().all(|(key, want)| match record.get(key) {
        Some(Value::String(s)) => s == want,
        Some(other) => other.to_string() == *want,
        None => false,
    })
}

async fn list_records(
    State(db): State<Db>,
    Path(collection): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
) -> Json<Vec<Value>> {
    let mut state = db.write().await;
    state.requests += 1;
    state.queries.push((collection.clone(), filters.clone()));
    let records = state
        .collections
        .get(&collection)
        .map(|records| records.values().filter(|r| matches(r, &filters)).cloned().collect())
        .unwrap_or_default();
    Json(records)
}

async fn create_record(
    State(db): State<Db>,
    Path(collection): Path<String>,
    Json(mut input): Json<Value>,
) -> Response {
    let mut state = db.write().await;
    state.requests += 1;
    if let Some(canned) = state.canned(&collection) {
        return canned;
    }

    if let Some(city_id) = input.get("cityid").and_then(Value::as_i64) {
        let city_exists = state
            .collections
            .get("cities")
            .is_some_and(|cities| cities.contains_key(&city_id));
        if !city_exists {
            let body = json!({"errors": {"cityid": ["does not exist"]}});
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
        }
    }

    let id = state.next_id;
    state.next_id += 1;
    input["id"] = json!(id);
    state
        .collections
        .entry(collection)
        .or_default()
        .insert(id, input.clone());
    (StatusCode::CREATED, Json(input)).into_response()
}

async fn get_record(
    State(db): State<Db>,
    Path((collection, id)): Path<(String, i64)>,
) -> Response {
    let mut state = db.write().await;
    state.requests += 1;
    if let Some(canned) = state.canned(&format!("{}/{}", collection, id)) {
        return canned;
    }
    state
        .collections
        .get(&collection)
        .and_then(|records| records.get(&id))
        .cloned()
        .map(|record| Json(record).into_response())
        .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
}

async fn update_record(
    State(db): State<Db>,
    Path((collection, id)): Path<(String, i64)>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = db.write().await;
    state.requests += 1;
    let record = state
        .collections
        .get_mut(&collection)
        .and_then(|records| records.get_mut(&id))
        .ok_or(StatusCode::NOT_FOUND)?;
    if let (Some(record), Some(input)) = (record.as_object_mut(), input.as_object()) {
        for (key, value) in input {
            record.insert(key.clone(), value.clone());
        }
    }
    Ok(Json(record.clone()))
}

async fn delete_record(
    State(db): State<Db>,
    Path((collection, id)): Path<(String, i64)>,
) -> StatusCode {
    let mut state = db.write().await;
    state.requests += 1;
    match state.collections.get_mut(&collection).and_then(|r| r.remove(&id)) {
        Some(_) => StatusCode::OK,
        None => StatusCode::NOT_FOUND,
    }
}

/// Answers with an arbitrary status and a body shaped by `kind`.
async fn reply(State(db): State<Db>, Path((code, kind)): Path<(u16, String)>) -> Response {
    db.write().await.requests += 1;
    let Ok(status) = StatusCode::from_u16(code) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    match kind.as_str() {
        "envelope" => (status, Json(json!({"errors": {"name": ["can't be blank"]}}))).into_response(),
        "json" => (status, Json(json!({"message": "conflict"}))).into_response(),
        "text" => (status, "upstream exploded").into_response(),
        _ => status.into_response(),
    }
}
