use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const MAX_NOTES_LEN: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FastType {
    Religious,
    Intermittent,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastLog {
    pub id: i64,
    pub date: NaiveDate,
    pub fast_type: FastType,
    pub completed: bool,
    pub notes: Option<String>,
}

/// Body of create and update requests. Any `id` sent by the client is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastLogInput {
    pub date: NaiveDate,
    pub fast_type: FastType,
    #[serde(default)]
    pub completed: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    last_id: i64,
    logs: BTreeMap<i64, FastLog>,
}

pub type Db = Arc<RwLock<Store>>;

type HandlerError = (StatusCode, String);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/fastlogs", get(list_logs).post(create_log))
        .route(
            "/api/fastlogs/{id}",
            get(get_log).put(update_log).delete(delete_log),
        )
        .route("/api/fastlogs/{id}/complete", patch(complete_log))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn validate(input: &FastLogInput) -> Result<(), HandlerError> {
    let too_long = input
        .notes
        .as_ref()
        .is_some_and(|notes| notes.chars().count() > MAX_NOTES_LEN);
    if too_long {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("notes must be at most {MAX_NOTES_LEN} characters"),
        ));
    }
    Ok(())
}

/// Unreadable or incomplete bodies are a client error, answered as 400.
fn read_input(
    payload: Result<Json<FastLogInput>, JsonRejection>,
) -> Result<FastLogInput, HandlerError> {
    match payload {
        Ok(Json(input)) => {
            validate(&input)?;
            Ok(input)
        }
        Err(rejection @ (JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_))) => {
            Err((StatusCode::BAD_REQUEST, rejection.body_text()))
        }
        Err(rejection) => Err((rejection.status(), rejection.body_text())),
    }
}

fn not_found(id: i64) -> HandlerError {
    (StatusCode::NOT_FOUND, format!("fasting log {id} not found"))
}

/// Newest date first; same-day entries newest id first.
async fn list_logs(State(db): State<Db>) -> Json<Vec<FastLog>> {
    let store = db.read().await;
    let mut logs: Vec<FastLog> = store.logs.values().cloned().collect();
    logs.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    Json(logs)
}

async fn create_log(
    State(db): State<Db>,
    payload: Result<Json<FastLogInput>, JsonRejection>,
) -> Result<(StatusCode, Json<FastLog>), HandlerError> {
    let input = read_input(payload)?;
    let mut store = db.write().await;
    store.last_id += 1;
    let log = FastLog {
        id: store.last_id,
        date: input.date,
        fast_type: input.fast_type,
        completed: input.completed,
        notes: input.notes,
    };
    store.logs.insert(log.id, log.clone());
    info!(id = log.id, "fasting log created");
    Ok((StatusCode::CREATED, Json(log)))
}

async fn get_log(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<FastLog>, HandlerError> {
    let store = db.read().await;
    store.logs.get(&id).cloned().map(Json).ok_or_else(|| not_found(id))
}

async fn update_log(
    State(db): State<Db>,
    Path(id): Path<i64>,
    payload: Result<Json<FastLogInput>, JsonRejection>,
) -> Result<Json<FastLog>, HandlerError> {
    let input = read_input(payload)?;
    let mut store = db.write().await;
    let log = store.logs.get_mut(&id).ok_or_else(|| not_found(id))?;
    log.date = input.date;
    log.fast_type = input.fast_type;
    log.completed = input.completed;
    log.notes = input.notes;
    info!(id, "fasting log updated");
    Ok(Json(log.clone()))
}

async fn complete_log(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<FastLog>, HandlerError> {
    let mut store = db.write().await;
    let log = store.logs.get_mut(&id).ok_or_else(|| not_found(id))?;
    log.completed = true;
    info!(id, "fasting log completed");
    Ok(Json(log.clone()))
}

async fn delete_log(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HandlerError> {
    let mut store = db.write().await;
    store.logs.remove(&id).ok_or_else(|| not_found(id))?;
    info!(id, "fasting log deleted");
    Ok(StatusCode::NO_CONTENT)
}
