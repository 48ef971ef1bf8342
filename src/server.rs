//! JSON HTTP server.
//!
//! Exposes ingestion, question answering, and browsing over a small JSON
//! API. All error responses share one schema:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "question must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `internal` (500).
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `POST` | `/ask` | Answer a question against the document store |
//! | `POST` | `/ingest` | Ingest one base64-encoded file |
//! | `GET`  | `/documents` | Recent document summaries |
//! | `GET`  | `/documents/{id}` | Full document + hazard record |
//! | `GET`  | `/locations` | List locations |
//! | `POST` | `/locations` | Add a location |
//! | `GET`  | `/history` | Recent QA history |
//!
//! All origins, methods, and headers are permitted (CORS) to support
//! browser-based clients.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::ask::answer_question;
use crate::config::Config;
use crate::db;
use crate::get::{get_document, list_documents};
use crate::history;
use crate::ingest::ingest_bytes;
use crate::locations;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    pool: SqlitePool,
}

/// Starts the HTTP server.
///
/// Binds to the address configured in `[server].bind` and runs until the
/// process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let pool = db::connect(&config.db.path).await?;

    let state = AppState {
        config: Arc::new(config.clone()),
        pool,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/ask", post(handle_ask))
        .route("/ingest", post(handle_ingest))
        .route("/documents", get(handle_list_documents))
        .route("/documents/{id}", get(handle_get_document))
        .route("/locations", get(handle_list_locations))
        .route("/locations", post(handle_add_location))
        .route("/history", get(handle_history))
        .layer(cors)
        .with_state(state);

    println!("SDS server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /ask ============

#[derive(Deserialize)]
struct AskRequest {
    question: String,
    location_id: Option<i64>,
    session: Option<String>,
}

async fn handle_ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if req.question.trim().is_empty() {
        return Err(bad_request("question must not be empty"));
    }

    let response = answer_question(
        &state.pool,
        &req.question,
        req.location_id,
        req.session.as_deref(),
    )
    .await
    .map_err(|e| internal(e.to_string()))?;

    Ok(Json(serde_json::json!(response)))
}

// ============ POST /ingest ============

#[derive(Deserialize)]
struct IngestRequest {
    filename: String,
    content_base64: String,
    location_id: Option<i64>,
}

async fn handle_ingest(
    State(state): State<AppState>,
    Json(req): Json<IngestRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if req.filename.trim().is_empty() {
        return Err(bad_request("filename must not be empty"));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&req.content_base64)
        .map_err(|e| bad_request(format!("invalid base64 content: {}", e)))?;

    let outcome = ingest_bytes(
        &state.pool,
        &state.config,
        &req.filename,
        &bytes,
        req.location_id,
        "api",
    )
    .await
    .map_err(|e| internal(e.to_string()))?;

    Ok(Json(serde_json::json!(outcome)))
}

// ============ GET /documents ============

#[derive(Deserialize)]
struct ListDocumentsQuery {
    location_id: Option<i64>,
    limit: Option<i64>,
}

async fn handle_list_documents(
    State(state): State<AppState>,
    Query(params): Query<ListDocumentsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let limit = params.limit.unwrap_or(50).clamp(1, 500);
    let documents = list_documents(&state.pool, params.location_id, limit)
        .await
        .map_err(|e| internal(e.to_string()))?;

    Ok(Json(serde_json::json!({ "documents": documents })))
}

// ============ GET /documents/{id} ============

async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let response = get_document(&state.pool, &id).await.map_err(|e| {
        let msg = e.to_string();
        if msg.contains("not found") {
            not_found(msg)
        } else {
            internal(msg)
        }
    })?;

    Ok(Json(serde_json::json!(response)))
}

// ============ GET /locations, POST /locations ============

async fn handle_list_locations(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let locations = locations::list_locations(&state.pool)
        .await
        .map_err(|e| internal(e.to_string()))?;

    Ok(Json(serde_json::json!({ "locations": locations })))
}

#[derive(Deserialize)]
struct AddLocationRequest {
    department: String,
    city: String,
    state: String,
    #[serde(default = "default_country")]
    country: String,
}

fn default_country() -> String {
    "United States".to_string()
}

async fn handle_add_location(
    State(state): State<AppState>,
    Json(req): Json<AddLocationRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if req.department.trim().is_empty() || req.city.trim().is_empty() || req.state.trim().is_empty()
    {
        return Err(bad_request("department, city, and state must not be empty"));
    }

    let id = locations::add_location(
        &state.pool,
        &req.department,
        &req.city,
        &req.state,
        &req.country,
    )
    .await
    .map_err(|e| internal(e.to_string()))?;

    Ok(Json(serde_json::json!({ "id": id })))
}

// ============ GET /history ============

#[derive(Deserialize)]
struct HistoryQuery {
    limit: Option<i64>,
}

async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let limit = params.limit.unwrap_or(50).clamp(1, 500);
    let entries = history::recent(&state.pool, limit)
        .await
        .map_err(|e| internal(e.to_string()))?;

    Ok(Json(serde_json::json!({ "history": entries })))
}
