use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::routing::get;
use logbook_core::error::LogbookError;
use logbook_core::model::{LogRecord, NewLogRecord};
use logbook_store::Store;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;

use crate::error::ApiError;
use crate::params::LogsQueryParams;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

pub fn router(store: Store) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);
    Router::new()
        .route(
            "/logs",
            get(get_logs).post(post_log).fallback(method_not_allowed),
        )
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
                .on_response(tower_http::trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(AppState { store })
}

async fn get_logs(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<LogRecord>>, ApiError> {
    let criteria = LogsQueryParams::from_pairs(pairs).into_criteria();
    let store = state.store.clone();
    let logs = tokio::task::spawn_blocking(move || store.fetch_logs(&criteria))
        .await
        .map_err(join_error)
        .and_then(|res| res)
        .map_err(ApiError::from_fetch)?;
    tracing::debug!(count = logs.len(), "logs fetched");
    Ok(Json(logs))
}

async fn post_log(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<LogRecord>), ApiError> {
    let record = decode_first(&body).map_err(ApiError::from_write)?;
    let store = state.store.clone();
    let saved = tokio::task::spawn_blocking(move || store.save_log(record))
        .await
        .map_err(join_error)
        .and_then(|res| res)
        .map_err(ApiError::from_write)?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// Decodes the first JSON value of the body; anything after it is ignored.
fn decode_first(body: &[u8]) -> Result<NewLogRecord, LogbookError> {
    match serde_json::Deserializer::from_slice(body)
        .into_iter::<NewLogRecord>()
        .next()
    {
        Some(Ok(record)) => Ok(record),
        Some(Err(e)) => Err(LogbookError::Decode(e.to_string())),
        None => Err(LogbookError::Decode("empty body".to_string())),
    }
}

fn join_error(err: tokio::task::JoinError) -> LogbookError {
    LogbookError::Internal(format!("store task failed: {err}"))
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
