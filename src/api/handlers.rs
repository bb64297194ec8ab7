//! HTTP request handlers for the leave engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AssociateId, AssociateUpdate};

use super::request::{
    SettingUpdateRequest, StatusUpdateRequest, TimeEntryListParams, TimeEntrySubmitRequest,
    TimeOffCorrectionRequest, TimeOffListParams, TimeOffSubmitRequest,
};
use super::response::{ApiError, ApiErrorResponse, SettingResponse};
use super::state::AppState;

/// Header carrying the acting associate's id.
pub const USER_ID_HEADER: &str = "x-user-id";

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/time-off", post(submit_time_off_handler).get(list_time_off_handler))
        .route(
            "/time-off/:id",
            get(get_time_off_handler).put(correct_time_off_handler),
        )
        .route("/time-off/:id/status", put(time_off_status_handler))
        .route(
            "/time-entry",
            post(submit_time_entry_handler).get(list_time_entries_handler),
        )
        .route("/time-entry/:id", get(get_time_entry_handler))
        .route("/time-entry/:id/status", put(time_entry_status_handler))
        .route(
            "/associates/:id",
            get(get_associate_handler).put(update_associate_handler),
        )
        .route("/associates/:id/pto-balance", get(pto_balance_handler))
        .route("/settings", put(put_setting_handler))
        .route("/settings/:key", get(get_setting_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message is in the body text
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn engine_failure(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    err.into()
}

/// Reads the optional `X-User-ID` header.
fn actor_id(headers: &HeaderMap) -> Result<Option<AssociateId>, ApiErrorResponse> {
    let Some(value) = headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };
    value
        .to_str()
        .ok()
        .and_then(|raw| raw.parse::<AssociateId>().ok())
        .map(Some)
        .ok_or_else(|| {
            ApiErrorResponse::bad_request(ApiError::validation_error(
                "X-User-ID must be an integer associate id",
            ))
        })
}

/// Reads the `X-User-ID` header, failing with 403 when it is absent.
fn require_actor(headers: &HeaderMap) -> Result<AssociateId, ApiErrorResponse> {
    actor_id(headers)?.ok_or_else(|| {
        EngineError::Unauthorized {
            actor_id: None,
            message: "X-User-ID header is required".to_string(),
        }
        .into()
    })
}

/// Handler for POST /time-off.
async fn submit_time_off_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimeOffSubmitRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing time-off submission");

    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    let submission = state
        .engine()
        .submit_time_off(request.into(), Utc::now())
        .map_err(|err| engine_failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        request_id = submission.request.id,
        status = %submission.request.status,
        "Time-off submission completed"
    );
    Ok(json_response(StatusCode::CREATED, &submission))
}

/// Handler for GET /time-off.
async fn list_time_off_handler(
    State(state): State<AppState>,
    Query(params): Query<TimeOffListParams>,
) -> HandlerResult {
    let requests = state.engine().list_time_off(&params.into());
    Ok(json_response(StatusCode::OK, &requests))
}

/// Handler for GET /time-off/{id}.
async fn get_time_off_handler(State(state): State<AppState>, Path(id): Path<i64>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = state
        .engine()
        .time_off_request(id)
        .map_err(|err| engine_failure(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, &request))
}

/// Handler for PUT /time-off/{id}.
async fn correct_time_off_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    payload: Result<Json<TimeOffCorrectionRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, request_id = id, "Processing time-off correction");

    let actor = require_actor(&headers)?;
    let Json(correction) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    let updated = state
        .engine()
        .correct_time_off(actor, id, correction.into(), Utc::now())
        .map_err(|err| engine_failure(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, &updated))
}

/// Handler for PUT /time-off/{id}/status.
async fn time_off_status_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, request_id = id, "Processing time-off decision");

    let actor = require_actor(&headers)?;
    let Json(body) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    let decision = body
        .decision()
        .map_err(|err| engine_failure(correlation_id, err))?;
    let updated = state
        .engine()
        .decide_time_off(actor, id, decision, Utc::now())
        .map_err(|err| engine_failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        request_id = id,
        status = %updated.status,
        "Time-off decision completed"
    );
    Ok(json_response(StatusCode::OK, &updated))
}

/// Handler for POST /time-entry.
async fn submit_time_entry_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimeEntrySubmitRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing time entry submission");

    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    let entry = state
        .engine()
        .submit_time_entry(request.into(), Utc::now())
        .map_err(|err| engine_failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        entry_id = entry.id,
        status = %entry.status,
        "Time entry submission completed"
    );
    Ok(json_response(StatusCode::CREATED, &entry))
}

/// Handler for GET /time-entry.
async fn list_time_entries_handler(
    State(state): State<AppState>,
    Query(params): Query<TimeEntryListParams>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let query = params
        .into_query()
        .map_err(|err| engine_failure(correlation_id, err))?;
    let entries = state.engine().list_time_entries(&query);
    Ok(json_response(StatusCode::OK, &entries))
}

/// Handler for GET /time-entry/{id}.
async fn get_time_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let entry = state
        .engine()
        .time_entry(id)
        .map_err(|err| engine_failure(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, &entry))
}

/// Handler for PUT /time-entry/{id}/status.
async fn time_entry_status_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, entry_id = id, "Processing time entry decision");

    let actor = require_actor(&headers)?;
    let Json(body) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    let decision = body
        .decision()
        .map_err(|err| engine_failure(correlation_id, err))?;
    let updated = state
        .engine()
        .decide_time_entry(actor, id, decision)
        .map_err(|err| engine_failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        entry_id = id,
        status = %updated.status,
        "Time entry decision completed"
    );
    Ok(json_response(StatusCode::OK, &updated))
}

/// Handler for GET /associates/{id}.
async fn get_associate_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let associate = state
        .engine()
        .associate(AssociateId(id))
        .map_err(|err| engine_failure(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, &associate))
}

/// Handler for PUT /associates/{id}.
async fn update_associate_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    payload: Result<Json<AssociateUpdate>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, associate_id = id, "Processing profile update");

    let actor = actor_id(&headers)?;
    let Json(update) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    let associate = state
        .engine()
        .update_profile(actor, AssociateId(id), update)
        .map_err(|err| engine_failure(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, &associate))
}

/// Handler for GET /associates/{id}/pto-balance.
async fn pto_balance_handler(State(state): State<AppState>, Path(id): Path<i64>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let balance = state
        .engine()
        .pto_balance(AssociateId(id), Utc::now())
        .map_err(|err| engine_failure(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, &balance))
}

/// Handler for GET /settings/{key}.
async fn get_setting_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> HandlerResult {
    let value = state.engine().get_setting(&key);
    Ok(json_response(StatusCode::OK, &SettingResponse { key, value }))
}

/// Handler for PUT /settings.
async fn put_setting_handler(
    State(state): State<AppState>,
    payload: Result<Json<SettingUpdateRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Json(body) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    if body.key.trim().is_empty() {
        return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
            "setting key must not be empty",
        )));
    }

    state.engine().put_setting(&body.key, &body.value);
    info!(correlation_id = %correlation_id, key = %body.key, "Setting stored");
    let value = state.engine().get_setting(&body.key);
    Ok(json_response(
        StatusCode::OK,
        &SettingResponse {
            key: body.key,
            value,
        },
    ))
}
