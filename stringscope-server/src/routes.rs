use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use stringscope::search::{self, NaturalLanguageOutput, QueryOutput};
use stringscope::{FilterParams, RecordStore, StringRecord};
use tracing::{debug, info};

use crate::error::ApiError;

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct CreateStringRequest {
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NaturalLanguageParams {
    pub query: Option<String>,
}

/// Builds the application router around a shared store
///
/// The static natural-language route takes priority over `/strings/:string_value`.
pub fn router(store: Arc<RecordStore>) -> Router {
    Router::new()
        .route("/strings", post(create_string).get(list_strings))
        .route(
            "/strings/filter-by-natural-language",
            get(filter_by_natural_language),
        )
        .route(
            "/strings/:string_value",
            get(get_string).delete(delete_string),
        )
        .layer(middleware::from_fn(log_requests))
        .with_state(store)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} {} {:?}",
        method,
        path,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}

async fn create_string(
    State(store): State<Arc<RecordStore>>,
    payload: Result<Json<CreateStringRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StringRecord>)> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("Rejected request body: {}", rejection);
        ApiError::bad_request("Invalid request body")
    })?;

    let value = request
        .value
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing 'value' field"))?;

    let record = store.create(value)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Maps a rejected path segment to the JSON error body used everywhere else
fn path_value(path: Result<Path<String>, PathRejection>) -> ApiResult<String> {
    let Path(string_value) = path.map_err(|rejection| {
        debug!("Rejected path parameter: {}", rejection);
        ApiError::bad_request("Invalid string value")
    })?;
    Ok(string_value)
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    let Query(params) = query.map_err(|rejection| {
        debug!("Rejected query string: {}", rejection);
        ApiError::bad_request("Invalid query parameters")
    })?;
    Ok(params)
}

async fn get_string(
    State(store): State<Arc<RecordStore>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<StringRecord>> {
    let string_value = path_value(path)?;
    Ok(Json(store.get(&string_value)?))
}

async fn list_strings(
    State(store): State<Arc<RecordStore>>,
    query: Result<Query<FilterParams>, QueryRejection>,
) -> ApiResult<Json<QueryOutput>> {
    let filters = query_params(query)?.parse()?;
    Ok(Json(search::filter_records(&store, filters)))
}

async fn filter_by_natural_language(
    State(store): State<Arc<RecordStore>>,
    query: Result<Query<NaturalLanguageParams>, QueryRejection>,
) -> ApiResult<Json<NaturalLanguageOutput>> {
    let query = query_params(query)?
        .query
        .filter(|query| !query.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing 'query' parameter"))?;

    Ok(Json(search::filter_by_natural_language(&store, &query)?))
}

async fn delete_string(
    State(store): State<Arc<RecordStore>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let string_value = path_value(path)?;
    store.delete(&string_value)?;
    Ok(StatusCode::NO_CONTENT)
}
