//! Status endpoints
//!
//! Every route requires an admin session.

use axum::{
    Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    response::Json,
    routing::get,
};

use super::dto::{
    CreateStatusRequest, ListStatusesParams, MessageResponse, UpdateStatusRequest, required,
};
use crate::AppState;
use crate::auth::AdminUser;
use crate::data::{Document, PagedResult};
use crate::error::AppError;
use crate::metrics::{HTTP_REQUEST_DURATION_SECONDS, HTTP_REQUESTS_TOTAL};
use crate::service::StatusService;

const COLLECTION_ENDPOINT: &str = "/statuses";
const ITEM_ENDPOINT: &str = "/statuses/:id";

/// Create statuses router
pub fn statuses_router() -> Router<AppState> {
    Router::new()
        .route(
            COLLECTION_ENDPOINT,
            get(list_statuses).post(create_status),
        )
        .route(
            ITEM_ENDPOINT,
            get(get_status).put(update_status).delete(delete_status),
        )
}

fn build_status_service(state: &AppState) -> StatusService {
    StatusService::new(state.store.clone())
}

/// Count a finished request under its response status
fn record_request<T>(method: &str, endpoint: &str, result: &Result<T, AppError>) {
    let status = match result {
        Ok(_) => "200".to_string(),
        Err(error) => error.status_code().as_u16().to_string(),
    };
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status])
        .inc();
}

/// GET /statuses
pub async fn list_statuses(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    params: Result<Query<ListStatusesParams>, QueryRejection>,
) -> Result<Json<PagedResult>, AppError> {
    let _timer = HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&["GET", COLLECTION_ENDPOINT])
        .start_timer();

    let query = params
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
        .and_then(|Query(params)| params.into_query(&state.config.pagination));
    let result = match query {
        Ok(query) => build_status_service(&state).list(query).await,
        Err(error) => Err(error),
    };

    record_request("GET", COLLECTION_ENDPOINT, &result);
    result.map(Json)
}

/// GET /statuses/:id
pub async fn get_status(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let _timer = HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&["GET", ITEM_ENDPOINT])
        .start_timer();

    let result = build_status_service(&state).get(&id).await;

    record_request("GET", ITEM_ENDPOINT, &result);
    result.map(Json)
}

/// POST /statuses
pub async fn create_status(
    State(state): State<AppState>,
    AdminUser(session): AdminUser,
    Json(req): Json<CreateStatusRequest>,
) -> Result<Json<Document>, AppError> {
    let _timer = HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&["POST", COLLECTION_ENDPOINT])
        .start_timer();

    let result = async move {
        let pivot = required("pivot", req.pivot)?;
        let name = required("name", req.name)?;

        tracing::debug!(username = %session.username, %pivot, %name, "Creating status");
        build_status_service(&state).create(&pivot, &name).await
    }
    .await;

    record_request("POST", COLLECTION_ENDPOINT, &result);
    result.map(Json)
}

/// PUT /statuses/:id
///
/// Responds 200 with whatever the store returned, `null` included.
pub async fn update_status(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Option<Document>>, AppError> {
    let _timer = HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&["PUT", ITEM_ENDPOINT])
        .start_timer();

    let result = match req.into_update() {
        Ok(update) => build_status_service(&state).update(&id, update).await,
        Err(error) => Err(error),
    };

    record_request("PUT", ITEM_ENDPOINT, &result);
    result.map(Json)
}

/// DELETE /statuses/:id
pub async fn delete_status(
    State(state): State<AppState>,
    AdminUser(_session): AdminUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let _timer = HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&["DELETE", ITEM_ENDPOINT])
        .start_timer();

    let result = build_status_service(&state).delete(&id).await;

    record_request("DELETE", ITEM_ENDPOINT, &result);
    result.map(|()| Json(MessageResponse::success()))
}
