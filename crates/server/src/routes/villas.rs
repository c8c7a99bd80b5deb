use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use service::villa::{PatchOperation, VillaTransfer};
use tracing::{debug, info};

use crate::{errors::JsonApiError, routes::{ServerState, VILLA_ROUTE}};

/// A missing body is handed to the service as absent. A body that is present
/// but does not parse is rejected here with the parser's message.
fn read_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<Option<T>, JsonApiError> {
    match payload {
        Ok(Json(v)) => Ok(Some(v)),
        Err(rej @ (JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_))) => {
            debug!(reason = %rej.body_text(), "request body did not parse");
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Bad Request", Some(rej.body_text())))
        }
        Err(rej) => {
            debug!(reason = %rej.body_text(), "request body absent");
            Ok(None)
        }
    }
}

#[utoipa::path(
    get, path = "/api/Villa", tag = "villa",
    responses(
        (status = 200, description = "All villas", body = [crate::openapi::VillaTransferDoc]),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<VillaTransfer>>, JsonApiError> {
    let list = state.villas.list().await?;
    info!(count = list.len(), "list villas");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/api/Villa/{id}", tag = "villa",
    params(("id" = i32, Path, description = "Villa ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::VillaTransferDoc),
        (status = 400, description = "Id is 0", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<VillaTransfer>, JsonApiError> {
    Ok(Json(state.villas.get_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/api/Villa", tag = "villa",
    request_body = crate::openapi::VillaTransferDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::VillaTransferDoc,
            headers(("Location" = String, description = "URL of the created villa"))),
        (status = 400, description = "Missing, invalid or duplicate villa", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Id supplied by the caller", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<VillaTransfer>, JsonRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let created = state.villas.create(read_body(payload)?).await?;
    info!(id = created.id, first_name = %created.first_name, "created villa");
    let location = format!("{VILLA_ROUTE}/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    put, path = "/api/Villa/{id}", tag = "villa",
    params(("id" = i32, Path, description = "Villa ID")),
    request_body = crate::openapi::VillaTransferDoc,
    responses(
        (status = 204, description = "Replaced"),
        (status = 400, description = "Missing body, id mismatch or invalid fields", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<VillaTransfer>, JsonRejection>,
) -> Result<StatusCode, JsonApiError> {
    state.villas.replace(id, read_body(payload)?).await?;
    info!(id, "replaced villa");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch, path = "/api/Villa/{id}", tag = "villa",
    params(("id" = i32, Path, description = "Villa ID")),
    request_body(content = [crate::openapi::PatchOperationDoc], content_type = "application/json-patch+json"),
    responses(
        (status = 204, description = "Patched"),
        (status = 400, description = "Missing document, unknown villa or validation failure", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn patch(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<Vec<PatchOperation>>, JsonRejection>,
) -> Result<StatusCode, JsonApiError> {
    state.villas.patch_partial(id, read_body(payload)?).await?;
    info!(id, "patched villa");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/Villa/{id}", tag = "villa",
    params(("id" = i32, Path, description = "Villa ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Id is 0", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.villas.delete(id).await?;
    info!(id, "deleted villa");
    Ok(StatusCode::NO_CONTENT)
}
