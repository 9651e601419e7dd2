use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use service::records::Record;
use tracing::info;

use crate::errors::ApiError;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct UpdateOutput {
    pub status: &'static str,
    #[serde(rename = "updated entry")]
    pub updated_entry: Record,
}

#[derive(Debug, Serialize)]
pub struct DeleteOutput {
    pub status: &'static str,
    #[serde(rename = "deleted id")]
    pub deleted_id: String,
}

#[derive(Debug, Serialize)]
pub struct DataOutput {
    pub data: Record,
}

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Server is running", body = String)))]
pub async fn health(State(state): State<AppState>) -> (StatusCode, String) {
    (StatusCode::OK, format!("Server is running on http://localhost:{} \n", state.port))
}

#[utoipa::path(get, path = "/get/data", tag = "records", responses(
    (status = 200, description = "All records", body = [crate::openapi::RecordDoc]),
    (status = 404, description = "Data file missing", body = crate::openapi::ErrorDoc),
    (status = 500, description = "Unreadable data file", body = crate::openapi::ErrorDoc)
))]
pub async fn list_records(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    let records = state.records.list().await?;
    info!(count = records.len(), "list records");
    Ok(Json(records))
}

#[utoipa::path(post, path = "/add/data", tag = "records", request_body = crate::openapi::RecordDoc, responses(
    (status = 201, description = "Created", body = crate::openapi::RecordDoc),
    (status = 400, description = "Bad shape or duplicate id", body = crate::openapi::ErrorDoc),
    (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
))]
pub async fn create_record(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let created = state.records.create(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(post, path = "/update/data", tag = "records", request_body = crate::openapi::RecordPatchDoc, responses(
    (status = 200, description = "Updated", body = crate::openapi::UpdateOutputDoc),
    (status = 400, description = "Bad shape", body = crate::openapi::ErrorDoc),
    (status = 404, description = "Data file or id missing", body = crate::openapi::ErrorDoc)
))]
pub async fn update_record(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UpdateOutput>, ApiError> {
    let updated = state.records.update(&body).await?;
    Ok(Json(UpdateOutput { status: "Data updated successfully", updated_entry: updated }))
}

#[utoipa::path(post, path = "/delete/data", tag = "records", request_body = crate::openapi::RecordIdDoc, responses(
    (status = 200, description = "Deleted", body = crate::openapi::DeleteOutputDoc),
    (status = 400, description = "Missing id", body = crate::openapi::ErrorDoc),
    (status = 404, description = "Data file or id missing", body = crate::openapi::ErrorDoc)
))]
pub async fn delete_record(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DeleteOutput>, ApiError> {
    let deleted_id = state.records.delete(&body).await?;
    Ok(Json(DeleteOutput { status: "Data deleted successfully", deleted_id }))
}

#[utoipa::path(get, path = "/get/data/{id}", tag = "records",
    params(("id" = String, Path, description = "Record id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::DataOutputDoc),
        (status = 404, description = "Data file or id missing", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataOutput>, ApiError> {
    let data = state.records.get(&id).await?;
    Ok(Json(DataOutput { data }))
}
