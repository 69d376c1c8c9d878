use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use winenotesapp::api::WineApi;
use winenotesapp::model::{StoredPhoto, Wine, WineBase};
use winenotesapp::store::backend::StorageBackend;

use super::error::{ApiError, ApiResult};

/// Multipart field carrying the uploaded photo.
pub const UPLOAD_FIELD: &str = "file";

pub struct AppState<B: StorageBackend> {
    pub api: Arc<WineApi<B>>,
}

impl<B: StorageBackend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

/// Run a store operation on the blocking pool; the store does synchronous file I/O.
async fn blocking<B, T, F>(state: &AppState<B>, op: F) -> ApiResult<T>
where
    B: StorageBackend + 'static,
    T: Send + 'static,
    F: FnOnce(&WineApi<B>) -> winenotesapp::error::Result<T> + Send + 'static,
{
    let api = Arc::clone(&state.api);
    tokio::task::spawn_blocking(move || op(&api))
        .await
        .map_err(|e| ApiError::internal(format!("store task failed: {}", e)))?
        .map_err(ApiError::from)
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "message": "Wine Notes API",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn list_wines<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
) -> ApiResult<Json<Vec<Wine>>> {
    blocking(&state, |api| api.list_wines()).await.map(Json)
}

pub async fn get_wine<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Wine>> {
    blocking(&state, move |api| api.get_wine(&id))
        .await
        .map(Json)
}

pub async fn create_wine<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
    payload: Result<Json<WineBase>, JsonRejection>,
) -> ApiResult<Json<Wine>> {
    let Json(fields) = payload?;
    blocking(&state, move |api| api.create_wine(fields))
        .await
        .map(Json)
}

pub async fn update_wine<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
    payload: Result<Json<WineBase>, JsonRejection>,
) -> ApiResult<Json<Wine>> {
    let Json(fields) = payload?;
    blocking(&state, move |api| api.update_wine(&id, fields))
        .await
        .map(Json)
}

pub async fn delete_wine<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    blocking(&state, move |api| api.delete_wine(&id)).await?;
    Ok(Json(json!({ "message": "Wine deleted successfully" })))
}

pub async fn upload_photo<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
    mut multipart: Multipart,
) -> ApiResult<Json<StoredPhoto>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        return blocking(&state, move |api| api.upload_photo(&bytes, &filename))
            .await
            .map(Json);
    }
    Err(ApiError::new(
        StatusCode::UNPROCESSABLE_ENTITY,
        format!("Missing multipart field: {}", UPLOAD_FIELD),
    ))
}

pub async fn get_photo<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(filename): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let content_type = content_type_for(&filename);
    let bytes = blocking(&state, move |api| api.get_photo(&filename)).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}

fn content_type_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}
