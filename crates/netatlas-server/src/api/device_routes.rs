//! Маршруты устройств: список, карточка, создание, частичное обновление,
//! обновление позиции, удаление.

use crate::api::{parse_path_id, AppState};
use crate::error::AppError;
use crate::services::device_service;
use crate::validate;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use netatlas_entities::devices::Model as Device;
use serde_json::Value;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/devices", get(list_devices).post(create_device))
        .route(
            "/devices/{id}",
            get(get_device).patch(update_device).delete(delete_device),
        )
        .route("/devices/{id}/position", patch(update_position))
}

// ── Обработчики ──────────────────────────────────────────────────────────────

/// GET /api/devices — все устройства в порядке создания.
async fn list_devices(State(state): State<AppState>) -> Result<Json<Vec<Device>>, AppError> {
    Ok(Json(device_service::list_devices(&state.db).await?))
}

/// GET /api/devices/{id} — карточка устройства.
async fn get_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Device>, AppError> {
    parse_path_id(&id)?;
    Ok(Json(device_service::get_device(&state.db, &id).await?))
}

/// POST /api/devices — создание устройства.
async fn create_device(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Device>), AppError> {
    let data = validate::device_create(&body).map_err(AppError::Validation)?;
    let device = device_service::create_device(&state.db, data).await?;
    tracing::info!("Создано устройство {} ({})", device.name, device.id);
    Ok((StatusCode::CREATED, Json(device)))
}

/// PATCH /api/devices/{id} — частичное обновление.
async fn update_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Device>, AppError> {
    parse_path_id(&id)?;
    let data = validate::device_update(&body).map_err(AppError::Validation)?;
    Ok(Json(
        device_service::update_device(&state.db, &id, data).await?,
    ))
}

/// PATCH /api/devices/{id}/position — только координаты после перетаскивания.
async fn update_position(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Device>, AppError> {
    parse_path_id(&id)?;
    let pos = validate::device_position(&body).map_err(AppError::Validation)?;
    Ok(Json(
        device_service::update_position(&state.db, &id, pos.x, pos.y).await?,
    ))
}

/// DELETE /api/devices/{id} — удаление с каскадом связей.
async fn delete_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    parse_path_id(&id)?;
    device_service::delete_device(&state.db, &id).await?;
    tracing::info!("Удалено устройство {id}");
    Ok(StatusCode::NO_CONTENT)
}
