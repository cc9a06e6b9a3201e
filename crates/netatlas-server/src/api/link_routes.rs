//! Маршруты связей: список, создание, частичное обновление, удаление.

use crate::api::{parse_path_id, AppState};
use crate::error::AppError;
use crate::services::link_service;
use crate::validate;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use netatlas_entities::links::Model as Link;
use serde_json::Value;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links).post(create_link))
        .route("/links/{id}", get(get_link).patch(update_link).delete(delete_link))
}

// ── Обработчики ──────────────────────────────────────────────────────────────

/// GET /api/links — все связи в порядке создания.
async fn list_links(State(state): State<AppState>) -> Result<Json<Vec<Link>>, AppError> {
    Ok(Json(link_service::list_links(&state.db).await?))
}

/// GET /api/links/{id} — карточка связи.
async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Link>, AppError> {
    parse_path_id(&id)?;
    Ok(Json(link_service::get_link(&state.db, &id).await?))
}

/// POST /api/links — создание связи между двумя устройствами.
async fn create_link(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Link>), AppError> {
    let data = validate::link_create(&body).map_err(AppError::Validation)?;
    let link = link_service::create_link(&state.db, data).await?;
    tracing::info!("Создана связь {} -> {} ({})", link.from_id, link.to_id, link.id);
    Ok((StatusCode::CREATED, Json(link)))
}

/// PATCH /api/links/{id} — частичное обновление.
async fn update_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Link>, AppError> {
    parse_path_id(&id)?;
    let data = validate::link_update(&body).map_err(AppError::Validation)?;
    Ok(Json(link_service::update_link(&state.db, &id, data).await?))
}

/// DELETE /api/links/{id} — удаление связи.
async fn delete_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    parse_path_id(&id)?;
    link_service::delete_link(&state.db, &id).await?;
    tracing::info!("Удалена связь {id}");
    Ok(StatusCode::NO_CONTENT)
}
