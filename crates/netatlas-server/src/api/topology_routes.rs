//! Маршруты представления: проекция графа для канвы и счётчики инвентаря.

use crate::api::AppState;
use crate::error::AppError;
use crate::services::topology_service::{self, TopologyView};
use crate::services::{device_service, link_service};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub devices_total: u64,
    pub links_total: u64,
    pub devices_up: u64,
    pub devices_warn: u64,
    pub devices_down: u64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/topology", get(get_topology))
        .route("/stats", get(get_stats))
}

// ── Обработчики ──────────────────────────────────────────────────────────────

/// GET /api/topology — граф для канвы, пересобирается из хранилища на каждый
/// запрос.
async fn get_topology(State(state): State<AppState>) -> Result<Json<TopologyView>, AppError> {
    let devices = device_service::list_devices(&state.db).await?;
    let links = link_service::list_links(&state.db).await?;
    Ok(Json(topology_service::project(devices, links)))
}

/// GET /api/stats — счётчики инвентаря.
async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let stats = topology_service::get_stats(&state.db).await?;

    Ok(Json(StatsResponse {
        devices_total: stats.devices_total,
        links_total: stats.links_total,
        devices_up: stats.devices_up,
        devices_warn: stats.devices_warn,
        devices_down: stats.devices_down,
    }))
}
