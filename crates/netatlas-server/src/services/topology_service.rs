//! Проекция топологии: чистое преобразование строк хранилища в граф для
//! канвы (узлы + рёбра) и счётчики инвентаря. Без кэша — пересборка на
//! каждый запрос.

use crate::error::AppError;
use netatlas_entities::{devices, links};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;

/// Позиция узла на канве.
#[derive(Debug, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Отображаемые атрибуты узла.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub ip: Option<String>,
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub position: Position,
    pub data: NodeData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    pub status: String,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TopologyView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Собрать граф из полных списков. Порядок узлов и рёбер повторяет порядок
/// создания исходных записей.
pub fn project(devices: Vec<devices::Model>, links: Vec<links::Model>) -> TopologyView {
    let nodes = devices
        .into_iter()
        .map(|d| GraphNode {
            id: d.id,
            position: Position { x: d.x, y: d.y },
            data: NodeData {
                name: d.name,
                device_type: d.device_type,
                ip: d.ip,
                status: d.status,
            },
        })
        .collect();

    let edges = links
        .into_iter()
        .map(|l| GraphEdge {
            id: l.id,
            source: l.from_id,
            target: l.to_id,
            label: l.label,
            status: l.status,
            source_handle: l.from_handle,
            target_handle: l.to_handle,
        })
        .collect();

    TopologyView { nodes, edges }
}

/// Счётчики инвентаря.
pub struct Stats {
    pub devices_total: u64,
    pub links_total: u64,
    pub devices_up: u64,
    pub devices_warn: u64,
    pub devices_down: u64,
}

/// Посчитать устройства и связи (устройства — в разрезе статусов).
pub async fn get_stats(db: &DatabaseConnection) -> Result<Stats, AppError> {
    let devices_total = devices::Entity::find().count(db).await?;
    let links_total = links::Entity::find().count(db).await?;

    let mut by_status = [0u64; 3];
    for (slot, status) in by_status.iter_mut().zip(["up", "warn", "down"]) {
        *slot = devices::Entity::find()
            .filter(devices::Column::Status.eq(status))
            .count(db)
            .await?;
    }

    Ok(Stats {
        devices_total,
        links_total,
        devices_up: by_status[0],
        devices_warn: by_status[1],
        devices_down: by_status[2],
    })
}
