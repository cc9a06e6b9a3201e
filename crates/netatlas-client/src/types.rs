//! Типы wire-контракта API инвентаря (зеркало серверных DTO).

use serde::{Deserialize, Serialize};

// ── Строки хранилища ─────────────────────────────────────────────────────────

/// Строка устройства, как её отдаёт сервер.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub ip: Option<String>,
    pub status: String,
    pub x: f64,
    pub y: f64,
    pub created_at: String,
}

/// Строка связи.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub status: String,
    pub label: Option<String>,
    pub from_handle: Option<String>,
    pub to_handle: Option<String>,
    pub created_at: String,
}

// ── Проекция для канвы ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub ip: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub position: Position,
    pub data: NodeData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

/// Граф целиком: всегда точечная копия хранилища.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

// ── Payload'ы операций ───────────────────────────────────────────────────────

/// Создание устройства; отсутствующие поля получают умолчания на сервере.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// Частичное обновление устройства: сериализуются только заданные поля,
/// сервер трогает ровно их.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// Создание связи между двумя устройствами.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCreate {
    pub from_id: String,
    pub to_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_handle: Option<String>,
}

/// Частичное обновление связи.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_handle: Option<String>,
}

// ── Служебные ответы ─────────────────────────────────────────────────────────

/// Ответ GET /health.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub ok: bool,
    pub db: bool,
}

/// Счётчики инвентаря из GET /api/stats.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub devices_total: u64,
    pub links_total: u64,
    pub devices_up: u64,
    pub devices_warn: u64,
    pub devices_down: u64,
}
