//! Слой валидации: по одному валидатору на пару (сущность, операция).
//!
//! Валидаторы работают по `serde_json::Value`, чтобы собирать все проблемы
//! полей разом — список [`FieldIssue`] уходит в тело 400 как есть.
//! Неизвестные поля молча игнорируются; исключение — обновление позиции,
//! принимающее ровно {x, y}.

use serde_json::Value;
use uuid::Uuid;

use crate::error::FieldIssue;

// ── Закрытые перечисления ────────────────────────────────────────────────────

/// Тип устройства.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Hub,
    Switch,
    Router,
    Ap,
    Server,
}

impl DeviceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Hub => "hub",
            DeviceType::Switch => "switch",
            DeviceType::Router => "router",
            DeviceType::Ap => "ap",
            DeviceType::Server => "server",
        }
    }
}

impl std::str::FromStr for DeviceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hub" => Ok(DeviceType::Hub),
            "switch" => Ok(DeviceType::Switch),
            "router" => Ok(DeviceType::Router),
            "ap" => Ok(DeviceType::Ap),
            "server" => Ok(DeviceType::Server),
            other => Err(format!(
                "недопустимый тип: {other}. Допустимые: hub, switch, router, ap, server"
            )),
        }
    }
}

/// Статус устройства или связи.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityStatus {
    Up,
    Warn,
    Down,
}

impl EntityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityStatus::Up => "up",
            EntityStatus::Warn => "warn",
            EntityStatus::Down => "down",
        }
    }
}

impl std::str::FromStr for EntityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(EntityStatus::Up),
            "warn" => Ok(EntityStatus::Warn),
            "down" => Ok(EntityStatus::Down),
            other => Err(format!(
                "недопустимый статус: {other}. Допустимые: up, warn, down"
            )),
        }
    }
}

/// Частичное текстовое поле: отличает отсутствие ключа от явного null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// Absent → None; Null → Some(None); Value(v) → Some(Some(v)).
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Patch::Absent => None,
            Patch::Null => Some(None),
            Patch::Value(v) => Some(Some(v)),
        }
    }
}

// ── Провалидированные формы запросов ─────────────────────────────────────────

#[derive(Debug)]
pub struct DeviceCreate {
    pub name: String,
    pub device_type: DeviceType,
    pub ip: Option<String>,
    pub status: EntityStatus,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Default)]
pub struct DeviceUpdate {
    pub name: Option<String>,
    pub device_type: Option<DeviceType>,
    pub ip: Patch<String>,
    pub status: Option<EntityStatus>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl DeviceUpdate {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.device_type.is_none()
            && self.ip.is_absent()
            && self.status.is_none()
            && self.x.is_none()
            && self.y.is_none()
    }
}

#[derive(Debug)]
pub struct PositionUpdate {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug)]
pub struct LinkCreate {
    pub from_id: String,
    pub to_id: String,
    pub status: EntityStatus,
    pub label: Option<String>,
    pub from_handle: Option<String>,
    pub to_handle: Option<String>,
}

#[derive(Debug, Default)]
pub struct LinkUpdate {
    pub status: Option<EntityStatus>,
    pub label: Patch<String>,
    pub from_handle: Patch<String>,
    pub to_handle: Patch<String>,
}

impl LinkUpdate {
    fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.label.is_absent()
            && self.from_handle.is_absent()
            && self.to_handle.is_absent()
    }
}

// ── Извлечение полей ─────────────────────────────────────────────────────────

fn opt_string(body: &Value, key: &str, issues: &mut Vec<FieldIssue>) -> Option<String> {
    match body.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            issues.push(FieldIssue::new(key, "ожидалась строка"));
            None
        }
    }
}

fn opt_number(body: &Value, key: &str, issues: &mut Vec<FieldIssue>) -> Option<f64> {
    match body.get(key) {
        None | Some(Value::Null) => None,
        Some(v) => match v.as_f64() {
            Some(n) => Some(n),
            None => {
                issues.push(FieldIssue::new(key, "ожидалось число"));
                None
            }
        },
    }
}

fn opt_status(body: &Value, key: &str, issues: &mut Vec<FieldIssue>) -> Option<EntityStatus> {
    match opt_string(body, key, issues) {
        Some(s) => match s.parse() {
            Ok(status) => Some(status),
            Err(e) => {
                issues.push(FieldIssue::new(key, e));
                None
            }
        },
        None => None,
    }
}

fn patch_string(body: &Value, key: &str, issues: &mut Vec<FieldIssue>) -> Patch<String> {
    match body.get(key) {
        None => Patch::Absent,
        Some(Value::Null) => Patch::Null,
        Some(Value::String(s)) => Patch::Value(s.clone()),
        Some(_) => {
            issues.push(FieldIssue::new(key, "ожидалась строка или null"));
            Patch::Absent
        }
    }
}

/// Обязательный идентификатор устройства в формате UUID.
fn required_device_id(body: &Value, key: &str, issues: &mut Vec<FieldIssue>) -> Option<String> {
    match body.get(key) {
        Some(Value::String(s)) => {
            if Uuid::parse_str(s).is_ok() {
                Some(s.clone())
            } else {
                issues.push(FieldIssue::new(key, "ожидался идентификатор устройства"));
                None
            }
        }
        None | Some(Value::Null) => {
            issues.push(FieldIssue::new(key, "обязательное поле"));
            None
        }
        Some(_) => {
            issues.push(FieldIssue::new(key, "ожидалась строка"));
            None
        }
    }
}

fn require_object<'a>(
    body: &'a Value,
) -> Result<&'a serde_json::Map<String, Value>, Vec<FieldIssue>> {
    body.as_object()
        .ok_or_else(|| vec![FieldIssue::new("body", "ожидался JSON-объект")])
}

// ── Валидаторы ───────────────────────────────────────────────────────────────

/// Device-create: name (≥2 символов) и type обязательны; остальное — с умолчаниями.
pub fn device_create(body: &Value) -> Result<DeviceCreate, Vec<FieldIssue>> {
    require_object(body)?;
    let mut issues = Vec::new();

    let name = match body.get("name") {
        Some(Value::String(s)) if s.chars().count() >= 2 => Some(s.clone()),
        Some(Value::String(_)) => {
            issues.push(FieldIssue::new("name", "минимум 2 символа"));
            None
        }
        None | Some(Value::Null) => {
            issues.push(FieldIssue::new("name", "обязательное поле"));
            None
        }
        Some(_) => {
            issues.push(FieldIssue::new("name", "ожидалась строка"));
            None
        }
    };

    let device_type = match body.get("type") {
        Some(Value::String(s)) => match s.parse::<DeviceType>() {
            Ok(t) => Some(t),
            Err(e) => {
                issues.push(FieldIssue::new("type", e));
                None
            }
        },
        None | Some(Value::Null) => {
            issues.push(FieldIssue::new("type", "обязательное поле"));
            None
        }
        Some(_) => {
            issues.push(FieldIssue::new("type", "ожидалась строка"));
            None
        }
    };

    let ip = opt_string(body, "ip", &mut issues);
    let status = match body.get("status") {
        None | Some(Value::Null) => Some(EntityStatus::Up),
        _ => opt_status(body, "status", &mut issues),
    };
    let x = opt_number(body, "x", &mut issues).unwrap_or(0.0);
    let y = opt_number(body, "y", &mut issues).unwrap_or(0.0);

    match (name, device_type, status) {
        (Some(name), Some(device_type), Some(status)) if issues.is_empty() => Ok(DeviceCreate {
            name,
            device_type,
            ip,
            status,
            x,
            y,
        }),
        _ => Err(issues),
    }
}

/// Device-update: все поля опциональны, но хотя бы одно известное должно присутствовать.
pub fn device_update(body: &Value) -> Result<DeviceUpdate, Vec<FieldIssue>> {
    require_object(body)?;
    let mut issues = Vec::new();

    let name = match body.get("name") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.chars().count() >= 2 => Some(s.clone()),
        Some(Value::String(_)) => {
            issues.push(FieldIssue::new("name", "минимум 2 символа"));
            None
        }
        Some(_) => {
            issues.push(FieldIssue::new("name", "ожидалась строка"));
            None
        }
    };

    let device_type = match opt_string(body, "type", &mut issues) {
        Some(s) => match s.parse::<DeviceType>() {
            Ok(t) => Some(t),
            Err(e) => {
                issues.push(FieldIssue::new("type", e));
                None
            }
        },
        None => None,
    };

    let update = DeviceUpdate {
        name,
        device_type,
        ip: patch_string(body, "ip", &mut issues),
        status: opt_status(body, "status", &mut issues),
        x: opt_number(body, "x", &mut issues),
        y: opt_number(body, "y", &mut issues),
    };

    if !issues.is_empty() {
        return Err(issues);
    }
    if update.is_empty() {
        return Err(vec![FieldIssue::new(
            "body",
            "нет ни одного известного поля для обновления",
        )]);
    }
    Ok(update)
}

/// Device-position: ровно {x, y}, оба — числа; лишние поля отклоняются.
pub fn device_position(body: &Value) -> Result<PositionUpdate, Vec<FieldIssue>> {
    let obj = require_object(body)?;
    let mut issues = Vec::new();

    for key in obj.keys() {
        if key != "x" && key != "y" {
            issues.push(FieldIssue::new(key.as_str(), "неожиданное поле"));
        }
    }

    let x = match opt_number(body, "x", &mut issues) {
        Some(n) => Some(n),
        None => {
            if body.get("x").is_none() || body.get("x") == Some(&Value::Null) {
                issues.push(FieldIssue::new("x", "обязательное поле"));
            }
            None
        }
    };
    let y = match opt_number(body, "y", &mut issues) {
        Some(n) => Some(n),
        None => {
            if body.get("y").is_none() || body.get("y") == Some(&Value::Null) {
                issues.push(FieldIssue::new("y", "обязательное поле"));
            }
            None
        }
    };

    match (x, y) {
        (Some(x), Some(y)) if issues.is_empty() => Ok(PositionUpdate { x, y }),
        _ => Err(issues),
    }
}

/// Link-create: fromId и toId обязательны (формат идентификатора устройства).
pub fn link_create(body: &Value) -> Result<LinkCreate, Vec<FieldIssue>> {
    require_object(body)?;
    let mut issues = Vec::new();

    let from_id = required_device_id(body, "fromId", &mut issues);
    let to_id = required_device_id(body, "toId", &mut issues);
    let status = match body.get("status") {
        None | Some(Value::Null) => Some(EntityStatus::Up),
        _ => opt_status(body, "status", &mut issues),
    };
    let label = opt_string(body, "label", &mut issues);
    let from_handle = opt_string(body, "fromHandle", &mut issues);
    let to_handle = opt_string(body, "toHandle", &mut issues);

    match (from_id, to_id, status) {
        (Some(from_id), Some(to_id), Some(status)) if issues.is_empty() => Ok(LinkCreate {
            from_id,
            to_id,
            status,
            label,
            from_handle,
            to_handle,
        }),
        _ => Err(issues),
    }
}

/// Link-update: опциональные {status, label, fromHandle, toHandle}, минимум одно.
pub fn link_update(body: &Value) -> Result<LinkUpdate, Vec<FieldIssue>> {
    require_object(body)?;
    let mut issues = Vec::new();

    let update = LinkUpdate {
        status: opt_status(body, "status", &mut issues),
        label: patch_string(body, "label", &mut issues),
        from_handle: patch_string(body, "fromHandle", &mut issues),
        to_handle: patch_string(body, "toHandle", &mut issues),
    };

    if !issues.is_empty() {
        return Err(issues);
    }
    if update.is_empty() {
        return Err(vec![FieldIssue::new(
            "body",
            "нет ни одного известного поля для обновления",
        )]);
    }
    Ok(update)
}
