//! Entity для таблицы devices.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "devices")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// UUID первичного ключа
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Отображаемое имя устройства (минимум 2 символа)
    pub name: String,

    /// Тип устройства: hub | switch | router | ap | server
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub device_type: String,

    /// IP-адрес (опционально, формат не проверяется)
    pub ip: Option<String>,

    /// Статус: up | warn | down
    pub status: String,

    /// Координата X на канве
    pub x: f64,

    /// Координата Y на канве
    pub y: f64,

    /// Время создания (ISO-8601), задаёт стабильный порядок выдачи
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
