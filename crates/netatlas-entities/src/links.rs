//! Entity для таблицы links.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "links")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// UUID первичного ключа
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Устройство-источник
    pub from_id: String,

    /// Устройство-приёмник
    pub to_id: String,

    /// Статус: up | warn | down
    pub status: String,

    /// Подпись связи (опционально)
    pub label: Option<String>,

    /// Точка крепления на устройстве-источнике
    pub from_handle: Option<String>,

    /// Точка крепления на устройстве-приёмнике
    pub to_handle: Option<String>,

    /// Время создания (ISO-8601), задаёт стабильный порядок выдачи
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::devices::Entity",
        from = "Column::FromId",
        to = "super::devices::Column::Id",
        on_delete = "Cascade"
    )]
    FromDevice,

    #[sea_orm(
        belongs_to = "super::devices::Entity",
        from = "Column::ToId",
        to = "super::devices::Column::Id",
        on_delete = "Cascade"
    )]
    ToDevice,
}

impl ActiveModelBehavior for ActiveModel {}
