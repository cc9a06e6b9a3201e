//! Сервис устройств: CRUD, обновление позиции, каскадное удаление связей.

use crate::error::AppError;
use crate::validate::{DeviceCreate, DeviceUpdate};
use chrono::Utc;
use netatlas_entities::devices::{ActiveModel, Column, Entity as DeviceEntity, Model};
use netatlas_entities::links;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

/// Список устройств в порядке создания.
pub async fn list_devices(db: &DatabaseConnection) -> Result<Vec<Model>, AppError> {
    let devices = DeviceEntity::find()
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(devices)
}

/// Получить устройство по id.
pub async fn get_device(db: &DatabaseConnection, id: &str) -> Result<Model, AppError> {
    DeviceEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Устройство не найдено: {id}")))
}

/// Создать устройство. Id и created_at назначаются при вставке и неизменяемы.
pub async fn create_device(
    db: &DatabaseConnection,
    data: DeviceCreate,
) -> Result<Model, AppError> {
    let model = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(data.name),
        device_type: Set(data.device_type.as_str().to_owned()),
        ip: Set(data.ip),
        status: Set(data.status.as_str().to_owned()),
        x: Set(data.x),
        y: Set(data.y),
        created_at: Set(Utc::now().to_rfc3339()),
    };
    Ok(model.insert(db).await?)
}

/// Частичное обновление: меняются ровно те колонки, что присутствовали в
/// запросе, — параллельные обновления разных полей не затирают друг друга.
pub async fn update_device(
    db: &DatabaseConnection,
    id: &str,
    data: DeviceUpdate,
) -> Result<Model, AppError> {
    let record = get_device(db, id).await?;
    let mut model: ActiveModel = record.into();

    if let Some(name) = data.name {
        model.name = Set(name);
    }
    if let Some(device_type) = data.device_type {
        model.device_type = Set(device_type.as_str().to_owned());
    }
    if let Some(ip) = data.ip.into_option() {
        model.ip = Set(ip);
    }
    if let Some(status) = data.status {
        model.status = Set(status.as_str().to_owned());
    }
    if let Some(x) = data.x {
        model.x = Set(x);
    }
    if let Some(y) = data.y {
        model.y = Set(y);
    }

    Ok(model.update(db).await?)
}

/// Обновить только координаты на канве.
pub async fn update_position(
    db: &DatabaseConnection,
    id: &str,
    x: f64,
    y: f64,
) -> Result<Model, AppError> {
    let record = get_device(db, id).await?;
    let mut model: ActiveModel = record.into();
    model.x = Set(x);
    model.y = Set(y);
    Ok(model.update(db).await?)
}

/// Удалить устройство. Связи, ссылающиеся на него в обе стороны, удаляются
/// явно — исход не зависит от того, применяет ли backend FK-прагмы.
pub async fn delete_device(db: &DatabaseConnection, id: &str) -> Result<(), AppError> {
    let record = get_device(db, id).await?;

    links::Entity::delete_many()
        .filter(
            Condition::any()
                .add(links::Column::FromId.eq(id))
                .add(links::Column::ToId.eq(id)),
        )
        .exec(db)
        .await?;

    let model: ActiveModel = record.into();
    model.delete(db).await?;
    Ok(())
}
