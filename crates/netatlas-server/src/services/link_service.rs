//! Сервис связей: CRUD с проверкой ссылочной целостности и уникальности
//! кортежа (from, to, from_handle, to_handle).

use crate::error::AppError;
use crate::validate::{LinkCreate, LinkUpdate, Patch};
use chrono::Utc;
use netatlas_entities::devices;
use netatlas_entities::links::{ActiveModel, Column, Entity as LinkEntity, Model};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

/// Список связей в порядке создания.
pub async fn list_links(db: &DatabaseConnection) -> Result<Vec<Model>, AppError> {
    let links = LinkEntity::find()
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(links)
}

/// Получить связь по id.
pub async fn get_link(db: &DatabaseConnection, id: &str) -> Result<Model, AppError> {
    LinkEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Связь не найдена: {id}")))
}

/// Фильтр по кортежу endpoints + handles. Отсутствующий handle трактуется как
/// равенство: NULL в уникальном индексе SQLite различен, поэтому индекс сам
/// по себе инвариант не обеспечивает.
fn tuple_condition(
    from_id: &str,
    to_id: &str,
    from_handle: Option<&str>,
    to_handle: Option<&str>,
) -> Condition {
    let mut cond = Condition::all()
        .add(Column::FromId.eq(from_id))
        .add(Column::ToId.eq(to_id));
    cond = match from_handle {
        Some(h) => cond.add(Column::FromHandle.eq(h)),
        None => cond.add(Column::FromHandle.is_null()),
    };
    match to_handle {
        Some(h) => cond.add(Column::ToHandle.eq(h)),
        None => cond.add(Column::ToHandle.is_null()),
    }
}

/// Создать связь. Оба конца должны существовать (InvalidReference), кортеж
/// endpoints/handles должен быть свободен (Conflict). Петля from == to на
/// этом уровне допустима.
pub async fn create_link(db: &DatabaseConnection, data: LinkCreate) -> Result<Model, AppError> {
    for endpoint in [&data.from_id, &data.to_id] {
        if devices::Entity::find_by_id(endpoint).one(db).await?.is_none() {
            return Err(AppError::InvalidReference(format!(
                "Устройство не существует: {endpoint}"
            )));
        }
    }

    let duplicate = LinkEntity::find()
        .filter(tuple_condition(
            &data.from_id,
            &data.to_id,
            data.from_handle.as_deref(),
            data.to_handle.as_deref(),
        ))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(AppError::Conflict(
            "Связь между этими точками крепления уже существует".into(),
        ));
    }

    let model = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        from_id: Set(data.from_id),
        to_id: Set(data.to_id),
        status: Set(data.status.as_str().to_owned()),
        label: Set(data.label),
        from_handle: Set(data.from_handle),
        to_handle: Set(data.to_handle),
        created_at: Set(Utc::now().to_rfc3339()),
    };
    Ok(model.insert(db).await?)
}

/// Частичное обновление связи. Смена пары handles перепроверяет уникальность
/// кортежа (без учёта самой записи), чтобы не отдавать наружу сырую ошибку
/// индекса.
pub async fn update_link(
    db: &DatabaseConnection,
    id: &str,
    data: LinkUpdate,
) -> Result<Model, AppError> {
    let record = get_link(db, id).await?;

    let new_from_handle = match &data.from_handle {
        Patch::Absent => record.from_handle.clone(),
        Patch::Null => None,
        Patch::Value(v) => Some(v.clone()),
    };
    let new_to_handle = match &data.to_handle {
        Patch::Absent => record.to_handle.clone(),
        Patch::Null => None,
        Patch::Value(v) => Some(v.clone()),
    };

    if new_from_handle != record.from_handle || new_to_handle != record.to_handle {
        let clash = LinkEntity::find()
            .filter(tuple_condition(
                &record.from_id,
                &record.to_id,
                new_from_handle.as_deref(),
                new_to_handle.as_deref(),
            ))
            .filter(Column::Id.ne(id))
            .one(db)
            .await?;
        if clash.is_some() {
            return Err(AppError::Conflict(
                "Связь между этими точками крепления уже существует".into(),
            ));
        }
    }

    let mut model: ActiveModel = record.into();
    if let Some(status) = data.status {
        model.status = Set(status.as_str().to_owned());
    }
    if let Some(label) = data.label.into_option() {
        model.label = Set(label);
    }
    if let Some(handle) = data.from_handle.into_option() {
        model.from_handle = Set(handle);
    }
    if let Some(handle) = data.to_handle.into_option() {
        model.to_handle = Set(handle);
    }

    Ok(model.update(db).await?)
}

/// Удалить связь по id.
pub async fn delete_link(db: &DatabaseConnection, id: &str) -> Result<(), AppError> {
    let record = get_link(db, id).await?;

    let model: ActiveModel = record.into();
    model.delete(db).await?;
    Ok(())
}
