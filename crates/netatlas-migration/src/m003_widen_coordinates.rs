//! Миграция: расширение колонок координат x/y до плавающей точки.
//!
//! Легаси-схема объявляла координаты целочисленными; перетаскивание на канве
//! даёт дробные значения. Данные сохраняются (CAST целых в double).

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{DatabaseBackend, Statement};

use crate::m001_create_devices::Devices;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m003_widen_coordinates"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        match manager.get_database_backend() {
            DatabaseBackend::Sqlite => widen_sqlite(manager).await,
            _ => {
                manager
                    .alter_table(
                        Table::alter()
                            .table(Devices::Table)
                            .modify_column(
                                ColumnDef::new(Devices::X)
                                    .double()
                                    .not_null()
                                    .default(0.0),
                            )
                            .modify_column(
                                ColumnDef::new(Devices::Y)
                                    .double()
                                    .not_null()
                                    .default(0.0),
                            )
                            .to_owned(),
                    )
                    .await
            }
        }
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // Обратное сужение потеряло бы дробные координаты
        Ok(())
    }
}

/// SQLite не поддерживает ALTER COLUMN TYPE: пересобираем таблицу по
/// документированной процедуре (копия с CAST, подмена при выключенных FK).
async fn widen_sqlite(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let conn = manager.get_connection();
    let backend = manager.get_database_backend();

    let rows = conn
        .query_all(Statement::from_string(
            backend,
            "PRAGMA table_info(devices)".to_owned(),
        ))
        .await?;

    let mut integer_coords = false;
    for row in rows {
        let name: String = row.try_get("", "name")?;
        if name == "x" || name == "y" {
            let declared: String = row.try_get("", "type")?;
            if declared.eq_ignore_ascii_case("integer") {
                integer_coords = true;
            }
        }
    }

    if !integer_coords {
        return Ok(());
    }

    for sql in [
        "PRAGMA foreign_keys=OFF",
        "CREATE TABLE devices_widen (
            id TEXT NOT NULL PRIMARY KEY,
            name TEXT NOT NULL,
            type TEXT NOT NULL,
            ip TEXT,
            status TEXT NOT NULL DEFAULT 'up',
            x REAL NOT NULL DEFAULT 0,
            y REAL NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )",
        "INSERT INTO devices_widen
            SELECT id, name, type, ip, status,
                   CAST(x AS REAL), CAST(y AS REAL), created_at
            FROM devices",
        "DROP TABLE devices",
        "ALTER TABLE devices_widen RENAME TO devices",
        "PRAGMA foreign_keys=ON",
    ] {
        conn.execute(Statement::from_string(backend, sql.to_owned()))
            .await?;
    }

    Ok(())
}
