//! Миграция: создание таблицы devices.

use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m001_create_devices"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Координаты исторически целочисленные; m003 расширяет их до double.
        manager
            .create_table(
                Table::create()
                    .table(Devices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Devices::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Devices::Name).string().not_null())
                    .col(ColumnDef::new(Devices::Type).string().not_null())
                    .col(ColumnDef::new(Devices::Ip).string())
                    .col(
                        ColumnDef::new(Devices::Status)
                            .string()
                            .not_null()
                            .default("up"),
                    )
                    .col(
                        ColumnDef::new(Devices::X)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Devices::Y)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Devices::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Devices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(crate) enum Devices {
    Table,
    Id,
    Name,
    Type,
    Ip,
    Status,
    X,
    Y,
    CreatedAt,
}
