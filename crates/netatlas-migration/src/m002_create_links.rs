//! Миграция: создание таблицы links с каскадными внешними ключами и
//! уникальным составным индексом по кортежу (from, to, from_handle, to_handle).

use sea_orm_migration::prelude::*;

use crate::m001_create_devices::Devices;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m002_create_links"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Links::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Links::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Links::FromId).string().not_null())
                    .col(ColumnDef::new(Links::ToId).string().not_null())
                    .col(
                        ColumnDef::new(Links::Status)
                            .string()
                            .not_null()
                            .default("up"),
                    )
                    .col(ColumnDef::new(Links::Label).string())
                    .col(ColumnDef::new(Links::FromHandle).string())
                    .col(ColumnDef::new(Links::ToHandle).string())
                    .col(ColumnDef::new(Links::CreatedAt).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_links_from_device")
                            .from(Links::Table, Links::FromId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_links_to_device")
                            .from(Links::Table, Links::ToId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Один и тот же кортеж (endpoints + handles) не может быть связан дважды
        manager
            .create_index(
                Index::create()
                    .table(Links::Table)
                    .col(Links::FromId)
                    .col(Links::ToId)
                    .col(Links::FromHandle)
                    .col(Links::ToHandle)
                    .name("idx_links_endpoints_handles")
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Links::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Links {
    Table,
    Id,
    FromId,
    ToId,
    Status,
    Label,
    FromHandle,
    ToHandle,
    CreatedAt,
}
