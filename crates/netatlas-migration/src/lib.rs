//! Менеджер схемы: идемпотентное создание таблиц инвентаря и апгрейд
//! легаси-схемы. Любая ошибка здесь фатальна для запуска сервера.

pub use sea_orm_migration::prelude::*;

mod m001_create_devices;
mod m002_create_links;
mod m003_widen_coordinates;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m001_create_devices::Migration),
            Box::new(m002_create_links::Migration),
            Box::new(m003_widen_coordinates::Migration),
        ]
    }
}
