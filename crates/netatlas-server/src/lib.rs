//! Ядро сервера инвентаря топологии NetAtlas.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod validate;


use api::AppState;
use config::ServerConfig;
use netatlas_migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::net::SocketAddr;
use tokio::sync::watch;
use tracing::info;

/// Запустить сервер инвентаря.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    // 1. Подключение к БД
    info!("Подключение к базе данных: {}", config.db_url);
    let db: DatabaseConnection = Database::connect(&config.db_url).await?;

    // 2. Автоматические миграции: сервер не поднимается над неготовым хранилищем
    info!("Выполнение миграций...");
    Migrator::up(&db, None).await?;

    // 3. Состояние приложения
    let state = AppState { db };

    // 4. Маршрутизатор
    let app = api::build_router(state, &config.allowed_origins);

    // 5. Graceful shutdown
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Получен сигнал завершения, останавливаю сервер...");
        let _ = shutdown_tx.send(true);
    });

    // 6. Запуск сервера
    let addr: SocketAddr = config.listen.parse()?;
    info!("Сервер инвентаря запущен на {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await?;

    info!("Сервер инвентаря остановлен");
    Ok(())
}
