//! Точка входа сервера инвентаря топологии NetAtlas.

use clap::Parser;
use netatlas_server::config::{parse_allowed_origins, ServerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "netatlas-server",
    about = "NetAtlas — редактор инвентаря сетевой топологии"
)]
struct Cli {
    /// Порт для прослушивания
    #[arg(long, default_value_t = 3001, env = "PORT")]
    port: u16,

    /// URL базы данных
    #[arg(
        long,
        default_value = "sqlite:./netatlas.db?mode=rwc",
        env = "DATABASE_URL"
    )]
    db_url: String,

    /// Разрешённые CORS-origin'ы через запятую (по умолчанию без ограничений)
    #[arg(long, env = "ALLOWED_ORIGINS")]
    allowed_origins: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Инициализация логгера
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig {
        listen: format!("0.0.0.0:{}", cli.port),
        db_url: cli.db_url,
        allowed_origins: parse_allowed_origins(cli.allowed_origins.as_deref()),
    };

    netatlas_server::run(config).await
}
