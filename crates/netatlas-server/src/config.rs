//! Конфигурация сервера инвентаря топологии.

/// Собранная конфигурация серверного процесса.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Адрес для прослушивания (например "0.0.0.0:3001")
    pub listen: String,

    /// URL подключения к БД (sqlite или postgres)
    pub db_url: String,

    /// Разрешённые CORS-origin'ы; пустой список — без ограничений
    pub allowed_origins: Vec<String>,
}

/// Разобрать список origin'ов из строки через запятую.
pub fn parse_allowed_origins(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}
