//! Ошибки клиента API инвентаря.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Транспортная ошибка HTTP (connection refused, DNS, таймаут).
    #[error("Транспортная ошибка HTTP: {0}")]
    Transport(#[from] reqwest::Error),

    /// Некорректный URL.
    #[error("Некорректный URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Сервер вернул не-2xx; message — из тела {error}.
    #[error("Ошибка API (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Не удалось разобрать тело ответа.
    #[error("Ошибка десериализации: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// true, если сущность не найдена.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status: 404, .. })
    }

    /// true, если это конфликт уникальности кортежа связи.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Api { status: 409, .. })
    }
}
