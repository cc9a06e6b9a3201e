//! Типы ошибок сервера инвентаря топологии.
//!
//! Единственная граница, на которой доменные исходы превращаются в HTTP.
//! Коды ошибок хранилища наружу не протекают: всё неожиданное — Internal
//! с generic-телом, подробности только в логе.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Описание одного провалившегося поля валидации.
#[derive(Debug, Clone, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Неверный запрос: {0}")]
    BadRequest(String),

    #[error("Ошибка валидации")]
    Validation(Vec<FieldIssue>),

    #[error("Не найдено: {0}")]
    NotFound(String),

    #[error("Конфликт: {0}")]
    Conflict(String),

    #[error("Недействительная ссылка: {0}")]
    InvalidReference(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(issues) => (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({ "error": "Ошибка валидации", "details": issues })),
            )
                .into_response(),
            AppError::BadRequest(m) | AppError::InvalidReference(m) => {
                (StatusCode::BAD_REQUEST, axum::Json(json!({ "error": m }))).into_response()
            }
            AppError::NotFound(m) => {
                (StatusCode::NOT_FOUND, axum::Json(json!({ "error": m }))).into_response()
            }
            AppError::Conflict(m) => {
                (StatusCode::CONFLICT, axum::Json(json!({ "error": m }))).into_response()
            }
            AppError::Internal(m) => {
                tracing::error!("Внутренняя ошибка: {m}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(json!({ "error": "Внутренняя ошибка сервера" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::Internal(e.to_string())
    }
}
