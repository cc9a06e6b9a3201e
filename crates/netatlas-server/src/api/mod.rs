//! HTTP API: маршрутизация и состояние приложения.

pub mod device_routes;
pub mod link_routes;
pub mod topology_routes;

use crate::error::AppError;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Общее состояние приложения: долгоживущий handle хранилища, созданный один
/// раз на старте и разделяемый по ссылке на всё время жизни процесса.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Построить маршрутизатор Axum. API живёт под /api, health — в корне.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let api = Router::new()
        .merge(device_routes::routes())
        .merge(link_routes::routes())
        .merge(topology_routes::routes());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS: явный список origin'ов или без ограничений по умолчанию.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

/// Проверка формата идентификатора из пути запроса.
pub(crate) fn parse_path_id(id: &str) -> Result<(), AppError> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| AppError::BadRequest(format!("Некорректный идентификатор: {id}")))
}

/// GET /health — проверка работоспособности сервера и хранилища.
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_ok = state.db.execute_unprepared("SELECT 1").await.is_ok();
    Json(serde_json::json!({ "ok": true, "db": db_ok }))
}
