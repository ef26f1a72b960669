use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // AGGREGATES
        // ========================================
        // A001 Accounts
        .route("/api/a001/accounts", get(handlers::a001_account::list_accounts))
        .route(
            "/api/a001/accounts/:id/workspace",
            get(handlers::a001_account::get_workspace),
        )
        // A002 BI reports (embedding)
        .route(
            "/api/a002/embed",
            get(handlers::a002_bi_report::get_embed_config),
        )
        // A003 Favorites
        .route(
            "/api/a003/favorites",
            get(handlers::a003_favorite::list_favorites),
        )
        .route(
            "/api/a003/favorites/toggle",
            post(handlers::a003_favorite::toggle_favorite),
        )
        // ========================================
        // DASHBOARDS
        // ========================================
        // D400 Report catalog
        .route(
            "/api/d400/catalog",
            get(handlers::d400_report_catalog::get_catalog),
        )
        // ========================================
        // USECASES
        // ========================================
        // UseCase u501: Export report
        .route(
            "/api/u501/export/start",
            post(handlers::usecases::u501_start_export),
        )
        .route(
            "/api/u501/export/:session_id/progress",
            get(handlers::usecases::u501_get_progress),
        )
        .route(
            "/api/u501/export/:session_id/file",
            get(handlers::usecases::u501_get_file),
        )
        .route(
            "/api/u501/export/:session_id/cancel",
            post(handlers::usecases::u501_cancel_export),
        )
}
