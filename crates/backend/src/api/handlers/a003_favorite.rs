use axum::{extract::Query, http::StatusCode, Json};
use contracts::domain::a003_favorite::{FavoriteToggleRequest, FavoriteToggleResponse};
use serde::Deserialize;

use super::{port_error_status, portal};
use crate::domain::a003_favorite::service;

#[derive(Deserialize)]
pub struct FavoritesParams {
    pub user_id: String,
}

/// GET /api/a003/favorites?user_id=...
pub async fn list_favorites(
    Query(params): Query<FavoritesParams>,
) -> Result<Json<Vec<String>>, StatusCode> {
    let services = portal()?;
    match service::list_favorites(services.metadata.as_ref(), &params.user_id).await {
        Ok(ids) => Ok(Json(ids.into_iter().collect())),
        Err(e) => {
            tracing::error!("A003: favorites of {} not loaded: {}", params.user_id, e);
            Err(port_error_status(&e))
        }
    }
}

/// POST /api/a003/favorites/toggle
pub async fn toggle_favorite(
    Json(request): Json<FavoriteToggleRequest>,
) -> Result<Json<FavoriteToggleResponse>, StatusCode> {
    if request.user_id.trim().is_empty() || request.report_id.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let services = portal()?;
    match service::toggle_favorite(services.metadata.as_ref(), &request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("A003: toggle of {} failed: {}", request.report_id, e);
            Err(port_error_status(&e))
        }
    }
}
