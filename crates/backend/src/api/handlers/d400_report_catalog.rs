use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d400_report_catalog::{CatalogRequest, CatalogResponse};

use super::portal;
use crate::dashboards::d400_report_catalog::service;

/// GET /api/d400/catalog?account_id=...&user_id=...
pub async fn get_catalog(
    Query(request): Query<CatalogRequest>,
) -> Result<Json<CatalogResponse>, StatusCode> {
    tracing::info!(
        "D400 Catalog: building catalog for account {} user {}",
        request.account_id,
        request.user_id
    );
    let services = portal()?;
    Ok(Json(service::get_catalog(services, request).await))
}
