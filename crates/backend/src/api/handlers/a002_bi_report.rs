use axum::{extract::Query, http::StatusCode, Json};
use contracts::domain::a002_bi_report::{EmbedConfig, EmbedRequest};

use super::{port_error_status, portal};
use crate::domain::a002_bi_report::service;

/// GET /api/a002/embed?workspace_id=...&report_id=...
pub async fn get_embed_config(
    Query(request): Query<EmbedRequest>,
) -> Result<Json<EmbedConfig>, StatusCode> {
    let services = portal()?;
    match service::get_embed_config(services.power_bi.as_ref(), &request).await {
        Ok(config) => Ok(Json(config)),
        Err(e) => {
            tracing::error!(
                "A002: embed config for report {} failed: {}",
                request.report_id,
                e
            );
            Err(port_error_status(&e))
        }
    }
}
