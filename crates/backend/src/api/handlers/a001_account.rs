use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_account::{Account, AccountWorkspace};

use super::{port_error_status, portal};
use crate::domain::a001_account::service;

/// GET /api/a001/accounts
pub async fn list_accounts() -> Result<Json<Vec<Account>>, StatusCode> {
    let services = portal()?;
    match service::list_accounts(services.metadata.as_ref()).await {
        Ok(accounts) => Ok(Json(accounts)),
        Err(e) => {
            tracing::error!("A001: failed to list accounts: {}", e);
            Err(port_error_status(&e))
        }
    }
}

/// GET /api/a001/accounts/:id/workspace
pub async fn get_workspace(Path(id): Path<String>) -> Result<Json<AccountWorkspace>, StatusCode> {
    let services = portal()?;
    match service::get_workspace(services.metadata.as_ref(), &id).await {
        Ok(binding) => Ok(Json(binding)),
        Err(e) => {
            tracing::error!("A001: workspace for account {} not resolved: {}", id, e);
            Err(port_error_status(&e))
        }
    }
}
