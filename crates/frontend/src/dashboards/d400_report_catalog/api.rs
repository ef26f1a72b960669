use contracts::dashboards::d400_report_catalog::CatalogResponse;

use crate::shared::api_utils::{get_json, query_string};

/// GET /api/d400/catalog?account_id=...&user_id=...
pub async fn get_catalog(account_id: &str, user_id: &str) -> Result<CatalogResponse, String> {
    let query = query_string(&[("account_id", account_id), ("user_id", user_id)]);
    get_json(&format!("/api/d400/catalog{}", query)).await
}
