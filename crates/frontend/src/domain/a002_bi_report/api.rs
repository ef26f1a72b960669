use contracts::domain::a002_bi_report::EmbedConfig;

use crate::shared::api_utils::{get_json, query_string};

/// GET /api/a002/embed
pub async fn get_embed_config(workspace_id: &str, report_id: &str) -> Result<EmbedConfig, String> {
    let query = query_string(&[("workspace_id", workspace_id), ("report_id", report_id)]);
    get_json(&format!("/api/a002/embed{}", query)).await
}
