use contracts::domain::a003_favorite::{
    FavoriteToggle, FavoriteToggleRequest, FavoriteToggleResponse,
};

use crate::shared::api_utils::post_json;

/// POST /api/a003/favorites/toggle
pub async fn toggle_favorite(
    user_id: &str,
    toggle: &FavoriteToggle,
) -> Result<FavoriteToggleResponse, String> {
    let request = FavoriteToggleRequest {
        user_id: user_id.to_string(),
        report_id: toggle.report_id.clone(),
        favorite: toggle.make_favorite,
    };
    post_json("/api/a003/favorites/toggle", &request).await
}
