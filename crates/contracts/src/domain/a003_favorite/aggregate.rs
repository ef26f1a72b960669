use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Id отчётов, отмеченных пользователем как избранные
pub type FavoriteSet = BTreeSet<String>;

/// Что нужно сделать с избранным по клику на звёздочку
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteToggle {
    pub report_id: String,
    pub report_name: String,
    /// true - добавить в избранное, false - убрать
    pub make_favorite: bool,
}

/// POST /api/a003/favorites/toggle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteToggleRequest {
    pub user_id: String,
    pub report_id: String,
    pub favorite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteToggleResponse {
    pub report_id: String,
    pub favorite: bool,
}
