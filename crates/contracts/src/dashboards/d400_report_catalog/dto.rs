use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::a002_bi_report::ReportType;

/// GET /api/d400/catalog?account_id=...&user_id=...
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRequest {
    pub account_id: String,
    pub user_id: String,
}

/// Каталог отчётов для меню: категории, избранное, имя -> id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogView {
    pub standard_names: Vec<String>,
    pub premium_names: Vec<String>,
    pub custom_names: Vec<String>,
    pub favorite_names: BTreeSet<String>,
    /// Только отчёты, которые одновременно активны и есть в workspace
    pub name_to_id: BTreeMap<String, String>,
}

impl CatalogView {
    pub fn is_empty(&self) -> bool {
        self.name_to_id.is_empty() && self.favorite_names.is_empty()
    }

    /// Id отчёта в workspace по имени
    pub fn report_id(&self, name: &str) -> Option<&str> {
        self.name_to_id.get(name).map(String::as_str)
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorite_names.contains(name)
    }

    pub fn names_of(&self, report_type: ReportType) -> &[String] {
        match report_type {
            ReportType::Standard => &self.standard_names,
            ReportType::Premium => &self.premium_names,
            ReportType::Custom => &self.custom_names,
        }
    }

    /// Все доступные имена в порядке категорий Standard, Premium, Custom
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.standard_names
            .iter()
            .chain(self.premium_names.iter())
            .chain(self.custom_names.iter())
    }

    /// Избранные отчёты, которые можно открыть в текущем workspace
    pub fn available_favorites(&self) -> Vec<String> {
        self.names()
            .filter(|name| self.favorite_names.contains(*name))
            .cloned()
            .collect()
    }
}

/// Состояние каталога для UI.
///
/// Если хотя бы один источник недоступен, отдаём Unavailable,
/// а не частично собранный каталог.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CatalogState {
    Ready { view: CatalogView },
    Unavailable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub account_id: String,
    pub workspace_id: Option<String>,
    pub catalog: CatalogState,
}

impl CatalogResponse {
    pub fn view(&self) -> Option<&CatalogView> {
        match &self.catalog {
            CatalogState::Ready { view } => Some(view),
            CatalogState::Unavailable { .. } => None,
        }
    }
}
