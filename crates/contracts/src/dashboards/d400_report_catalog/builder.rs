use std::collections::{BTreeSet, HashSet};

use super::dto::CatalogView;
use crate::domain::a002_bi_report::{ReportRecord, ReportType, WorkspaceReportIndex};
use crate::domain::a003_favorite::{FavoriteSet, FavoriteToggle};

/// Собрать каталог из трёх источников.
///
/// - `index` - отчёты, опубликованные в workspace (имя -> id)
/// - `active_records` - активные отчёты из хранилища метаданных
/// - `favorite_ids` - избранное пользователя
///
/// В каталог попадает пересечение активных отчётов и workspace, id берётся из
/// workspace. Порядок категорий повторяет порядок `active_records`.
/// Избранное собирается по всем активным отчётам, даже отсутствующим в workspace.
pub fn build_catalog(
    index: &WorkspaceReportIndex,
    active_records: &[ReportRecord],
    favorite_ids: &FavoriteSet,
) -> CatalogView {
    let mut view = CatalogView::default();
    let mut included: HashSet<&str> = HashSet::new();

    for record in active_records {
        if favorite_ids.contains(&record.id) {
            view.favorite_names.insert(record.name.clone());
        }

        let Some(workspace_id) = index.get(&record.name) else {
            continue;
        };

        // Повтор имени в хранилище: первая запись выигрывает
        if !included.insert(record.name.as_str()) {
            continue;
        }

        view.name_to_id
            .insert(record.name.clone(), workspace_id.clone());

        match record.report_type {
            ReportType::Standard => view.standard_names.push(record.name.clone()),
            ReportType::Premium => view.premium_names.push(record.name.clone()),
            ReportType::Custom => view.custom_names.push(record.name.clone()),
        }
    }

    view
}

impl CatalogView {
    /// Что сделать по клику на звёздочку отчёта `name`.
    /// None, если отчёта нет в каталоге.
    pub fn favorite_toggle(&self, name: &str) -> Option<FavoriteToggle> {
        let report_id = self.report_id(name)?;
        Some(FavoriteToggle {
            report_id: report_id.to_string(),
            report_name: name.to_string(),
            make_favorite: !self.is_favorite(name),
        })
    }

    /// Новый каталог с изменённой отметкой избранного
    pub fn with_favorite(&self, name: &str, favorite: bool) -> CatalogView {
        let mut favorite_names: BTreeSet<String> = self.favorite_names.clone();
        if favorite {
            favorite_names.insert(name.to_string());
        } else {
            favorite_names.remove(name);
        }
        CatalogView {
            favorite_names,
            ..self.clone()
        }
    }
}
