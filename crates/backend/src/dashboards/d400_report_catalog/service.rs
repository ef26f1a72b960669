use contracts::dashboards::d400_report_catalog::{
    build_catalog, CatalogRequest, CatalogResponse, CatalogState,
};

use crate::shared::ports::CatalogSource;

/// Собрать каталог отчётов для аккаунта и пользователя.
///
/// Индекс workspace, активные отчёты и избранное запрашиваются параллельно.
/// Ошибка любого источника даёт `CatalogState::Unavailable`.
pub async fn get_catalog(source: &dyn CatalogSource, request: CatalogRequest) -> CatalogResponse {
    let account_id = request.account_id.trim().to_string();
    if account_id.is_empty() {
        return CatalogResponse {
            account_id,
            workspace_id: None,
            catalog: CatalogState::Unavailable {
                reason: "Аккаунт не выбран".to_string(),
            },
        };
    }

    let workspace_id = match source.fetch_workspace_id(&account_id).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("D400 Catalog: workspace for account {} not resolved: {}", account_id, e);
            return CatalogResponse {
                account_id,
                workspace_id: None,
                catalog: CatalogState::Unavailable {
                    reason: format!("Workspace аккаунта не найден: {}", e),
                },
            };
        }
    };

    let loaded = tokio::try_join!(
        source.fetch_workspace_report_index(&workspace_id),
        source.fetch_active_reports(),
        source.fetch_favorite_ids(&request.user_id),
    );

    let catalog = match loaded {
        Ok((index, active, favorites)) => {
            let view = build_catalog(&index, &active, &favorites);
            tracing::info!(
                "D400 Catalog: account {} workspace {}: {} reports available, {} favorites",
                account_id,
                workspace_id,
                view.name_to_id.len(),
                view.favorite_names.len()
            );
            CatalogState::Ready { view }
        }
        Err(e) => {
            tracing::error!("D400 Catalog: failed to load sources for {}: {}", workspace_id, e);
            CatalogState::Unavailable {
                reason: format!("Не удалось загрузить каталог отчётов: {}", e),
            }
        }
    };

    CatalogResponse {
        account_id,
        workspace_id: Some(workspace_id),
        catalog,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ports::{PortError, PortResult};
    use async_trait::async_trait;
    use contracts::domain::a002_bi_report::{ReportRecord, ReportType, WorkspaceReportIndex};
    use contracts::domain::a003_favorite::FavoriteSet;

    struct FakeSource {
        fail_favorites: bool,
    }

    #[async_trait]
    impl CatalogSource for FakeSource {
        async fn fetch_workspace_id(&self, account_id: &str) -> PortResult<String> {
            match account_id {
                "acc-1" => Ok("ws-1".to_string()),
                other => Err(PortError::NotFound(other.to_string())),
            }
        }

        async fn fetch_workspace_report_index(
            &self,
            _workspace_id: &str,
        ) -> PortResult<WorkspaceReportIndex> {
            Ok([("Sales", "r1"), ("Stock", "r2"), ("Hidden", "r9")]
                .into_iter()
                .map(|(n, id)| (n.to_string(), id.to_string()))
                .collect())
        }

        async fn fetch_active_reports(&self) -> PortResult<Vec<ReportRecord>> {
            Ok(vec![
                ReportRecord::new("x1", "Sales", ReportType::Standard),
                ReportRecord::new("x2", "Stock", ReportType::Premium),
                ReportRecord::new("x3", "Archive", ReportType::Custom),
            ])
        }

        async fn fetch_favorite_ids(&self, _user_id: &str) -> PortResult<FavoriteSet> {
            if self.fail_favorites {
                return Err(PortError::Status {
                    code: 500,
                    body: "boom".into(),
                });
            }
            // Избранное хранится по id записей метаданных; x3 нет в workspace
            Ok(["x2".to_string(), "x3".to_string()].into_iter().collect())
        }
    }

    fn request(account_id: &str) -> CatalogRequest {
        CatalogRequest {
            account_id: account_id.to_string(),
            user_id: "u1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_catalog_ready() {
        let response = get_catalog(&FakeSource { fail_favorites: false }, request("acc-1")).await;

        assert_eq!(response.workspace_id.as_deref(), Some("ws-1"));
        let view = response.view().unwrap();
        assert_eq!(view.standard_names, vec!["Sales".to_string()]);
        assert_eq!(view.premium_names, vec!["Stock".to_string()]);
        assert!(view.custom_names.is_empty());
        assert_eq!(view.report_id("Sales"), Some("r1"));
        assert!(view.is_favorite("Stock"));
        // Избранный отчёт вне workspace остаётся в favorite_names, но не в меню
        assert!(view.is_favorite("Archive"));
        assert!(view.report_id("Archive").is_none());
        assert_eq!(view.available_favorites(), vec!["Stock".to_string()]);
    }

    #[tokio::test]
    async fn test_source_failure_makes_catalog_unavailable() {
        let response = get_catalog(&FakeSource { fail_favorites: true }, request("acc-1")).await;

        assert_eq!(response.workspace_id.as_deref(), Some("ws-1"));
        assert!(matches!(response.catalog, CatalogState::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_unknown_or_empty_account() {
        let source = FakeSource { fail_favorites: false };

        let response = get_catalog(&source, request("acc-404")).await;
        assert!(response.workspace_id.is_none());
        assert!(response.view().is_none());

        let response = get_catalog(&source, request("  ")).await;
        assert!(matches!(response.catalog, CatalogState::Unavailable { .. }));
    }
}
