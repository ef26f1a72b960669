use async_trait::async_trait;
use contracts::domain::a002_bi_report::{ReportRecord, WorkspaceReportIndex};
use contracts::domain::a003_favorite::FavoriteSet;
use once_cell::sync::OnceCell;
use std::sync::Arc;

use super::config::{Config, ExportConfig};
use super::metadata::MetadataApiClient;
use super::ports::{AccountDirectory, CatalogSource, FavoritesStore, PortResult};
use super::power_bi::PowerBiApiClient;

static SERVICES: OnceCell<PortalServices> = OnceCell::new();

/// Клиенты внешних сервисов, общие для всех обработчиков
pub struct PortalServices {
    pub power_bi: Arc<PowerBiApiClient>,
    pub metadata: Arc<MetadataApiClient>,
    pub export: ExportConfig,
}

impl PortalServices {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            power_bi: Arc::new(PowerBiApiClient::new(&config.power_bi)?),
            metadata: Arc::new(MetadataApiClient::new(&config.metadata)?),
            export: config.export.clone(),
        })
    }
}

pub fn initialize(config: &Config) -> anyhow::Result<()> {
    let services = PortalServices::from_config(config)?;
    SERVICES
        .set(services)
        .map_err(|_| anyhow::anyhow!("Portal services already initialized"))?;
    tracing::info!(
        "Portal services initialized (Power BI: {}, metadata: {})",
        config.power_bi.api_base,
        config.metadata.base_url
    );
    Ok(())
}

pub fn get() -> anyhow::Result<&'static PortalServices> {
    SERVICES
        .get()
        .ok_or_else(|| anyhow::anyhow!("Portal services are not initialized"))
}

/// Каталог собирается из двух сервисов: индекс отчётов берётся из Power BI,
/// остальное из сервиса метаданных
#[async_trait]
impl CatalogSource for PortalServices {
    async fn fetch_workspace_id(&self, account_id: &str) -> PortResult<String> {
        AccountDirectory::fetch_workspace_id(self.metadata.as_ref(), account_id).await
    }

    async fn fetch_workspace_report_index(
        &self,
        workspace_id: &str,
    ) -> PortResult<WorkspaceReportIndex> {
        self.power_bi.workspace_report_index(workspace_id).await
    }

    async fn fetch_active_reports(&self) -> PortResult<Vec<ReportRecord>> {
        self.metadata.fetch_active_reports().await
    }

    async fn fetch_favorite_ids(&self, user_id: &str) -> PortResult<FavoriteSet> {
        FavoritesStore::fetch_favorite_ids(self.metadata.as_ref(), user_id).await
    }
}
