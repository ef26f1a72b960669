//! Внешние сервисы, с которыми работает портал.
//!
//! Вся бизнес-логика (отчёты, избранное, экспорт) живёт в Power BI и в сервисе
//! метаданных; здесь только контракты вызовов. Реализации:
//! `shared::power_bi::PowerBiApiClient` и `shared::metadata::MetadataApiClient`.

use async_trait::async_trait;
use contracts::domain::a001_account::Account;
use contracts::domain::a002_bi_report::{EmbedConfig, ReportRecord, WorkspaceReportIndex};
use contracts::domain::a003_favorite::FavoriteSet;
use contracts::usecases::u501_export_report::{ExportFormat, ExportStatus};
use thiserror::Error;

/// Ошибки вызова внешнего сервиса
#[derive(Debug, Error)]
pub enum PortError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for PortError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PortError::Decode(err.to_string())
        } else {
            PortError::Http(err.to_string())
        }
    }
}

pub type PortResult<T> = Result<T, PortError>;

/// Источники каталога отчётов
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_workspace_id(&self, account_id: &str) -> PortResult<String>;

    async fn fetch_workspace_report_index(
        &self,
        workspace_id: &str,
    ) -> PortResult<WorkspaceReportIndex>;

    async fn fetch_active_reports(&self) -> PortResult<Vec<ReportRecord>>;

    async fn fetch_favorite_ids(&self, user_id: &str) -> PortResult<FavoriteSet>;
}

/// Аккаунты, доступные для выбора
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn fetch_accounts(&self) -> PortResult<Vec<Account>>;

    async fn fetch_workspace_id(&self, account_id: &str) -> PortResult<String>;
}

/// Хранилище избранного
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    async fn fetch_favorite_ids(&self, user_id: &str) -> PortResult<FavoriteSet>;

    async fn add_favorite(&self, user_id: &str, report_id: &str) -> PortResult<()>;

    async fn remove_favorite(&self, user_id: &str, report_id: &str) -> PortResult<()>;
}

/// API экспорта отчёта в файл
#[async_trait]
pub trait ExportApi: Send + Sync {
    /// Создать задание экспорта, вернуть его id
    async fn submit_export_job(
        &self,
        workspace_id: &str,
        report_id: &str,
        format: ExportFormat,
    ) -> PortResult<String>;

    /// Статус задания; None, если сервис не вернул статус
    async fn check_export_status(
        &self,
        workspace_id: &str,
        report_id: &str,
        export_id: &str,
    ) -> PortResult<Option<ExportStatus>>;

    async fn fetch_exported_file(
        &self,
        workspace_id: &str,
        report_id: &str,
        export_id: &str,
    ) -> PortResult<Vec<u8>>;
}

/// Данные для встраивания отчёта
#[async_trait]
pub trait EmbedProvider: Send + Sync {
    async fn get_embed_config(&self, workspace_id: &str, report_id: &str)
        -> PortResult<EmbedConfig>;
}
