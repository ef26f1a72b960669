use async_trait::async_trait;
use contracts::domain::a001_account::{Account, AccountWorkspace};
use contracts::domain::a002_bi_report::ReportRecord;
use contracts::domain::a003_favorite::FavoriteSet;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::shared::config::MetadataConfig;
use crate::shared::ports::{AccountDirectory, FavoritesStore, PortError, PortResult};

/// Запись избранного в сервисе метаданных
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteRecord {
    #[serde(rename = "reportId")]
    pub report_id: String,
}

/// HTTP-клиент сервиса метаданных (аккаунты, активные отчёты, избранное)
pub struct MetadataApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl MetadataApiClient {
    pub fn new(config: &MetadataConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn user_favorites_path(user_id: &str) -> String {
        format!("/users/{}/favorites", urlencoding::encode(user_id))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> PortResult<reqwest::Response> {
        let request = match &self.api_key {
            Some(key) => request.header("X-Api-Key", key),
            None => request,
        };
        let response = request.header("Accept", "application/json").send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(PortError::Auth(format!("HTTP {}: {}", status, body))),
            404 => Err(PortError::NotFound(body)),
            code => Err(PortError::Status { code, body }),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> PortResult<T> {
        let url = self.url(path);
        tracing::debug!("Metadata API: GET {}", url);
        let response = self.send(self.client.get(&url)).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| PortError::Decode(format!("{}: {}", url, e)))
    }

    /// Активные отчёты из хранилища метаданных
    pub async fn fetch_active_reports(&self) -> PortResult<Vec<ReportRecord>> {
        let records: Vec<ReportRecord> = self.get_json("/reports/active").await?;
        tracing::info!("Metadata API: {} active reports", records.len());
        Ok(records)
    }
}

#[async_trait]
impl AccountDirectory for MetadataApiClient {
    async fn fetch_accounts(&self) -> PortResult<Vec<Account>> {
        self.get_json("/accounts").await
    }

    async fn fetch_workspace_id(&self, account_id: &str) -> PortResult<String> {
        let path = format!("/accounts/{}/workspace", urlencoding::encode(account_id));
        let binding: AccountWorkspace = self.get_json(&path).await?;
        if binding.workspace_id.trim().is_empty() {
            return Err(PortError::NotFound(format!(
                "account {} has no workspace",
                account_id
            )));
        }
        Ok(binding.workspace_id)
    }
}

#[async_trait]
impl FavoritesStore for MetadataApiClient {
    async fn fetch_favorite_ids(&self, user_id: &str) -> PortResult<FavoriteSet> {
        let records: Vec<FavoriteRecord> =
            self.get_json(&Self::user_favorites_path(user_id)).await?;
        Ok(favorite_set(records))
    }

    async fn add_favorite(&self, user_id: &str, report_id: &str) -> PortResult<()> {
        let url = self.url(&Self::user_favorites_path(user_id));
        tracing::info!("Metadata API: add favorite {} for user {}", report_id, user_id);
        self.send(self.client.post(&url).json(&FavoriteRecord {
            report_id: report_id.to_string(),
        }))
        .await?;
        Ok(())
    }

    async fn remove_favorite(&self, user_id: &str, report_id: &str) -> PortResult<()> {
        let url = self.url(&format!(
            "{}/{}",
            Self::user_favorites_path(user_id),
            urlencoding::encode(report_id)
        ));
        tracing::info!("Metadata API: remove favorite {} for user {}", report_id, user_id);
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}

fn favorite_set(records: Vec<FavoriteRecord>) -> FavoriteSet {
    records
        .into_iter()
        .map(|r| r.report_id)
        .filter(|id| !id.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_records_to_set() {
        let records: Vec<FavoriteRecord> = serde_json::from_str(
            r#"[{"reportId": "r1"}, {"reportId": "r2"}, {"reportId": "r1"}, {"reportId": ""}]"#,
        )
        .unwrap();
        let set = favorite_set(records);
        assert_eq!(set.len(), 2);
        assert!(set.contains("r1"));
        assert!(set.contains("r2"));
    }

    #[test]
    fn test_paths_are_encoded() {
        assert_eq!(
            MetadataApiClient::user_favorites_path("john doe@corp"),
            "/users/john%20doe%40corp/favorites"
        );
    }
}
