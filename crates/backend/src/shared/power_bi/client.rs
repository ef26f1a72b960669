use async_trait::async_trait;
use contracts::domain::a002_bi_report::{EmbedConfig, WorkspaceReportIndex};
use contracts::usecases::u501_export_report::{ExportFormat, ExportStatus};
use serde::de::DeserializeOwned;

use super::auth::AzureAdTokenProvider;
use super::dto::{
    index_from_reports, EmbedTokenResponse, ExportJobInfo, ExportToFileRequest,
    GenerateTokenRequest, ODataList, PowerBiReport,
};
use crate::shared::config::PowerBiConfig;
use crate::shared::ports::{EmbedProvider, ExportApi, PortError, PortResult};

/// HTTP-клиент для Power BI REST API
pub struct PowerBiApiClient {
    client: reqwest::Client,
    api_base: String,
    auth: AzureAdTokenProvider,
}

impl PowerBiApiClient {
    pub fn new(config: &PowerBiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            auth: AzureAdTokenProvider::new(client.clone(), config),
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// URL вида {api_base}/groups/{workspace}/reports/{report}/{tail}
    fn report_url(&self, workspace_id: &str, report_id: &str, tail: &str) -> String {
        let mut url = format!(
            "{}/groups/{}/reports/{}",
            self.api_base,
            urlencoding::encode(workspace_id),
            urlencoding::encode(report_id)
        );
        if !tail.is_empty() {
            url.push('/');
            url.push_str(tail);
        }
        url
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> PortResult<reqwest::Response> {
        let token = self.auth.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

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

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> PortResult<T> {
        let response = self.send(self.client.get(url)).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| PortError::Decode(format!("{}: {}", url, e)))
    }

    /// Все отчёты workspace
    pub async fn list_reports(&self, workspace_id: &str) -> PortResult<Vec<PowerBiReport>> {
        let url = format!(
            "{}/groups/{}/reports",
            self.api_base,
            urlencoding::encode(workspace_id)
        );
        tracing::info!("Power BI: GET {}", url);
        let list: ODataList<PowerBiReport> = self.get_json(&url).await?;
        Ok(list.value)
    }

    pub async fn get_report(&self, workspace_id: &str, report_id: &str) -> PortResult<PowerBiReport> {
        let url = self.report_url(workspace_id, report_id, "");
        self.get_json(&url).await
    }

    /// Embed token только на просмотр
    pub async fn generate_view_token(
        &self,
        workspace_id: &str,
        report_id: &str,
    ) -> PortResult<EmbedTokenResponse> {
        let url = self.report_url(workspace_id, report_id, "GenerateToken");
        let response = self
            .send(self.client.post(&url).json(&GenerateTokenRequest::view()))
            .await?;
        response
            .json()
            .await
            .map_err(|e| PortError::Decode(format!("{}: {}", url, e)))
    }

    pub async fn workspace_report_index(
        &self,
        workspace_id: &str,
    ) -> PortResult<WorkspaceReportIndex> {
        let reports = self.list_reports(workspace_id).await?;
        tracing::info!(
            "Power BI: workspace {} contains {} reports",
            workspace_id,
            reports.len()
        );
        Ok(index_from_reports(reports))
    }
}

#[async_trait]
impl ExportApi for PowerBiApiClient {
    async fn submit_export_job(
        &self,
        workspace_id: &str,
        report_id: &str,
        format: ExportFormat,
    ) -> PortResult<String> {
        let url = self.report_url(workspace_id, report_id, "ExportTo");
        tracing::info!("Power BI: POST {} format={}", url, format);

        let response = self
            .send(self.client.post(&url).json(&ExportToFileRequest { format }))
            .await?;
        let job: ExportJobInfo = response
            .json()
            .await
            .map_err(|e| PortError::Decode(format!("{}: {}", url, e)))?;

        Ok(job.id)
    }

    async fn check_export_status(
        &self,
        workspace_id: &str,
        report_id: &str,
        export_id: &str,
    ) -> PortResult<Option<ExportStatus>> {
        let url = self.report_url(
            workspace_id,
            report_id,
            &format!("exports/{}", urlencoding::encode(export_id)),
        );
        let job: ExportJobInfo = self.get_json(&url).await?;
        tracing::debug!(
            "Power BI: export {} status={:?} progress={:?}%",
            export_id,
            job.status,
            job.percent_complete
        );
        Ok(job.status)
    }

    async fn fetch_exported_file(
        &self,
        workspace_id: &str,
        report_id: &str,
        export_id: &str,
    ) -> PortResult<Vec<u8>> {
        let url = self.report_url(
            workspace_id,
            report_id,
            &format!("exports/{}/file", urlencoding::encode(export_id)),
        );
        let response = self.send(self.client.get(&url)).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl EmbedProvider for PowerBiApiClient {
    async fn get_embed_config(
        &self,
        workspace_id: &str,
        report_id: &str,
    ) -> PortResult<EmbedConfig> {
        let report = self.get_report(workspace_id, report_id).await?;
        let token = self.generate_view_token(workspace_id, report_id).await?;

        Ok(EmbedConfig {
            report_id: report.id,
            report_name: report.name,
            embed_url: report.embed_url,
            embed_token: token.token,
            token_expiration: token.expiration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PowerBiApiClient {
        PowerBiApiClient::new(&PowerBiConfig {
            api_base: "https://api.powerbi.com/v1.0/myorg/".into(),
            authority: "https://login.microsoftonline.com".into(),
            tenant_id: "tenant".into(),
            client_id: "client".into(),
            client_secret: "secret".into(),
            scope: "https://analysis.windows.net/powerbi/api/.default".into(),
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_report_urls() {
        let client = client();
        assert_eq!(
            client.report_url("ws 1", "r1", ""),
            "https://api.powerbi.com/v1.0/myorg/groups/ws%201/reports/r1"
        );
        assert_eq!(
            client.report_url("ws", "r1", "ExportTo"),
            "https://api.powerbi.com/v1.0/myorg/groups/ws/reports/r1/ExportTo"
        );
    }
}
