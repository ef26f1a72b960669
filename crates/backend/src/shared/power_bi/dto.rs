//! JSON-модели Power BI REST API (только используемые поля)

use contracts::domain::a002_bi_report::WorkspaceReportIndex;
use contracts::usecases::u501_export_report::{ExportFormat, ExportStatus};
use serde::{Deserialize, Serialize};

/// Ответ AAD на client_credentials
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Время жизни в секундах
    pub expires_in: i64,
}

/// Обёртка списков Power BI: {"value": [...]}
#[derive(Debug, Clone, Deserialize)]
pub struct ODataList<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// Отчёт в workspace
#[derive(Debug, Clone, Deserialize)]
pub struct PowerBiReport {
    pub id: String,
    pub name: String,
    #[serde(rename = "embedUrl", default)]
    pub embed_url: String,
}

/// Тело POST .../ExportTo
#[derive(Debug, Clone, Serialize)]
pub struct ExportToFileRequest {
    pub format: ExportFormat,
}

/// Задание экспорта (ответ ExportTo и GET .../exports/{id})
#[derive(Debug, Clone, Deserialize)]
pub struct ExportJobInfo {
    pub id: String,
    #[serde(default)]
    pub status: Option<ExportStatus>,
    #[serde(rename = "percentComplete", default)]
    pub percent_complete: Option<i32>,
}

/// Тело POST .../GenerateToken
#[derive(Debug, Clone, Serialize)]
pub struct GenerateTokenRequest {
    #[serde(rename = "accessLevel")]
    pub access_level: String,
}

impl GenerateTokenRequest {
    pub fn view() -> Self {
        Self {
            access_level: "View".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbedTokenResponse {
    pub token: String,
    #[serde(default)]
    pub expiration: Option<chrono::DateTime<chrono::Utc>>,
}

/// Индекс имя -> id; при совпадении имён берётся первый отчёт
pub fn index_from_reports(reports: Vec<PowerBiReport>) -> WorkspaceReportIndex {
    let mut index = WorkspaceReportIndex::new();
    for report in reports {
        index.entry(report.name).or_insert(report.id);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_list_to_index() {
        let list: ODataList<PowerBiReport> = serde_json::from_str(
            r#"{
                "@odata.context": "http://wabi/v1.0/myorg/groups/ws/$metadata#reports",
                "value": [
                    {"id": "a1", "name": "Sales", "embedUrl": "https://app.powerbi.com/reportEmbed?reportId=a1", "datasetId": "d"},
                    {"id": "b2", "name": "Stock"},
                    {"id": "c3", "name": "Sales"}
                ]
            }"#,
        )
        .unwrap();

        let index = index_from_reports(list.value);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("Sales").map(String::as_str), Some("a1"));
        assert_eq!(index.get("Stock").map(String::as_str), Some("b2"));
    }

    #[test]
    fn test_export_job_status_parsing() {
        let job: ExportJobInfo = serde_json::from_str(
            r#"{"id": "E1", "status": "Running", "percentComplete": 40, "reportId": "r"}"#,
        )
        .unwrap();
        assert_eq!(job.status, Some(ExportStatus::Running));
        assert_eq!(job.percent_complete, Some(40));

        let job: ExportJobInfo =
            serde_json::from_str(r#"{"id": "E1", "status": null}"#).unwrap();
        assert_eq!(job.status, None);

        let job: ExportJobInfo =
            serde_json::from_str(r#"{"id": "E1", "status": "Undefined"}"#).unwrap();
        assert_eq!(job.status, Some(ExportStatus::Unknown));
    }

    #[test]
    fn test_export_request_body() {
        let body = serde_json::to_string(&ExportToFileRequest {
            format: ExportFormat::Pptx,
        })
        .unwrap();
        assert_eq!(body, r#"{"format":"PPTX"}"#);
    }
}
