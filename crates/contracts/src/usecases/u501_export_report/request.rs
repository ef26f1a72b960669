use serde::{Deserialize, Serialize};

use super::format::ExportFormat;

/// Запрос на экспорт отчёта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(rename = "workspaceId")]
    pub workspace_id: String,

    #[serde(rename = "reportId")]
    pub report_id: String,

    /// Имя отчёта, из него строится имя скачиваемого файла
    #[serde(rename = "reportName")]
    pub report_name: String,

    pub format: ExportFormat,
}

impl ExportRequest {
    /// Проверка обязательных полей
    pub fn validate(&self) -> Result<(), String> {
        if self.workspace_id.trim().is_empty() {
            return Err("workspaceId не задан".to_string());
        }
        if self.report_id.trim().is_empty() {
            return Err("reportId не задан".to_string());
        }
        if self.report_name.trim().is_empty() {
            return Err("reportName не задан".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let mut request = ExportRequest {
            workspace_id: "ws".into(),
            report_id: "r1".into(),
            report_name: "Sales".into(),
            format: ExportFormat::Pdf,
        };
        assert!(request.validate().is_ok());

        request.report_id = "  ".into();
        assert!(request.validate().is_err());
    }
}
