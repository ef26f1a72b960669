use serde::{Deserialize, Serialize};

/// Формат выгрузки отчёта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "PPTX")]
    Pptx,
}

impl ExportFormat {
    /// Имя формата в API Power BI, оно же расширение файла
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Pptx => "PPTX",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }

    /// Имя скачиваемого файла: "<отчёт>.<ФОРМАТ>"
    pub fn file_name(&self, report_name: &str) -> String {
        format!("{}.{}", report_name, self.as_str())
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Статус задания экспорта на стороне Power BI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
    /// "Undefined" и любые неизвестные значения
    #[serde(other)]
    Unknown,
}

impl ExportStatus {
    /// Задание ещё выполняется, надо опрашивать дальше
    pub fn is_pending(&self) -> bool {
        matches!(self, ExportStatus::NotStarted | ExportStatus::Running)
    }
}
