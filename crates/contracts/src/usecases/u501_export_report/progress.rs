use serde::{Deserialize, Serialize};

use super::format::{ExportFormat, ExportStatus};

/// Прогресс экспорта отчёта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportProgress {
    /// ID сессии
    #[serde(rename = "sessionId")]
    pub session_id: String,

    #[serde(rename = "reportName")]
    pub report_name: String,

    pub format: ExportFormat,

    /// Статус сессии
    pub status: ExportSessionStatus,

    /// Текущая попытка (с 1)
    pub attempt: u32,

    #[serde(rename = "maxAttempts")]
    pub max_attempts: u32,

    /// ID задания экспорта в Power BI для текущей попытки
    #[serde(rename = "exportId")]
    pub export_id: Option<String>,

    /// Последний полученный статус задания
    #[serde(rename = "jobStatus")]
    pub job_status: Option<ExportStatus>,

    /// Описание ошибки для завершившихся неудачно сессий
    pub error: Option<String>,

    /// Время начала
    #[serde(rename = "startedAt")]
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// Время завершения
    #[serde(rename = "completedAt")]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Статус сессии экспорта
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExportSessionStatus {
    /// Отправка задания
    Submitting,
    /// Ожидание готовности файла
    Polling,
    /// Файл готов к скачиванию
    Succeeded,
    /// Задание не удалось создать
    FailedToStart,
    /// Все попытки исчерпаны или файл не получен
    Failed,
    /// Отменено пользователем
    Cancelled,
}

impl ExportSessionStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(
            self,
            ExportSessionStatus::Submitting | ExportSessionStatus::Polling
        )
    }
}
