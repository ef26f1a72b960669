use serde::{Deserialize, Serialize};

/// Ответ на запуск экспорта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    /// ID сессии экспорта
    #[serde(rename = "sessionId")]
    pub session_id: String,

    /// Статус запуска
    pub status: ExportStartStatus,

    /// Сообщение
    pub message: String,
}

/// Статус запуска экспорта
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExportStartStatus {
    /// Успешно запущен
    Started,
    /// Ошибка при запуске
    Failed,
}

/// Готовый файл для скачивания в браузере
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedFile {
    #[serde(rename = "fileName")]
    pub file_name: String,

    #[serde(rename = "contentType")]
    pub content_type: String,

    /// Содержимое файла в base64
    #[serde(rename = "contentBase64")]
    pub content_base64: String,
}
