use serde::{Deserialize, Serialize};

/// Запрос данных для встраивания отчёта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedRequest {
    pub workspace_id: String,
    pub report_id: String,
}

/// Всё, что нужно виджету Power BI для отображения отчёта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedConfig {
    #[serde(rename = "reportId")]
    pub report_id: String,

    #[serde(rename = "reportName")]
    pub report_name: String,

    #[serde(rename = "embedUrl")]
    pub embed_url: String,

    /// Короткоживущий embed token (только просмотр)
    #[serde(rename = "embedToken")]
    pub embed_token: String,

    #[serde(rename = "tokenExpiration")]
    pub token_expiration: Option<chrono::DateTime<chrono::Utc>>,
}

impl EmbedConfig {
    /// Без URL или токена встраивать нечего
    pub fn is_embeddable(&self) -> bool {
        !self.embed_url.is_empty() && !self.embed_token.is_empty()
    }
}
