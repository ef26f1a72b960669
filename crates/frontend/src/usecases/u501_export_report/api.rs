use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_export_report::{
    ExportProgress, ExportReport, ExportRequest, ExportResponse, ExportedFile,
};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, get_json, post_json};

/// API клиент для UseCase u501
pub async fn start_export(request: &ExportRequest) -> Result<ExportResponse, String> {
    post_json(&format!("{}/export/start", ExportReport::api_prefix()), request).await
}

/// Получить прогресс экспорта
pub async fn get_progress(session_id: &str) -> Result<ExportProgress, String> {
    get_json(&format!("{}/export/{}/progress", ExportReport::api_prefix(), session_id)).await
}

/// Готовый файл (base64)
pub async fn get_file(session_id: &str) -> Result<ExportedFile, String> {
    get_json(&format!("{}/export/{}/file", ExportReport::api_prefix(), session_id)).await
}

pub async fn cancel_export(session_id: &str) -> Result<(), String> {
    let url = api_url(&format!(
        "{}/export/{}/cancel",
        ExportReport::api_prefix(),
        session_id
    ));
    let response = Request::post(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    if response.ok() {
        Ok(())
    } else {
        Err(format!("HTTP error: {}", response.status()))
    }
}
