use axum::{extract::Path, http::StatusCode, Json};
use contracts::usecases::u501_export_report::{
    ExportProgress, ExportRequest, ExportResponse, ExportStartStatus, ExportedFile,
};
use once_cell::sync::OnceCell;
use std::sync::Arc;

use super::portal;
use crate::usecases;

// ============================================================================
// UseCase u501: Export report
// ============================================================================

static EXPORT_EXECUTOR: OnceCell<Arc<usecases::u501_export_report::ExportExecutor>> =
    OnceCell::new();

fn export_executor() -> Result<&'static Arc<usecases::u501_export_report::ExportExecutor>, StatusCode>
{
    EXPORT_EXECUTOR.get_or_try_init(|| {
        let services = portal()?;
        let tracker = Arc::new(usecases::u501_export_report::ProgressTracker::new());
        Ok(Arc::new(usecases::u501_export_report::ExportExecutor::new(
            services.power_bi.clone(),
            &services.export,
            tracker,
        )))
    })
}

/// POST /api/u501/export/start
pub async fn u501_start_export(
    Json(request): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, StatusCode> {
    let executor = export_executor()?;
    match executor.start_export(request) {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to start export: {}", e);
            Ok(Json(ExportResponse {
                session_id: String::new(),
                status: ExportStartStatus::Failed,
                message: e.to_string(),
            }))
        }
    }
}

/// GET /api/u501/export/:session_id/progress
pub async fn u501_get_progress(
    Path(session_id): Path<String>,
) -> Result<Json<ExportProgress>, StatusCode> {
    match export_executor()?.get_progress(&session_id) {
        Some(progress) => Ok(Json(progress)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// GET /api/u501/export/:session_id/file
pub async fn u501_get_file(
    Path(session_id): Path<String>,
) -> Result<Json<ExportedFile>, StatusCode> {
    match export_executor()?.get_file(&session_id) {
        Some(file) => Ok(Json(file)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// POST /api/u501/export/:session_id/cancel
pub async fn u501_cancel_export(Path(session_id): Path<String>) -> StatusCode {
    match export_executor() {
        Ok(executor) if executor.cancel(&session_id) => StatusCode::ACCEPTED,
        Ok(_) => StatusCode::NOT_FOUND,
        Err(status) => status,
    }
}
