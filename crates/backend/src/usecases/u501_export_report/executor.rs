use super::poller::{DownloadedFile, ExportError, ExportJobPoller, ExportTarget, PollerSettings};
use super::progress_tracker::{ProgressTracker, TrackerSink};
use crate::shared::config::ExportConfig;
use crate::shared::ports::ExportApi;
use anyhow::Result;
use base64::Engine;
use contracts::usecases::u501_export_report::{
    ExportProgress, ExportRequest, ExportResponse, ExportSessionStatus, ExportStartStatus,
    ExportedFile,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Executor для UseCase экспорта отчёта
pub struct ExportExecutor {
    api: Arc<dyn ExportApi>,
    settings: PollerSettings,
    retention_hours: i64,
    progress_tracker: Arc<ProgressTracker>,
}

impl ExportExecutor {
    pub fn new(
        api: Arc<dyn ExportApi>,
        config: &ExportConfig,
        progress_tracker: Arc<ProgressTracker>,
    ) -> Self {
        Self {
            api,
            settings: PollerSettings::from(config),
            retention_hours: config.session_retention_hours,
            progress_tracker,
        }
    }

    /// Запустить экспорт (создаёт async task и возвращает session_id)
    pub fn start_export(&self, request: ExportRequest) -> Result<ExportResponse> {
        request.validate().map_err(|e| anyhow::anyhow!(e))?;
        tracing::info!(
            "Starting export of report {} ({}) as {}",
            request.report_name,
            request.report_id,
            request.format
        );

        self.progress_tracker
            .cleanup_old_sessions(self.retention_hours);

        let session_id = Uuid::new_v4().to_string();
        let target = ExportTarget::from(&request);
        let cancel = CancellationToken::new();
        self.progress_tracker.create_session(
            session_id.clone(),
            &target,
            self.settings.max_attempts,
            cancel.clone(),
        );

        let poller = ExportJobPoller::new(self.api.clone(), self.settings.clone());
        let tracker = self.progress_tracker.clone();
        let session_id_clone = session_id.clone();

        tokio::spawn(async move {
            let sink = TrackerSink::new(tracker.clone(), session_id_clone.clone());
            let result = poller.run(&target, &sink, &cancel).await;
            finish_session(&tracker, &session_id_clone, result);
        });

        Ok(ExportResponse {
            session_id,
            status: ExportStartStatus::Started,
            message: format!(
                "Экспорт отчёта «{}» в {} запущен",
                request.report_name, request.format
            ),
        })
    }

    /// Получить текущий прогресс экспорта
    pub fn get_progress(&self, session_id: &str) -> Option<ExportProgress> {
        self.progress_tracker.get_progress(session_id)
    }

    /// Готовый файл в base64
    pub fn get_file(&self, session_id: &str) -> Option<ExportedFile> {
        self.progress_tracker
            .get_file(session_id)
            .map(|file| ExportedFile {
                content_type: file.content_type().to_string(),
                content_base64: base64::engine::general_purpose::STANDARD.encode(&file.content),
                file_name: file.file_name,
            })
    }

    pub fn cancel(&self, session_id: &str) -> bool {
        let cancelled = self.progress_tracker.cancel(session_id);
        if cancelled {
            tracing::info!("Export session {} cancellation requested", session_id);
        }
        cancelled
    }
}

fn finish_session(
    tracker: &ProgressTracker,
    session_id: &str,
    result: std::result::Result<DownloadedFile, ExportError>,
) {
    match result {
        Ok(file) => {
            tracing::info!("Export session {} completed: {}", session_id, file.file_name);
            tracker.complete_session(session_id, ExportSessionStatus::Succeeded, None);
        }
        Err(ExportError::Cancelled) => {
            tracing::info!("Export session {} cancelled", session_id);
            tracker.complete_session(session_id, ExportSessionStatus::Cancelled, None);
        }
        Err(e @ ExportError::Submission(_)) => {
            tracing::error!("Export session {} failed to start: {}", session_id, e);
            tracker.complete_session(
                session_id,
                ExportSessionStatus::FailedToStart,
                Some(e.to_string()),
            );
        }
        Err(e) => {
            tracing::error!("Export session {} failed: {}", session_id, e);
            tracker.complete_session(session_id, ExportSessionStatus::Failed, Some(e.to_string()));
        }
    }
}
