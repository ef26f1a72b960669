use contracts::usecases::u501_export_report::{ExportProgress, ExportSessionStatus};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio_util::sync::CancellationToken;

use super::poller::{DownloadSink, DownloadedFile, ExportJob, ExportTarget};

struct ExportSession {
    progress: ExportProgress,
    file: Option<DownloadedFile>,
    cancel: CancellationToken,
}

/// Трекер сессий экспорта (in-memory): прогресс, готовые файлы, отмена
#[derive(Clone)]
pub struct ProgressTracker {
    sessions: Arc<RwLock<HashMap<String, ExportSession>>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Создать новую сессию экспорта
    pub fn create_session(
        &self,
        session_id: String,
        target: &ExportTarget,
        max_attempts: u32,
        cancel: CancellationToken,
    ) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.insert(
            session_id.clone(),
            ExportSession {
                progress: ExportProgress {
                    session_id,
                    report_name: target.report_name.clone(),
                    format: target.format,
                    status: ExportSessionStatus::Submitting,
                    attempt: 1,
                    max_attempts,
                    export_id: None,
                    job_status: None,
                    error: None,
                    started_at: chrono::Utc::now(),
                    completed_at: None,
                },
                file: None,
                cancel,
            },
        );
    }

    /// Получить текущий прогресс сессии
    pub fn get_progress(&self, session_id: &str) -> Option<ExportProgress> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions.get(session_id).map(|s| s.progress.clone())
    }

    /// Отразить состояние текущей попытки
    pub fn update_job(&self, session_id: &str, job: &ExportJob) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(session) = sessions.get_mut(session_id) {
            let progress = &mut session.progress;
            if progress.status.is_finished() {
                return;
            }
            progress.attempt = job.attempt;
            progress.export_id = job.export_id.clone();
            progress.job_status = job.export_id.as_ref().map(|_| job.status);
            progress.status = if job.export_id.is_some() {
                ExportSessionStatus::Polling
            } else {
                ExportSessionStatus::Submitting
            };
        }
    }

    pub fn store_file(&self, session_id: &str, file: DownloadedFile) -> Result<(), String> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        match sessions.get_mut(session_id) {
            Some(session) => {
                session.file = Some(file);
                Ok(())
            }
            None => Err(format!("export session {} not found", session_id)),
        }
    }

    /// Готовый файл сессии (только для успешно завершённых)
    pub fn get_file(&self, session_id: &str) -> Option<DownloadedFile> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions
            .get(session_id)
            .filter(|s| s.progress.status == ExportSessionStatus::Succeeded)
            .and_then(|s| s.file.clone())
    }

    /// Запросить отмену; false, если сессия не найдена или уже завершена
    pub fn cancel(&self, session_id: &str) -> bool {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        match sessions.get(session_id) {
            Some(session) if !session.progress.status.is_finished() => {
                session.cancel.cancel();
                true
            }
            _ => false,
        }
    }

    /// Завершить сессию экспорта
    pub fn complete_session(
        &self,
        session_id: &str,
        status: ExportSessionStatus,
        error: Option<String>,
    ) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(session) = sessions.get_mut(session_id) {
            session.progress.status = status;
            session.progress.error = error;
            session.progress.completed_at = Some(chrono::Utc::now());
        }
    }

    /// Удалить старые сессии вместе с файлами
    pub fn cleanup_old_sessions(&self, max_age_hours: i64) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let now = chrono::Utc::now();
        sessions.retain(|_, session| match session.progress.completed_at {
            Some(completed_at) => (now - completed_at).num_hours() < max_age_hours,
            None => true,
        });
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Получатель, складывающий состояние и файл в трекер
pub struct TrackerSink {
    tracker: Arc<ProgressTracker>,
    session_id: String,
}

impl TrackerSink {
    pub fn new(tracker: Arc<ProgressTracker>, session_id: String) -> Self {
        Self {
            tracker,
            session_id,
        }
    }
}

impl DownloadSink for TrackerSink {
    fn job_updated(&self, job: &ExportJob) {
        self.tracker.update_job(&self.session_id, job);
    }

    fn deliver(&self, file: &DownloadedFile) -> Result<(), String> {
        self.tracker.store_file(&self.session_id, file.clone())
    }
}
