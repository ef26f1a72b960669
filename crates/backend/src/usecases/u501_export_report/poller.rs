//! Экспорт отчёта в файл: отправка задания, опрос статуса, повторные попытки
//! и передача готового файла получателю.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use contracts::usecases::u501_export_report::{ExportFormat, ExportRequest, ExportStatus};
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::shared::config::ExportConfig;
use crate::shared::format::format_file_size;
use crate::shared::ports::{ExportApi, PortError};

/// Параметры опроса задания экспорта
#[derive(Debug, Clone)]
pub struct PollerSettings {
    /// Сколько раз отправлять задание заново после неудачи (включая первую)
    pub max_attempts: u32,
    /// Пауза перед каждым запросом статуса
    pub poll_interval: Duration,
    /// Сколько ждать одну попытку, прежде чем считать её неудачной
    pub attempt_timeout: Duration,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

impl From<&ExportConfig> for PollerSettings {
    fn from(config: &ExportConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            poll_interval: config.poll_interval(),
            attempt_timeout: config.attempt_timeout(),
        }
    }
}

/// Что экспортировать
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub workspace_id: String,
    pub report_id: String,
    pub report_name: String,
    pub format: ExportFormat,
}

impl From<&ExportRequest> for ExportTarget {
    fn from(request: &ExportRequest) -> Self {
        Self {
            workspace_id: request.workspace_id.clone(),
            report_id: request.report_id.clone(),
            report_name: request.report_name.clone(),
            format: request.format,
        }
    }
}

/// Состояние текущей попытки экспорта
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub workspace_id: String,
    pub report_id: String,
    pub report_name: String,
    pub format: ExportFormat,
    /// None, пока задание не создано
    pub export_id: Option<String>,
    pub status: ExportStatus,
    /// Номер попытки, с 1
    pub attempt: u32,
}

impl ExportJob {
    fn new(target: &ExportTarget) -> Self {
        Self {
            workspace_id: target.workspace_id.clone(),
            report_id: target.report_id.clone(),
            report_name: target.report_name.clone(),
            format: target.format,
            export_id: None,
            status: ExportStatus::NotStarted,
            attempt: 1,
        }
    }
}

/// Готовый файл
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub file_name: String,
    pub format: ExportFormat,
    pub content: Vec<u8>,
}

impl DownloadedFile {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export failed to start: {0}")]
    Submission(#[source] PortError),

    #[error("Export did not succeed after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("Failed to fetch exported file: {0}")]
    FileFetch(#[source] PortError),

    #[error("Failed to deliver exported file: {0}")]
    Delivery(String),

    #[error("Export cancelled")]
    Cancelled,
}

/// Получатель готового файла и промежуточных состояний задания
pub trait DownloadSink: Send + Sync {
    fn job_updated(&self, _job: &ExportJob) {}

    fn deliver(&self, file: &DownloadedFile) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttemptOutcome {
    Succeeded,
    Failed,
    TimedOut,
}

/// Экспорт с опросом статуса и повторной отправкой задания
pub struct ExportJobPoller {
    api: Arc<dyn ExportApi>,
    settings: PollerSettings,
}

impl ExportJobPoller {
    pub fn new(api: Arc<dyn ExportApi>, settings: PollerSettings) -> Self {
        Self { api, settings }
    }

    /// Выполнить экспорт целиком.
    ///
    /// Ошибка создания задания прерывает экспорт сразу. Неудачная попытка
    /// (статус Failed, отсутствующий или неизвестный статус, ошибка запроса
    /// статуса, истёкший `attempt_timeout`) приводит к новому заданию, пока не
    /// исчерпан `max_attempts`. Файл скачивается и передаётся в `sink` только
    /// после статуса Succeeded.
    pub async fn run(
        &self,
        target: &ExportTarget,
        sink: &dyn DownloadSink,
        cancel: &CancellationToken,
    ) -> Result<DownloadedFile, ExportError> {
        let mut job = ExportJob::new(target);

        while job.attempt <= self.settings.max_attempts {
            if cancel.is_cancelled() {
                return Err(ExportError::Cancelled);
            }

            job.export_id = None;
            job.status = ExportStatus::NotStarted;
            sink.job_updated(&job);

            tracing::info!(
                "Export {} ({}) attempt {}/{}: submitting job",
                target.report_name,
                target.format,
                job.attempt,
                self.settings.max_attempts
            );

            let submitted = or_cancelled(
                cancel,
                self.api
                    .submit_export_job(&target.workspace_id, &target.report_id, target.format),
            )
            .await?;
            let export_id = submitted.map_err(|e| {
                tracing::error!("Export {}: submission failed: {}", target.report_name, e);
                ExportError::Submission(e)
            })?;

            job.export_id = Some(export_id.clone());
            sink.job_updated(&job);

            match self.poll_attempt(&mut job, &export_id, sink, cancel).await? {
                AttemptOutcome::Succeeded => {
                    return self.download(target, &export_id, sink, cancel).await;
                }
                AttemptOutcome::Failed => {
                    tracing::warn!(
                        "Export {}: job {} ended with status {:?}",
                        target.report_name,
                        export_id,
                        job.status
                    );
                }
                AttemptOutcome::TimedOut => {
                    tracing::warn!(
                        "Export {}: job {} did not finish within {:?}",
                        target.report_name,
                        export_id,
                        self.settings.attempt_timeout
                    );
                }
            }

            job.attempt += 1;
        }

        tracing::error!(
            "Export {}: giving up after {} attempts",
            target.report_name,
            self.settings.max_attempts
        );
        Err(ExportError::RetriesExhausted {
            attempts: self.settings.max_attempts,
        })
    }

    /// Опрос одного задания до конечного статуса
    async fn poll_attempt(
        &self,
        job: &mut ExportJob,
        export_id: &str,
        sink: &dyn DownloadSink,
        cancel: &CancellationToken,
    ) -> Result<AttemptOutcome, ExportError> {
        let deadline = Instant::now() + self.settings.attempt_timeout;

        loop {
            or_cancelled(cancel, tokio::time::sleep(self.settings.poll_interval)).await?;

            if Instant::now() >= deadline {
                return Ok(AttemptOutcome::TimedOut);
            }

            let checked = or_cancelled(
                cancel,
                self.api
                    .check_export_status(&job.workspace_id, &job.report_id, export_id),
            )
            .await?;
            let status = match checked {
                Ok(status) => status,
                Err(e) => {
                    tracing::warn!("Export job {}: status check failed: {}", export_id, e);
                    None
                }
            };

            job.status = status.unwrap_or(ExportStatus::Unknown);
            sink.job_updated(job);

            match status {
                Some(s) if s.is_pending() => continue,
                Some(ExportStatus::Succeeded) => return Ok(AttemptOutcome::Succeeded),
                _ => return Ok(AttemptOutcome::Failed),
            }
        }
    }

    async fn download(
        &self,
        target: &ExportTarget,
        export_id: &str,
        sink: &dyn DownloadSink,
        cancel: &CancellationToken,
    ) -> Result<DownloadedFile, ExportError> {
        let content = or_cancelled(
            cancel,
            self.api
                .fetch_exported_file(&target.workspace_id, &target.report_id, export_id),
        )
        .await?
        .map_err(ExportError::FileFetch)?;

        let file = DownloadedFile {
            file_name: target.format.file_name(&target.report_name),
            format: target.format,
            content,
        };

        tracing::info!(
            "Export {}: downloaded {} ({})",
            target.report_name,
            file.file_name,
            format_file_size(file.content.len())
        );

        sink.deliver(&file).map_err(ExportError::Delivery)?;
        Ok(file)
    }
}

/// Ожидание, прерываемое отменой: пауза опроса и каждый запрос к Power BI
async fn or_cancelled<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = T>,
) -> Result<T, ExportError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ExportError::Cancelled),
        value = call => Ok(value),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::shared::ports::PortResult;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// ExportApi с заранее заданными ответами статуса
    pub(crate) struct ScriptedExportApi {
        statuses: Mutex<VecDeque<PortResult<Option<ExportStatus>>>>,
        submit_error: Mutex<Option<PortError>>,
        pub submissions: Mutex<Vec<String>>,
        pub status_checks: Mutex<Vec<String>>,
        pub downloads: Mutex<Vec<String>>,
        cancel_on_check: Option<CancellationToken>,
        call_delay: Option<Duration>,
    }

    impl ScriptedExportApi {
        pub(crate) fn new(statuses: Vec<PortResult<Option<ExportStatus>>>) -> Self {
            Self {
                statuses: Mutex::new(statuses.into()),
                submit_error: Mutex::new(None),
                submissions: Mutex::new(Vec::new()),
                status_checks: Mutex::new(Vec::new()),
                downloads: Mutex::new(Vec::new()),
                cancel_on_check: None,
                call_delay: None,
            }
        }

        pub(crate) fn with_statuses(statuses: &[ExportStatus]) -> Self {
            Self::new(statuses.iter().map(|s| Ok(Some(*s))).collect())
        }

        pub(crate) fn failing_submission(error: PortError) -> Self {
            let api = Self::new(Vec::new());
            *api.submit_error.lock().unwrap() = Some(error);
            api
        }

        fn cancelling(mut self, token: CancellationToken) -> Self {
            self.cancel_on_check = Some(token);
            self
        }

        /// Запросы статуса и файла отвечают с задержкой
        fn slow(mut self, delay: Duration) -> Self {
            self.call_delay = Some(delay);
            self
        }

        async fn respond_later(&self) {
            if let Some(delay) = self.call_delay {
                tokio::time::sleep(delay).await;
            }
        }

        fn submission_count(&self) -> usize {
            self.submissions.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ExportApi for ScriptedExportApi {
        async fn submit_export_job(
            &self,
            _workspace_id: &str,
            _report_id: &str,
            _format: ExportFormat,
        ) -> PortResult<String> {
            if let Some(error) = self.submit_error.lock().unwrap().take() {
                return Err(error);
            }
            let mut submissions = self.submissions.lock().unwrap();
            let id = format!("E{}", submissions.len() + 1);
            submissions.push(id.clone());
            Ok(id)
        }

        async fn check_export_status(
            &self,
            _workspace_id: &str,
            _report_id: &str,
            export_id: &str,
        ) -> PortResult<Option<ExportStatus>> {
            self.status_checks.lock().unwrap().push(export_id.to_string());
            if let Some(token) = &self.cancel_on_check {
                token.cancel();
            }
            self.respond_later().await;
            self.statuses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Some(ExportStatus::Running)))
        }

        async fn fetch_exported_file(
            &self,
            _workspace_id: &str,
            _report_id: &str,
            export_id: &str,
        ) -> PortResult<Vec<u8>> {
            self.downloads.lock().unwrap().push(export_id.to_string());
            self.respond_later().await;
            Ok(format!("file of {}", export_id).into_bytes())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        delivered: Mutex<Vec<DownloadedFile>>,
        updates: Mutex<Vec<ExportJob>>,
    }

    impl DownloadSink for RecordingSink {
        fn job_updated(&self, job: &ExportJob) {
            self.updates.lock().unwrap().push(job.clone());
        }

        fn deliver(&self, file: &DownloadedFile) -> Result<(), String> {
            self.delivered.lock().unwrap().push(file.clone());
            Ok(())
        }
    }

    struct RejectingSink;

    impl DownloadSink for RejectingSink {
        fn deliver(&self, _file: &DownloadedFile) -> Result<(), String> {
            Err("disk full".to_string())
        }
    }

    fn target(format: ExportFormat) -> ExportTarget {
        ExportTarget {
            workspace_id: "ws".into(),
            report_id: "r1".into(),
            report_name: "Sales".into(),
            format,
        }
    }

    fn poller(api: Arc<ScriptedExportApi>) -> ExportJobPoller {
        ExportJobPoller::new(api, PollerSettings::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_first_attempt_after_polling() {
        use ExportStatus::*;
        let api = Arc::new(ScriptedExportApi::with_statuses(&[Running, Running, Succeeded]));
        let sink = RecordingSink::default();
        let started = Instant::now();

        let file = poller(api.clone())
            .run(&target(ExportFormat::Pdf), &sink, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(file.file_name, "Sales.PDF");
        assert_eq!(file.content_type(), "application/pdf");
        assert_eq!(api.submission_count(), 1);
        assert_eq!(api.status_checks.lock().unwrap().len(), 3);
        assert_eq!(*api.downloads.lock().unwrap(), vec!["E1".to_string()]);
        assert_eq!(sink.delivered.lock().unwrap().len(), 1);
        // Три паузы по 4 секунды перед каждым запросом статуса
        assert_eq!(started.elapsed(), Duration::from_millis(12_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resubmits_after_failed_attempts() {
        use ExportStatus::*;
        let api = Arc::new(ScriptedExportApi::with_statuses(&[Failed, Failed, Succeeded]));
        let sink = RecordingSink::default();

        let file = poller(api.clone())
            .run(&target(ExportFormat::Pptx), &sink, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(file.file_name, "Sales.PPTX");
        assert_eq!(file.content, b"file of E3".to_vec());
        assert_eq!(api.submission_count(), 3);
        assert_eq!(*api.downloads.lock().unwrap(), vec!["E3".to_string()]);

        let updates = sink.updates.lock().unwrap();
        assert_eq!(updates.last().map(|j| j.attempt), Some(3));
        assert_eq!(updates.last().map(|j| j.status), Some(Succeeded));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        use ExportStatus::*;
        let api = Arc::new(ScriptedExportApi::with_statuses(&[Failed, Failed, Failed]));
        let sink = RecordingSink::default();

        let result = poller(api.clone())
            .run(&target(ExportFormat::Pdf), &sink, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(ExportError::RetriesExhausted { attempts: 3 })));
        assert_eq!(api.submission_count(), 3);
        assert!(api.downloads.lock().unwrap().is_empty());
        assert!(sink.delivered.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_error_stops_immediately() {
        let api = Arc::new(ScriptedExportApi::failing_submission(PortError::Status {
            code: 400,
            body: "Export is not allowed".into(),
        }));
        let sink = RecordingSink::default();

        let result = poller(api.clone())
            .run(&target(ExportFormat::Pdf), &sink, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(ExportError::Submission(PortError::Status { code: 400, .. }))));
        assert!(api.status_checks.lock().unwrap().is_empty());
        assert!(sink.delivered.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_or_unknown_status_counts_as_failed_attempt() {
        let api = Arc::new(ScriptedExportApi::new(vec![
            Err(PortError::Http("connection reset".into())),
            Ok(None),
            Ok(Some(ExportStatus::Unknown)),
        ]));
        let sink = RecordingSink::default();

        let result = poller(api.clone())
            .run(&target(ExportFormat::Pdf), &sink, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(ExportError::RetriesExhausted { attempts: 3 })));
        assert_eq!(
            *api.status_checks.lock().unwrap(),
            vec!["E1".to_string(), "E2".to_string(), "E3".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempt_timeout_triggers_resubmission() {
        // Без сценария задание всегда Running
        let api = Arc::new(ScriptedExportApi::new(Vec::new()));
        let settings = PollerSettings {
            max_attempts: 2,
            poll_interval: Duration::from_secs(4),
            attempt_timeout: Duration::from_secs(10),
        };
        let sink = RecordingSink::default();

        let result = ExportJobPoller::new(api.clone(), settings)
            .run(&target(ExportFormat::Pdf), &sink, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(ExportError::RetriesExhausted { attempts: 2 })));
        assert_eq!(api.submission_count(), 2);
        // Запросы на 4-й и 8-й секунде каждой попытки, на 12-й срок истёк
        assert_eq!(api.status_checks.lock().unwrap().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_polling() {
        let cancel = CancellationToken::new();
        let api = Arc::new(ScriptedExportApi::new(Vec::new()).cancelling(cancel.clone()));
        let sink = RecordingSink::default();

        let result = poller(api.clone())
            .run(&target(ExportFormat::Pdf), &sink, &cancel)
            .await;

        assert!(matches!(result, Err(ExportError::Cancelled)));
        assert_eq!(api.submission_count(), 1);
        assert_eq!(api.status_checks.lock().unwrap().len(), 1);
        assert!(api.downloads.lock().unwrap().is_empty());
    }

    fn cancel_after(cancel: &CancellationToken, after: Duration) {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            cancel.cancel();
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_interrupts_slow_status_call() {
        let cancel = CancellationToken::new();
        let api = Arc::new(ScriptedExportApi::new(Vec::new()).slow(Duration::from_secs(600)));
        let sink = RecordingSink::default();
        let started = Instant::now();
        cancel_after(&cancel, Duration::from_secs(5));

        let result = poller(api.clone())
            .run(&target(ExportFormat::Pdf), &sink, &cancel)
            .await;

        assert!(matches!(result, Err(ExportError::Cancelled)));
        assert_eq!(api.status_checks.lock().unwrap().len(), 1);
        // Отмена не ждёт ответа на запрос статуса
        assert_eq!(started.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_interrupts_slow_download() {
        let cancel = CancellationToken::new();
        let api = Arc::new(
            ScriptedExportApi::with_statuses(&[ExportStatus::Succeeded])
                .slow(Duration::from_secs(60)),
        );
        let sink = RecordingSink::default();
        let started = Instant::now();
        // Статус готов на 64-й секунде, файл скачивается до 124-й
        cancel_after(&cancel, Duration::from_secs(100));

        let result = poller(api.clone())
            .run(&target(ExportFormat::Pdf), &sink, &cancel)
            .await;

        assert!(matches!(result, Err(ExportError::Cancelled)));
        assert_eq!(*api.downloads.lock().unwrap(), vec!["E1".to_string()]);
        assert!(sink.delivered.lock().unwrap().is_empty());
        assert_eq!(started.elapsed(), Duration::from_secs(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivery_error_is_reported() {
        let api = Arc::new(ScriptedExportApi::with_statuses(&[ExportStatus::Succeeded]));

        let result = poller(api)
            .run(&target(ExportFormat::Pdf), &RejectingSink, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(ExportError::Delivery(msg)) if msg == "disk full"));
    }
}
