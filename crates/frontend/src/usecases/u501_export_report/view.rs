use contracts::usecases::u501_export_report::{
    ExportFormat, ExportProgress, ExportRequest, ExportSessionStatus, ExportStartStatus,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::export::download_exported_file;
use crate::shared::icons::icon;

/// Интервал опроса прогресса на backend
const PROGRESS_POLL_MS: u32 = 2000;

/// Отчёт, который можно выгрузить
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSource {
    pub workspace_id: String,
    pub report_id: String,
    pub report_name: String,
}

impl ExportSource {
    pub fn request(&self, format: ExportFormat) -> ExportRequest {
        ExportRequest {
            workspace_id: self.workspace_id.clone(),
            report_id: self.report_id.clone(),
            report_name: self.report_name.clone(),
            format,
        }
    }
}

fn status_label(progress: &ExportProgress) -> String {
    match progress.status {
        ExportSessionStatus::Submitting => format!(
            "Отправка задания (попытка {} из {})",
            progress.attempt, progress.max_attempts
        ),
        ExportSessionStatus::Polling => format!(
            "Формирование файла {} (попытка {} из {})",
            progress.format, progress.attempt, progress.max_attempts
        ),
        ExportSessionStatus::Succeeded => "Файл готов".to_string(),
        ExportSessionStatus::FailedToStart => "Экспорт не удалось запустить".to_string(),
        ExportSessionStatus::Failed => "Экспорт не удался".to_string(),
        ExportSessionStatus::Cancelled => "Экспорт отменён".to_string(),
    }
}

/// Следить за сессией до завершения и скачать файл
async fn follow_export(
    session_id: String,
    set_progress: WriteSignal<Option<ExportProgress>>,
) -> Result<(), String> {
    loop {
        gloo_timers::future::TimeoutFuture::new(PROGRESS_POLL_MS).await;

        let progress = super::api::get_progress(&session_id).await?;
        let status = progress.status;
        let error = progress
            .error
            .clone()
            .unwrap_or_else(|| status_label(&progress));
        set_progress.set(Some(progress));

        match status {
            ExportSessionStatus::Submitting | ExportSessionStatus::Polling => continue,
            ExportSessionStatus::Succeeded => {
                let file = super::api::get_file(&session_id).await?;
                log::info!("Export {}: downloading {}", session_id, file.file_name);
                return download_exported_file(&file);
            }
            ExportSessionStatus::Cancelled => return Ok(()),
            ExportSessionStatus::FailedToStart | ExportSessionStatus::Failed => {
                return Err(error)
            }
        }
    }
}

/// Кнопки выгрузки текущего отчёта в PDF и PPTX.
/// Пока идёт экспорт, обе кнопки неактивны.
#[component]
pub fn ExportButtons(#[prop(into)] source: Signal<Option<ExportSource>>) -> impl IntoView {
    let (session_id, set_session_id) = signal(None::<String>);
    let (progress, set_progress) = signal(None::<ExportProgress>);
    let (error_message, set_error_message) = signal(None::<String>);
    let (is_running, set_is_running) = signal(false);

    let start_export = move |format: ExportFormat| {
        if is_running.get_untracked() {
            return;
        }
        let Some(source) = source.get_untracked() else {
            return;
        };

        set_error_message.set(None);
        set_progress.set(None);
        set_is_running.set(true);

        spawn_local(async move {
            let result = match super::api::start_export(&source.request(format)).await {
                Ok(response) if response.status == ExportStartStatus::Started => {
                    set_session_id.set(Some(response.session_id.clone()));
                    follow_export(response.session_id, set_progress).await
                }
                Ok(response) => Err(response.message),
                Err(e) => Err(format!("Ошибка запуска: {}", e)),
            };

            if let Err(e) = result {
                log::error!("Export of {} failed: {}", source.report_name, e);
                set_error_message.set(Some(e));
            }
            set_session_id.set(None);
            set_is_running.set(false);
        });
    };

    let cancel_export = move |_: leptos::ev::MouseEvent| {
        let Some(sid) = session_id.get_untracked() else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = super::api::cancel_export(&sid).await {
                log::warn!("Failed to cancel export {}: {}", sid, e);
            }
        });
    };

    let buttons_disabled = Signal::derive(move || is_running.get() || source.get().is_none());

    view! {
        <div class="export-buttons">
            <Space>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=buttons_disabled
                    on_click=move |_| start_export(ExportFormat::Pdf)
                >
                    {icon("download")}
                    " PDF"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=buttons_disabled
                    on_click=move |_| start_export(ExportFormat::Pptx)
                >
                    {icon("download")}
                    " PPTX"
                </Button>
                {move || {
                    if session_id.get().is_some() {
                        view! {
                            <Button appearance=ButtonAppearance::Subtle on_click=cancel_export>
                                "Отменить"
                            </Button>
                        }.into_any()
                    } else {
                        view! { <></> }.into_any()
                    }
                }}
            </Space>

            {move || {
                if is_running.get() {
                    let label = progress
                        .get()
                        .map(|p| status_label(&p))
                        .unwrap_or_else(|| "Запуск экспорта...".to_string());
                    view! {
                        <div class="export-buttons__status">
                            <Spinner size=SpinnerSize::Tiny />
                            <span>{label}</span>
                        </div>
                    }.into_any()
                } else {
                    view! { <></> }.into_any()
                }
            }}

            {move || {
                if let Some(msg) = error_message.get() {
                    view! {
                        <div class="export-buttons__error">
                            <strong>"⚠ Ошибка экспорта: "</strong>
                            {msg}
                        </div>
                    }.into_any()
                } else {
                    view! { <></> }.into_any()
                }
            }}
        </div>
    }
}
