pub mod format;
pub mod progress;
pub mod request;
pub mod response;

pub use format::{ExportFormat, ExportStatus};
pub use progress::{ExportProgress, ExportSessionStatus};
pub use request::ExportRequest;
pub use response::{ExportResponse, ExportStartStatus, ExportedFile};

use crate::usecases::common::UseCaseMetadata;

pub struct ExportReport;

impl UseCaseMetadata for ExportReport {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "export_report"
    }

    fn display_name() -> &'static str {
        "Экспорт отчёта"
    }

    fn description() -> &'static str {
        "Выгрузка отчёта Power BI в PDF или PPTX с повторными попытками"
    }
}
