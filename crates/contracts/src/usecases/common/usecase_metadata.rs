/// Метаданные UseCase: идентификация, логи и маршруты API
pub trait UseCaseMetadata {
    /// Индекс UseCase (например, "u501")
    fn usecase_index() -> &'static str;

    /// Техническое имя (например, "export_report")
    fn usecase_name() -> &'static str;

    /// Отображаемое имя для UI
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Полное имя вида "u501_export_report"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }

    /// Префикс маршрутов API, общий для backend и frontend: "/api/u501"
    fn api_prefix() -> String {
        format!("/api/{}", Self::usecase_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_export_report::ExportReport;

    #[test]
    fn test_export_usecase_names() {
        assert_eq!(ExportReport::full_name(), "u501_export_report");
        assert_eq!(ExportReport::api_prefix(), "/api/u501");
    }
}
