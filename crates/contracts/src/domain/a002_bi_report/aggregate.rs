use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Report Type
// ============================================================================

/// Категория отчёта в хранилище метаданных
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReportType {
    Standard,
    Premium,
    Custom,
}

impl ReportType {
    /// Разбор метки из хранилища метаданных.
    /// Сравнение точное: всё, что не Standard/Premium (в т.ч. пустая строка
    /// и метка с пробелами), считается Custom.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Standard" => ReportType::Standard,
            "Premium" => ReportType::Premium,
            _ => ReportType::Custom,
        }
    }

    /// Заголовок группы в меню отчётов
    pub fn display_name(&self) -> &'static str {
        match self {
            ReportType::Standard => "Стандартные отчёты",
            ReportType::Premium => "Премиум отчёты",
            ReportType::Custom => "Индивидуальные отчёты",
        }
    }

    pub fn all() -> [ReportType; 3] {
        [ReportType::Standard, ReportType::Premium, ReportType::Custom]
    }
}

impl Default for ReportType {
    fn default() -> Self {
        ReportType::Custom
    }
}

fn deserialize_report_type<'de, D>(deserializer: D) -> Result<ReportType, D::Error>
where
    D: Deserializer<'de>,
{
    let label: Option<String> = Option::deserialize(deserializer)?;
    Ok(label
        .as_deref()
        .map(ReportType::from_label)
        .unwrap_or_default())
}

// ============================================================================
// Active report record
// ============================================================================

/// Запись об активном отчёте из хранилища метаданных.
///
/// Активность в хранилище не гарантирует, что отчёт есть в workspace:
/// удалённый из Power BI отчёт может оставаться активным.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: String,
    pub name: String,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "deserialize_report_type"
    )]
    pub report_type: ReportType,
}

impl ReportRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, report_type: ReportType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            report_type,
        }
    }
}

// ============================================================================
// Workspace index
// ============================================================================

/// Отчёты, реально опубликованные в workspace: имя -> id.
///
/// Загружается заново при каждой смене аккаунта и целиком заменяет предыдущий.
pub type WorkspaceReportIndex = BTreeMap<String, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_type_labels() {
        assert_eq!(ReportType::from_label("Standard"), ReportType::Standard);
        assert_eq!(ReportType::from_label("Premium"), ReportType::Premium);
        assert_eq!(ReportType::from_label("Custom"), ReportType::Custom);
        assert_eq!(ReportType::from_label(""), ReportType::Custom);
        assert_eq!(ReportType::from_label("premium"), ReportType::Custom);
        assert_eq!(ReportType::from_label(" Standard"), ReportType::Custom);
        assert_eq!(ReportType::from_label("Premium "), ReportType::Custom);
    }

    #[test]
    fn test_record_deserialize_unknown_and_missing_type() {
        let records: Vec<ReportRecord> = serde_json::from_str(
            r#"[
                {"id": "1", "name": "Sales", "type": "Premium"},
                {"id": "2", "name": "Stock", "type": null},
                {"id": "3", "name": "Ads"},
                {"id": "4", "name": "Misc", "type": "Legacy"}
            ]"#,
        )
        .unwrap();

        assert_eq!(records[0].report_type, ReportType::Premium);
        assert_eq!(records[1].report_type, ReportType::Custom);
        assert_eq!(records[2].report_type, ReportType::Custom);
        assert_eq!(records[3].report_type, ReportType::Custom);
    }
}
