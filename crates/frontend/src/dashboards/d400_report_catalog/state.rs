//! Состояние меню отчётов. Всё, что рисует меню, выводится из этих значений
//! и `CatalogView`; DOM-классы вручную не переключаются.

use contracts::dashboards::d400_report_catalog::CatalogView;
use contracts::domain::a002_bi_report::ReportType;

/// Выпадающее меню отчётов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownState {
    Open,
    #[default]
    Closed,
}

impl DropdownState {
    pub fn toggle(self) -> Self {
        match self {
            DropdownState::Open => DropdownState::Closed,
            DropdownState::Closed => DropdownState::Open,
        }
    }

    pub fn is_open(self) -> bool {
        self == DropdownState::Open
    }
}

/// Раздел аккордеона внутри меню
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportCategory {
    Favorites,
    Reports(ReportType),
}

impl ReportCategory {
    pub fn all() -> [ReportCategory; 4] {
        [
            ReportCategory::Favorites,
            ReportCategory::Reports(ReportType::Standard),
            ReportCategory::Reports(ReportType::Premium),
            ReportCategory::Reports(ReportType::Custom),
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportCategory::Favorites => "Избранное",
            ReportCategory::Reports(report_type) => report_type.display_name(),
        }
    }

    /// Имена отчётов раздела
    pub fn names(&self, view: &CatalogView) -> Vec<String> {
        match self {
            ReportCategory::Favorites => view.available_favorites(),
            ReportCategory::Reports(report_type) => view.names_of(*report_type).to_vec(),
        }
    }
}

/// Открыт не более чем один раздел
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccordionState {
    pub open: Option<ReportCategory>,
}

impl AccordionState {
    /// Клик по заголовку раздела: открыть его (закрыв остальные) или закрыть, если уже открыт
    pub fn toggle(self, category: ReportCategory) -> Self {
        if self.open == Some(category) {
            Self { open: None }
        } else {
            Self {
                open: Some(category),
            }
        }
    }

    pub fn is_open(&self, category: ReportCategory) -> bool {
        self.open == Some(category)
    }
}

/// Выбранный отчёт
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSelection {
    pub name: String,
    pub report_id: String,
}

impl ReportSelection {
    /// Выбрать отчёт по имени; None, если его нет в текущем workspace
    pub fn from_catalog(view: &CatalogView, name: &str) -> Option<Self> {
        view.report_id(name).map(|id| Self {
            name: name.to_string(),
            report_id: id.to_string(),
        })
    }

    pub fn is_favorite(&self, view: &CatalogView) -> bool {
        view.is_favorite(&self.name)
    }
}
