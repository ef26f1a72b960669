use crate::dashboards::d400_report_catalog::ui::dashboard::ReportCatalogDashboard;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <ReportCatalogDashboard />
        </ConfigProvider>
    }
}
