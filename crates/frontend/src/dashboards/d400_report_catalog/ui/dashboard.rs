use contracts::dashboards::d400_report_catalog::{CatalogState, CatalogView};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d400_report_catalog::api;
use crate::dashboards::d400_report_catalog::state::{
    AccordionState, DropdownState, ReportCategory, ReportSelection,
};
use crate::domain::a001_account::ui::picker::AccountPicker;
use crate::domain::a002_bi_report::api as embed_api;
use crate::domain::a003_favorite::api as favorite_api;
use crate::shared::icons::icon;
use crate::shared::power_bi;
use crate::shared::storage;
use crate::usecases::u501_export_report::{ExportButtons, ExportSource};

/// Каталог отчётов Power BI: выбор аккаунта, меню отчётов с избранным,
/// встроенный отчёт и выгрузка в PDF/PPTX
#[component]
pub fn ReportCatalogDashboard() -> impl IntoView {
    let user_id = StoredValue::new(storage::current_user_id());

    let account_id = RwSignal::new(None::<String>);
    let (workspace_id, set_workspace_id) = signal(None::<String>);
    let catalog_view = RwSignal::new(None::<CatalogView>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let dropdown = RwSignal::new(DropdownState::default());
    let accordion = RwSignal::new(AccordionState::default());
    let selection = RwSignal::new(None::<ReportSelection>);
    let (embed_error, set_embed_error) = signal(None::<String>);
    let show_favorite_popup = RwSignal::new(false);

    let embed_container = NodeRef::<leptos::html::Div>::new();

    // ========================================================================
    // Загрузка каталога при смене аккаунта
    // ========================================================================

    Effect::new(move |_| {
        let Some(account) = account_id.get() else {
            return;
        };

        selection.set(None);
        catalog_view.set(None);
        set_workspace_id.set(None);
        set_error.set(None);
        set_loading.set(true);

        spawn_local(async move {
            let result = api::get_catalog(&account, &user_id.get_value()).await;

            // Ответ для уже неактуального аккаунта
            if account_id.get_untracked().as_deref() != Some(account.as_str()) {
                return;
            }

            match result {
                Ok(response) => {
                    set_workspace_id.set(response.workspace_id);
                    match response.catalog {
                        CatalogState::Ready { view } => catalog_view.set(Some(view)),
                        CatalogState::Unavailable { reason } => set_error.set(Some(reason)),
                    }
                }
                Err(e) => {
                    log::error!("Failed to load report catalog for {}: {}", account, e);
                    set_error.set(Some(format!("Ошибка загрузки каталога: {}", e)));
                }
            }
            set_loading.set(false);
        });
    });

    // ========================================================================
    // Встраивание выбранного отчёта
    // ========================================================================

    Effect::new(move |_| {
        let Some(current) = selection.get() else {
            return;
        };
        let Some(workspace) = workspace_id.get() else {
            return;
        };
        set_embed_error.set(None);

        spawn_local(async move {
            let result = embed_api::get_embed_config(&workspace, &current.report_id).await;

            if selection.get_untracked().as_ref() != Some(&current) {
                return;
            }

            let embedded = result.and_then(|config| {
                let container = embed_container
                    .get_untracked()
                    .ok_or_else(|| "Контейнер отчёта не найден".to_string())?;
                power_bi::embed_report(&container, &config).map_err(|e| format!("{:?}", e))
            });

            if let Err(e) = embedded {
                log::error!("Failed to embed report {}: {}", current.name, e);
                set_embed_error.set(Some(e));
            }
        });
    });

    // ========================================================================
    // Действия
    // ========================================================================

    let select_report = move |name: String| {
        let Some(view) = catalog_view.get_untracked() else {
            return;
        };
        if let Some(report) = ReportSelection::from_catalog(&view, &name) {
            selection.set(Some(report));
            dropdown.set(DropdownState::Closed);
        }
    };

    // Отметка меняется сразу, при ошибке сервера откатывается
    let toggle_favorite = move |name: String| -> Option<bool> {
        let view = catalog_view.get_untracked()?;
        let toggle = view.favorite_toggle(&name)?;
        let make_favorite = toggle.make_favorite;
        catalog_view.set(Some(view.with_favorite(&name, make_favorite)));

        spawn_local(async move {
            if let Err(e) = favorite_api::toggle_favorite(&user_id.get_value(), &toggle).await {
                log::error!("Failed to toggle favorite {}: {}", toggle.report_name, e);
                catalog_view.update(|current| {
                    if let Some(v) = current {
                        *v = v.with_favorite(&toggle.report_name, !toggle.make_favorite);
                    }
                });
                set_error.set(Some(format!("Не удалось изменить избранное: {}", e)));
            }
        });
        Some(make_favorite)
    };

    let is_favorite = move |name: &str| {
        catalog_view.with(|v| v.as_ref().map(|v| v.is_favorite(name)).unwrap_or(false))
    };

    let selected_is_favorite = Signal::derive(move || {
        let Some(current) = selection.get() else {
            return false;
        };
        catalog_view.with(|v| v.as_ref().map(|v| current.is_favorite(v)).unwrap_or(false))
    });

    let on_global_favorite = move |_: leptos::ev::MouseEvent| {
        let Some(current) = selection.get_untracked() else {
            return;
        };
        if toggle_favorite(current.name) == Some(true) {
            show_favorite_popup.set(true);
        }
    };

    let export_source = Signal::derive(move || {
        let workspace = workspace_id.get()?;
        let current = selection.get()?;
        Some(ExportSource {
            workspace_id: workspace,
            report_id: current.report_id,
            report_name: current.name,
        })
    });

    let report_row = move |name: String| {
        let row_name = name.clone();
        let star_name = name.clone();
        let active_name = name.clone();
        let fav_name = name.clone();
        view! {
            <div
                class=move || {
                    let active = selection
                        .with(|s| s.as_ref().map(|s| s.name == active_name).unwrap_or(false));
                    if active {
                        "report-menu__item report-menu__item--active"
                    } else {
                        "report-menu__item"
                    }
                }
                on:click=move |_| select_report(row_name.clone())
            >
                <span class="report-menu__name">{name}</span>
                <span
                    class="report-menu__star"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        toggle_favorite(star_name.clone());
                    }
                >
                    {move || if is_favorite(&fav_name) { icon("star-filled") } else { icon("star") }}
                </span>
            </div>
        }
    };

    view! {
        <div class="report-catalog">
            <div class="report-catalog__toolbar">
                <AccountPicker selected=account_id />

                <div class="report-menu">
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || catalog_view.get().is_none())
                        on_click=move |_| dropdown.update(|d| *d = d.toggle())
                    >
                        {move || {
                            selection
                                .get()
                                .map(|s| s.name)
                                .unwrap_or_else(|| "Выберите отчёт".to_string())
                        }}
                        {move || if dropdown.get().is_open() { icon("chevron-down") } else { icon("chevron-right") }}
                    </Button>

                    {move || {
                        if !dropdown.get().is_open() {
                            return view! { <></> }.into_any();
                        }
                        let Some(view) = catalog_view.get() else {
                            return view! { <></> }.into_any();
                        };
                        view! {
                            <div class="report-menu__dropdown">
                                {ReportCategory::all()
                                    .into_iter()
                                    .map(|category| {
                                        let names = category.names(&view);
                                        let count = names.len();
                                        view! {
                                            <div class="report-menu__section">
                                                <div
                                                    class="report-menu__section-header"
                                                    on:click=move |_| accordion.update(|a| *a = a.toggle(category))
                                                >
                                                    {move || if accordion.get().is_open(category) { icon("chevron-down") } else { icon("chevron-right") }}
                                                    <span>{category.title()}</span>
                                                    <span class="report-menu__count">{count}</span>
                                                </div>
                                                {move || {
                                                    accordion.get().is_open(category).then(|| {
                                                        view! {
                                                            <div class="report-menu__items">
                                                                {names.iter().cloned().map(report_row).collect_view()}
                                                            </div>
                                                        }
                                                    })
                                                }}
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }.into_any()
                    }}
                </div>

                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || selection.get().is_none())
                    on_click=on_global_favorite
                >
                    {move || if selected_is_favorite.get() { icon("star-filled") } else { icon("star") }}
                    {move || if selected_is_favorite.get() { " Убрать из избранного" } else { " Добавить в избранное" }}
                </Button>

                <ExportButtons source=export_source />
            </div>

            {move || {
                if loading.get() {
                    view! {
                        <div class="report-catalog__loading">
                            <Spinner size=SpinnerSize::Tiny />
                            " Загрузка каталога..."
                        </div>
                    }.into_any()
                } else if let Some(msg) = error.get() {
                    view! {
                        <div class="report-catalog__error">
                            <strong>"⚠ "</strong>
                            {msg}
                        </div>
                    }.into_any()
                } else if account_id.get().is_none() {
                    view! { <div class="report-catalog__hint">"Выберите аккаунт"</div> }.into_any()
                } else if catalog_view.with(|v| v.as_ref().map(|v| v.is_empty()).unwrap_or(false)) {
                    view! { <div class="report-catalog__hint">"Для аккаунта нет доступных отчётов"</div> }.into_any()
                } else {
                    view! { <></> }.into_any()
                }
            }}

            {move || {
                embed_error.get().map(|msg| {
                    view! {
                        <div class="report-catalog__error">
                            <strong>"⚠ Ошибка загрузки отчёта: "</strong>
                            {msg}
                        </div>
                    }
                })
            }}

            <div
                class=move || {
                    if show_favorite_popup.get() {
                        "report-embed report-embed--blurred"
                    } else {
                        "report-embed"
                    }
                }
                node_ref=embed_container
            ></div>

            <Dialog open=show_favorite_popup>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>"Избранное"</DialogTitle>
                        <DialogContent>
                            {move || {
                                let name = selection.get().map(|s| s.name).unwrap_or_default();
                                format!("Отчёт «{}» добавлен в избранное", name)
                            }}
                        </DialogContent>
                        <DialogActions>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| show_favorite_popup.set(false)
                            >
                                {icon("close")}
                                " Закрыть"
                            </Button>
                        </DialogActions>
                    </DialogBody>
                </DialogSurface>
            </Dialog>
        </div>
    }
}
