use contracts::domain::a001_account::Account;
use js_sys::Reflect;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::domain::a001_account::api;
use crate::shared::storage;

/// Выбор аккаунта: выпадающий список и сообщение окна
/// `{type: "selected_account", accountId}` от внешней страницы
#[component]
pub fn AccountPicker(selected: RwSignal<Option<String>>) -> impl IntoView {
    let (accounts, set_accounts) = signal(Vec::<Account>::new());
    let (error, set_error) = signal(None::<String>);

    // Load accounts on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match api::list_accounts().await {
                Ok(list) => {
                    if selected.get_untracked().is_none() {
                        let last = storage::load_last_account()
                            .filter(|id| list.iter().any(|a| &a.id == id));
                        if last.is_some() {
                            selected.set(last);
                        }
                    }
                    set_accounts.set(list);
                }
                Err(e) => {
                    log::error!("Failed to load accounts: {}", e);
                    set_error.set(Some(e));
                }
            }
        });
    });

    // Account selected by the host page
    Effect::new(move |_| {
        let Some(window) = web_sys::window() else {
            return;
        };

        let handler = Closure::wrap(Box::new(move |event: web_sys::MessageEvent| {
            if let Some(account_id) = selected_account_from_message(&event.data()) {
                log::info!("Account {} selected by host page", account_id);
                storage::save_last_account(&account_id);
                selected.set(Some(account_id));
            }
        }) as Box<dyn FnMut(_)>);

        let _ =
            window.add_event_listener_with_callback("message", handler.as_ref().unchecked_ref());
        handler.forget();
    });

    view! {
        <div class="account-picker">
            <label class="account-picker__label">"Аккаунт"</label>
            <select
                class="account-picker__select"
                prop:value=move || selected.get().unwrap_or_default()
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    if value.is_empty() {
                        selected.set(None);
                    } else {
                        storage::save_last_account(&value);
                        selected.set(Some(value));
                    }
                }
            >
                <option value="">"Выберите аккаунт"</option>
                <For
                    each=move || accounts.get()
                    key=|account| account.id.clone()
                    children=move |account: Account| {
                        view! { <option value=account.id.clone()>{account.name.clone()}</option> }
                    }
                />
            </select>
            {move || error.get().map(|err| view! {
                <span class="account-picker__error">"⚠ " {err}</span>
            })}
        </div>
    }
}

fn selected_account_from_message(data: &JsValue) -> Option<String> {
    let msg_type = Reflect::get(data, &JsValue::from_str("type")).ok()?;
    if msg_type.as_string().as_deref() != Some("selected_account") {
        return None;
    }
    Reflect::get(data, &JsValue::from_str("accountId"))
        .ok()?
        .as_string()
        .filter(|id| !id.trim().is_empty())
}
