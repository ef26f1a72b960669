//! Значения, которые портал хранит в localStorage

use web_sys::window;

const USER_ID_STORAGE_KEY: &str = "portal-user-id";
const ACCOUNT_STORAGE_KEY: &str = "portal-last-account";

/// Пользователь без сохранённого id
pub const ANONYMOUS_USER: &str = "anonymous";

fn storage() -> Option<web_sys::Storage> {
    window().and_then(|w| w.local_storage().ok().flatten())
}

fn load(key: &str) -> Option<String> {
    storage()
        .and_then(|s| s.get_item(key).ok().flatten())
        .filter(|v| !v.trim().is_empty())
}

fn save(key: &str, value: &str) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(key, value);
    }
}

/// Id пользователя для избранного
pub fn current_user_id() -> String {
    load(USER_ID_STORAGE_KEY).unwrap_or_else(|| ANONYMOUS_USER.to_string())
}

pub fn load_last_account() -> Option<String> {
    load(ACCOUNT_STORAGE_KEY)
}

pub fn save_last_account(account_id: &str) {
    save(ACCOUNT_STORAGE_KEY, account_id);
}
