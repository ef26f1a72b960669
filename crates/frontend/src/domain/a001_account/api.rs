use contracts::domain::a001_account::Account;

use crate::shared::api_utils::get_json;

/// GET /api/a001/accounts
pub async fn list_accounts() -> Result<Vec<Account>, String> {
    get_json("/api/a001/accounts").await
}
