use serde::{Deserialize, Serialize};

/// Аккаунт клиента, за которым закреплён workspace Power BI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
}

/// Привязка аккаунта к workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountWorkspace {
    #[serde(rename = "accountId")]
    pub account_id: String,

    #[serde(rename = "workspaceId")]
    pub workspace_id: String,
}
