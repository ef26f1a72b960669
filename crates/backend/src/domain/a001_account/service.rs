use contracts::domain::a001_account::{Account, AccountWorkspace};

use crate::shared::ports::{AccountDirectory, PortResult};

/// Аккаунты для выпадающего списка, по имени
pub async fn list_accounts(directory: &dyn AccountDirectory) -> PortResult<Vec<Account>> {
    let mut accounts = directory.fetch_accounts().await?;
    accounts.retain(|a| !a.id.trim().is_empty());
    accounts.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(accounts)
}

pub async fn get_workspace(
    directory: &dyn AccountDirectory,
    account_id: &str,
) -> PortResult<AccountWorkspace> {
    let workspace_id = directory.fetch_workspace_id(account_id).await?;
    Ok(AccountWorkspace {
        account_id: account_id.to_string(),
        workspace_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FakeDirectory;

    #[async_trait]
    impl AccountDirectory for FakeDirectory {
        async fn fetch_accounts(&self) -> PortResult<Vec<Account>> {
            Ok(vec![
                Account { id: "2".into(), name: "beta".into() },
                Account { id: "".into(), name: "broken".into() },
                Account { id: "1".into(), name: "Alpha".into() },
            ])
        }

        async fn fetch_workspace_id(&self, account_id: &str) -> PortResult<String> {
            Ok(format!("ws-{}", account_id))
        }
    }

    #[tokio::test]
    async fn test_accounts_sorted_by_name() {
        let accounts = list_accounts(&FakeDirectory).await.unwrap();
        let names: Vec<_> = accounts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta"]);
    }

    #[tokio::test]
    async fn test_workspace_binding() {
        let binding = get_workspace(&FakeDirectory, "7").await.unwrap();
        assert_eq!(binding.workspace_id, "ws-7");
        assert_eq!(binding.account_id, "7");
    }
}
