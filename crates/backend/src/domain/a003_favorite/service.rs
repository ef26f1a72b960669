use contracts::domain::a003_favorite::{
    FavoriteSet, FavoriteToggleRequest, FavoriteToggleResponse,
};

use crate::shared::ports::{FavoritesStore, PortResult};

pub async fn list_favorites(store: &dyn FavoritesStore, user_id: &str) -> PortResult<FavoriteSet> {
    store.fetch_favorite_ids(user_id).await
}

/// Добавить отчёт в избранное или убрать из него
pub async fn toggle_favorite(
    store: &dyn FavoritesStore,
    request: &FavoriteToggleRequest,
) -> PortResult<FavoriteToggleResponse> {
    if request.favorite {
        store.add_favorite(&request.user_id, &request.report_id).await?;
    } else {
        store
            .remove_favorite(&request.user_id, &request.report_id)
            .await?;
    }

    tracing::info!(
        "A003: report {} favorite={} for user {}",
        request.report_id,
        request.favorite,
        request.user_id
    );

    Ok(FavoriteToggleResponse {
        report_id: request.report_id.clone(),
        favorite: request.favorite,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        favorites: Mutex<HashMap<String, FavoriteSet>>,
    }

    #[async_trait]
    impl FavoritesStore for MemoryStore {
        async fn fetch_favorite_ids(&self, user_id: &str) -> PortResult<FavoriteSet> {
            Ok(self
                .favorites
                .lock()
                .unwrap()
                .get(user_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn add_favorite(&self, user_id: &str, report_id: &str) -> PortResult<()> {
            self.favorites
                .lock()
                .unwrap()
                .entry(user_id.to_string())
                .or_default()
                .insert(report_id.to_string());
            Ok(())
        }

        async fn remove_favorite(&self, user_id: &str, report_id: &str) -> PortResult<()> {
            if let Some(set) = self.favorites.lock().unwrap().get_mut(user_id) {
                set.remove(report_id);
            }
            Ok(())
        }
    }

    fn toggle(favorite: bool) -> FavoriteToggleRequest {
        FavoriteToggleRequest {
            user_id: "u1".into(),
            report_id: "r1".into(),
            favorite,
        }
    }

    #[tokio::test]
    async fn test_toggle_adds_and_removes() {
        let store = MemoryStore::default();

        let response = toggle_favorite(&store, &toggle(true)).await.unwrap();
        assert!(response.favorite);
        assert!(list_favorites(&store, "u1").await.unwrap().contains("r1"));

        // Повторное добавление ничего не ломает
        toggle_favorite(&store, &toggle(true)).await.unwrap();
        assert_eq!(list_favorites(&store, "u1").await.unwrap().len(), 1);

        let response = toggle_favorite(&store, &toggle(false)).await.unwrap();
        assert!(!response.favorite);
        assert!(list_favorites(&store, "u1").await.unwrap().is_empty());
        assert!(list_favorites(&store, "u2").await.unwrap().is_empty());
    }
}
