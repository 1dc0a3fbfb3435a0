//! In-memory profile store

use async_trait::async_trait;
use dashmap::DashMap;
use shared::models::{RestaurantPatch, RestaurantProfile};
use shared::util::now_millis;

use super::store::{ProfileStore, StoreError, StoreResult};

/// DashMap-backed store, one entry per restaurant id
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: DashMap<String, RestaurantProfile>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<RestaurantProfile>> {
        Ok(self.profiles.get(id).map(|p| p.value().clone()))
    }

    async fn update_partial(
        &self,
        id: &str,
        patch: RestaurantPatch,
    ) -> StoreResult<RestaurantProfile> {
        let mut entry = self
            .profiles
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("restaurant {id}")))?;
        entry.apply_patch(patch, now_millis());
        Ok(entry.value().clone())
    }

    async fn insert(&self, profile: RestaurantProfile) -> StoreResult<RestaurantProfile> {
        use dashmap::mapref::entry::Entry;

        match self.profiles.entry(profile.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(format!("restaurant {}", profile.id))),
            Entry::Vacant(slot) => {
                slot.insert(profile.clone());
                Ok(profile)
            }
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<RestaurantProfile>> {
        Ok(self.profiles.remove(id).map(|(_, p)| p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str) -> RestaurantProfile {
        RestaurantProfile::from_patch(
            id.into(),
            "owner-1".into(),
            RestaurantPatch {
                name: Some("Blue Lotus".into()),
                images: Some(vec!["https://cdn.test/a.jpg".into()]),
                ..Default::default()
            },
            1,
        )
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = MemoryProfileStore::new();
        store.insert(profile("r-1")).await.unwrap();

        let found = store.get_by_id("r-1").await.unwrap().unwrap();
        assert_eq!(found.name, "Blue Lotus");
        assert!(store.get_by_id("r-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_rejected() {
        let store = MemoryProfileStore::new();
        store.insert(profile("r-1")).await.unwrap();
        let err = store.insert(profile("r-1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_update_partial_keeps_absent_fields() {
        let store = MemoryProfileStore::new();
        store.insert(profile("r-1")).await.unwrap();

        let updated = store
            .update_partial(
                "r-1",
                RestaurantPatch {
                    phone: Some("+34 600 000 000".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Blue Lotus");
        assert_eq!(updated.phone.as_deref(), Some("+34 600 000 000"));
        assert_eq!(updated.images.len(), 1);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = MemoryProfileStore::new();
        let err = store
            .update_partial("missing", RestaurantPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_returns_removed() {
        let store = MemoryProfileStore::new();
        store.insert(profile("r-1")).await.unwrap();

        let removed = store.delete("r-1").await.unwrap();
        assert_eq!(removed.map(|p| p.id), Some("r-1".to_string()));
        assert!(store.delete("r-1").await.unwrap().is_none());
        assert!(store.get_by_id("r-1").await.unwrap().is_none());
    }
}
