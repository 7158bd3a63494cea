//! In-process `TripRepository`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{TripRepository, TripRepositoryError};
use crate::domain::{Trip, TripId};

#[derive(Debug, Default)]
struct Store {
    records: HashMap<TripId, Trip>,
    index: Vec<TripId>,
}

/// Saved-trip repository keeping records in memory. `find_all` returns trips
/// in the order they were first saved.
#[derive(Debug, Default)]
pub struct InMemoryTripRepository {
    store: Mutex<Store>,
}

impl InMemoryTripRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, TripRepositoryError> {
        self.store
            .lock()
            .map_err(|_| TripRepositoryError::query("in-memory repository lock poisoned"))
    }
}

#[async_trait]
impl TripRepository for InMemoryTripRepository {
    async fn save(&self, trip: &Trip) -> Result<(), TripRepositoryError> {
        let mut store = self.lock()?;
        let id = trip.id().clone();
        if !store.index.contains(&id) {
            store.index.push(id.clone());
        }
        store.records.insert(id, trip.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Trip>, TripRepositoryError> {
        let store = self.lock()?;
        Ok(store
            .index
            .iter()
            .filter_map(|id| store.records.get(id).cloned())
            .collect())
    }

    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, TripRepositoryError> {
        Ok(self.lock()?.records.get(id).cloned())
    }

    async fn delete(&self, id: &TripId) -> Result<bool, TripRepositoryError> {
        let mut store = self.lock()?;
        if store.records.remove(id).is_none() {
            return Ok(false);
        }
        store.index.retain(|indexed| indexed != id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TripDraft;

    fn trip(id: &str, cost: f64) -> Trip {
        Trip::try_from(TripDraft {
            id: id.into(),
            origin: "JFK".into(),
            destination: "LAX".into(),
            cost,
            duration: 6.0,
            transport_type: "flight".into(),
            display_name: format!("trip {id}"),
        })
        .expect("valid trip")
    }

    fn id(raw: &str) -> TripId {
        TripId::new(raw).expect("id")
    }

    #[tokio::test]
    async fn save_then_find() {
        let repo = InMemoryTripRepository::new();
        repo.save(&trip("a", 1.0)).await.expect("save");

        assert_eq!(
            repo.find_by_id(&id("a")).await.expect("find"),
            Some(trip("a", 1.0))
        );
    }

    #[tokio::test]
    async fn resaving_overwrites_without_duplicating_index() {
        let repo = InMemoryTripRepository::new();
        repo.save(&trip("a", 1.0)).await.expect("save");
        repo.save(&trip("b", 2.0)).await.expect("save");
        repo.save(&trip("a", 3.0)).await.expect("save");

        let all = repo.find_all().await.expect("list");
        let costs: Vec<f64> = all.iter().map(Trip::cost).collect();
        assert_eq!(costs, [3.0, 2.0]);
    }

    #[tokio::test]
    async fn delete_removes_record_and_index_entry() {
        let repo = InMemoryTripRepository::new();
        repo.save(&trip("a", 1.0)).await.expect("save");

        assert!(repo.delete(&id("a")).await.expect("delete"));
        assert!(!repo.delete(&id("a")).await.expect("delete"));
        assert!(repo.find_all().await.expect("list").is_empty());
        assert_eq!(repo.find_by_id(&id("a")).await.expect("find"), None);
    }
}
