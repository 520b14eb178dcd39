use std::sync::Arc;

use super::{CarStore, ChangeSet, RepositoryError};
use crate::models::{Car, NewCar, ResourceParameters};

/// Unit of work over a shared [`CarStore`], created once per request.
///
/// Reads go straight to the store. Writes are staged and only reach the store
/// on [`commit`](Self::commit).
pub struct CarsRepository {
    store: Arc<dyn CarStore>,
    pending: ChangeSet,
}

impl CarsRepository {
    pub fn new(store: Arc<dyn CarStore>) -> Self {
        Self {
            store,
            pending: ChangeSet::default(),
        }
    }

    pub async fn list_all(&self, params: &ResourceParameters) -> Result<Vec<Car>, RepositoryError> {
        self.store.list(params).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Car>, RepositoryError> {
        self.store.find(id).await
    }

    pub fn add(&mut self, car: NewCar) {
        self.pending.inserts.push(car);
    }

    pub fn update(&mut self, car: Car) {
        self.pending.updates.push(car);
    }

    pub fn remove(&mut self, car: Car) {
        self.pending.deletes.push(car.id);
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Persists everything staged so far and returns the newly created cars.
    ///
    /// The staged set is consumed whether or not the store accepts it.
    pub async fn commit(&mut self) -> Result<Vec<Car>, RepositoryError> {
        let changes = std::mem::take(&mut self.pending);
        if changes.is_empty() {
            return Ok(Vec::new());
        }
        self.store.apply(changes).await
    }
}
