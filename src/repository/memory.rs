use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CarStore, ChangeSet, RepositoryError};
use crate::models::{Car, ResourceParameters};

#[derive(Debug)]
struct MemoryState {
    cars: BTreeMap<i32, Car>,
    next_id: i32,
}

/// Map-backed store. Each change set is applied under a single write lock.
#[derive(Debug)]
pub struct InMemoryCarStore {
    state: RwLock<MemoryState>,
}

impl InMemoryCarStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                cars: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryCarStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CarStore for InMemoryCarStore {
    async fn list(&self, params: &ResourceParameters) -> Result<Vec<Car>, RepositoryError> {
        let state = self.state.read().await;
        let matching = state
            .cars
            .values()
            .filter(|car| {
                params
                    .brand_name
                    .as_deref()
                    .map_or(true, |brand| car.brand_name == brand)
            })
            .cloned();

        let cars = match params.page_window() {
            Some((offset, limit)) => matching
                .skip(offset as usize)
                .take(limit as usize)
                .collect(),
            None => matching.collect(),
        };
        Ok(cars)
    }

    async fn find(&self, id: i32) -> Result<Option<Car>, RepositoryError> {
        Ok(self.state.read().await.cars.get(&id).cloned())
    }

    async fn apply(&self, changes: ChangeSet) -> Result<Vec<Car>, RepositoryError> {
        let mut state = self.state.write().await;

        // Work on a copy so a failing change set leaves the store untouched.
        let mut cars = state.cars.clone();
        let mut next_id = state.next_id;

        for id in &changes.deletes {
            if cars.remove(id).is_none() {
                return Err(RepositoryError::MissingRow(*id));
            }
        }

        for car in changes.updates {
            match cars.get_mut(&car.id) {
                Some(stored) => *stored = car,
                None => return Err(RepositoryError::MissingRow(car.id)),
            }
        }

        let mut created = Vec::with_capacity(changes.inserts.len());
        for new_car in changes.inserts {
            let car = new_car.into_car(next_id);
            next_id += 1;
            cars.insert(car.id, car.clone());
            created.push(car);
        }

        state.cars = cars;
        state.next_id = next_id;
        Ok(created)
    }
}
