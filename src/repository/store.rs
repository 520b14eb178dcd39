use async_trait::async_trait;

use super::RepositoryError;
use crate::models::{Car, NewCar, ResourceParameters};

/// Changes staged by a [`CarsRepository`](super::CarsRepository) and applied in one commit.
///
/// Deletes are applied first, then updates, then inserts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub inserts: Vec<NewCar>,
    pub updates: Vec<Car>,
    pub deletes: Vec<i32>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.updates.is_empty() && self.deletes.is_empty()
    }
}

/// Backend holding the authoritative copy of every car.
#[async_trait]
pub trait CarStore: Send + Sync {
    async fn list(&self, params: &ResourceParameters) -> Result<Vec<Car>, RepositoryError>;

    async fn find(&self, id: i32) -> Result<Option<Car>, RepositoryError>;

    /// Applies `changes` all-or-nothing and returns the inserted cars with their new ids.
    ///
    /// An update or delete that targets a missing row fails the whole set with
    /// [`RepositoryError::MissingRow`].
    async fn apply(&self, changes: ChangeSet) -> Result<Vec<Car>, RepositoryError>;
}
