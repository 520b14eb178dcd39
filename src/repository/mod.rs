pub mod car_repo;
pub mod cars_repository;
pub mod errors;
pub mod memory;
pub mod store;

pub use car_repo::PgCarStore;
pub use cars_repository::CarsRepository;
pub use errors::RepositoryError;
pub use memory::InMemoryCarStore;
pub use store::{CarStore, ChangeSet};
