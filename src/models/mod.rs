pub mod car;
pub mod dto;
pub mod params;

pub use car::{Car, CarReplacement, NewCar};
pub use dto::CarDto;
pub use params::ResourceParameters;
