use serde::{Deserialize, Serialize};

use super::Car;

/// Client-facing projection of a [`Car`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDto {
    pub id: i32,
    pub brand_name: String,
    pub model_name: String,
    pub year_of_construction: i32,
}

impl From<&Car> for CarDto {
    fn from(car: &Car) -> Self {
        Self {
            id: car.id,
            brand_name: car.brand_name.clone(),
            model_name: car.model_name.clone(),
            year_of_construction: car.year_of_construction,
        }
    }
}

impl From<Car> for CarDto {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            brand_name: car.brand_name,
            model_name: car.model_name,
            year_of_construction: car.year_of_construction,
        }
    }
}
