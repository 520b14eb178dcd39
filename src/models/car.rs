use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A car as persisted by the store. `id` is assigned on commit and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: i32,
    #[validate(length(min = 1, max = 100))]
    pub brand_name: String,
    #[validate(length(min = 1, max = 100))]
    pub model_name: String,
    #[validate(range(min = 1886, max = 2100))]
    pub year_of_construction: i32,
}

impl Car {
    /// Overwrites every mutable field. Identity is left untouched.
    pub fn replace_with(&mut self, replacement: CarReplacement) {
        self.brand_name = replacement.brand_name;
        self.model_name = replacement.model_name;
        self.year_of_construction = replacement.year_of_construction;
    }
}

/// Body accepted by `POST /cars`. Clients cannot choose an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCar {
    #[validate(length(min = 1, max = 100))]
    pub brand_name: String,
    #[validate(length(min = 1, max = 100))]
    pub model_name: String,
    #[validate(range(min = 1886, max = 2100))]
    pub year_of_construction: i32,
}

impl NewCar {
    pub fn into_car(self, id: i32) -> Car {
        Car {
            id,
            brand_name: self.brand_name,
            model_name: self.model_name,
            year_of_construction: self.year_of_construction,
        }
    }
}

/// Body accepted by `PUT /cars/{id}`. `id` must repeat the path identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CarReplacement {
    pub id: i32,
    #[validate(length(min = 1, max = 100))]
    pub brand_name: String,
    #[validate(length(min = 1, max = 100))]
    pub model_name: String,
    #[validate(range(min = 1886, max = 2100))]
    pub year_of_construction: i32,
}
