//! Field-level patch documents for cars.
//!
//! A patch is an ordered list of operations in the JSON Patch shape
//! (`{"op": "replace", "path": "/modelName", "value": "..."}`). Only the
//! mutable fields of [`Car`] are addressable; `id` is rejected. Operations run
//! against a copy, and the result must pass validation before it is returned.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::Car;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Replace { path: String, value: Value },
    Remove { path: String },
    Test { path: String, value: Value },
    Copy { from: String, path: String },
    Move { from: String, path: String },
}

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("path '{0}' does not name a car field")]
    UnknownPath(String),

    #[error("field '{0}' cannot be modified")]
    ImmutableField(String),

    #[error("value for '{path}' must be {expected}, got {actual}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        actual: Value,
    },

    #[error("test failed at '{path}': expected {expected}, found {actual}")]
    TestFailed {
        path: String,
        expected: Value,
        actual: Value,
    },

    #[error("patched car is invalid: {0}")]
    InvalidResult(#[from] ValidationErrors),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CarField {
    BrandName,
    ModelName,
    YearOfConstruction,
}

impl CarField {
    fn parse(path: &str) -> Result<Self, PatchError> {
        let name = path.strip_prefix('/').unwrap_or(path);
        if name.eq_ignore_ascii_case("brandName") {
            Ok(CarField::BrandName)
        } else if name.eq_ignore_ascii_case("modelName") {
            Ok(CarField::ModelName)
        } else if name.eq_ignore_ascii_case("yearOfConstruction") {
            Ok(CarField::YearOfConstruction)
        } else if name.eq_ignore_ascii_case("id") {
            Err(PatchError::ImmutableField(path.to_string()))
        } else {
            Err(PatchError::UnknownPath(path.to_string()))
        }
    }

    fn get(self, car: &Car) -> Value {
        match self {
            CarField::BrandName => json!(car.brand_name),
            CarField::ModelName => json!(car.model_name),
            CarField::YearOfConstruction => json!(car.year_of_construction),
        }
    }

    fn set(self, car: &mut Car, path: &str, value: &Value) -> Result<(), PatchError> {
        match self {
            CarField::BrandName => car.brand_name = expect_string(path, value)?,
            CarField::ModelName => car.model_name = expect_string(path, value)?,
            CarField::YearOfConstruction => car.year_of_construction = expect_year(path, value)?,
        }
        Ok(())
    }

    /// Resets the field to its empty value, which required fields then fail validation on.
    fn reset(self, car: &mut Car) {
        match self {
            CarField::BrandName => car.brand_name.clear(),
            CarField::ModelName => car.model_name.clear(),
            CarField::YearOfConstruction => car.year_of_construction = 0,
        }
    }
}

fn expect_string(path: &str, value: &Value) -> Result<String, PatchError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| PatchError::TypeMismatch {
            path: path.to_string(),
            expected: "a string",
            actual: value.clone(),
        })
}

fn expect_year(path: &str, value: &Value) -> Result<i32, PatchError> {
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| PatchError::TypeMismatch {
            path: path.to_string(),
            expected: "a 32-bit integer",
            actual: value.clone(),
        })
}

/// Applies `operations` in order to a copy of `car` and validates the outcome.
///
/// The first failing operation aborts the patch; `car` itself is never modified.
pub fn apply_patch(car: &Car, operations: &[PatchOperation]) -> Result<Car, PatchError> {
    let mut patched = car.clone();

    for operation in operations {
        match operation {
            PatchOperation::Add { path, value } | PatchOperation::Replace { path, value } => {
                CarField::parse(path)?.set(&mut patched, path, value)?;
            }
            PatchOperation::Remove { path } => {
                CarField::parse(path)?.reset(&mut patched);
            }
            PatchOperation::Test { path, value } => {
                let actual = CarField::parse(path)?.get(&patched);
                if &actual != value {
                    return Err(PatchError::TestFailed {
                        path: path.clone(),
                        expected: value.clone(),
                        actual,
                    });
                }
            }
            PatchOperation::Copy { from, path } => {
                let value = CarField::parse(from)?.get(&patched);
                CarField::parse(path)?.set(&mut patched, path, &value)?;
            }
            PatchOperation::Move { from, path } => {
                let source = CarField::parse(from)?;
                let target = CarField::parse(path)?;
                let value = source.get(&patched);
                if source != target {
                    target.set(&mut patched, path, &value)?;
                    source.reset(&mut patched);
                }
            }
        }
    }

    patched.validate()?;
    Ok(patched)
}
