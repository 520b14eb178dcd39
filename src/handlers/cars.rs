use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Extension, Router,
};
use validator::Validate;

use crate::auth::Principal;
use crate::constants::{API_NAME, CARS_PATH};
use crate::error::AppError;
use crate::models::{Car, CarDto, CarReplacement, NewCar, ResourceParameters};
use crate::repository::CarsRepository;
use crate::service::{apply_patch, PatchOperation};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route(
            "/:id",
            get(get_car)
                .put(replace_car)
                .patch(patch_car)
                .delete(delete_car),
        )
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("car {}", id))
}

async fn list_cars(
    repo: CarsRepository,
    query: Result<Query<ResourceParameters>, QueryRejection>,
) -> Result<Json<Vec<CarDto>>, AppError> {
    let Query(params) = query?;
    params.validate()?;

    let cars = repo.list_all(&params).await?;
    tracing::info!("{} Listing {} car(s)", API_NAME, cars.len());

    Ok(Json(cars.into_iter().map(CarDto::from).collect()))
}

async fn get_car(
    repo: CarsRepository,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<CarDto>, AppError> {
    let Path(id) = path?;
    let car = repo.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(car.into()))
}

async fn replace_car(
    mut repo: CarsRepository,
    Extension(principal): Extension<Principal>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<CarReplacement>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    let Json(replacement) = body?;
    if replacement.id != id {
        return Err(AppError::InvalidInput(format!(
            "body id {} does not match path id {}",
            replacement.id, id
        )));
    }
    replacement.validate()?;

    let mut car = repo.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    car.replace_with(replacement);

    repo.update(car);
    repo.commit().await?;

    tracing::info!("{} Replaced car: {} (by {})", API_NAME, id, principal.subject);
    Ok(StatusCode::NO_CONTENT)
}

async fn patch_car(
    mut repo: CarsRepository,
    Extension(principal): Extension<Principal>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<Vec<PatchOperation>>, JsonRejection>,
) -> Result<Json<Car>, AppError> {
    let Path(id) = path?;
    let car = repo.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    let Json(operations) = body?;

    let patched = apply_patch(&car, &operations)?;

    repo.update(patched.clone());
    repo.commit().await?;

    tracing::info!(
        "{} Patched car {} with {} operation(s) (by {})",
        API_NAME,
        id,
        operations.len(),
        principal.subject
    );
    Ok(Json(patched))
}

async fn create_car(
    mut repo: CarsRepository,
    Extension(principal): Extension<Principal>,
    body: Result<Json<NewCar>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(new_car) = body?;
    new_car.validate()?;

    repo.add(new_car);
    let car = repo
        .commit()
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("store returned no created car")))?;

    tracing::info!("{} Created car: {} (by {})", API_NAME, car.id, principal.subject);

    let location = format!("{}/{}", CARS_PATH, car.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(car)))
}

async fn delete_car(
    mut repo: CarsRepository,
    Extension(principal): Extension<Principal>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    let car = repo.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

    repo.remove(car);
    repo.commit().await?;

    tracing::info!("{} Deleted car: {} (by {})", API_NAME, id, principal.subject);
    Ok(StatusCode::NO_CONTENT)
}
