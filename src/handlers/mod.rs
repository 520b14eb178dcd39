pub mod cars;
pub mod health;
pub mod lifetimes;


use axum::{middleware, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth;
use crate::constants::{CARS_PATH, LIFETIMES_PATH};
use crate::state::AppState;

/// Builds the full application router. Only the cars routes require authorization.
pub fn app(state: AppState) -> Router {
    let cars = cars::router().route_layer(middleware::from_fn_with_state(
        state.auth.clone(),
        auth::require_role,
    ));

    Router::new()
        .nest(CARS_PATH, cars)
        .nest(LIFETIMES_PATH, lifetimes::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
