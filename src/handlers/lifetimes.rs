//! Shows the three lifetimes a dependency can have.
//!
//! * singleton: one [`Generate`] in [`AppState`] for the whole process
//! * scoped: one per request, inserted into request extensions by [`scope_generate`]
//! * transient: a new one every time [`Transient`] is extracted

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::{self, Next},
    response::{Json, Response},
    routing::get,
    Extension, Router,
};
use serde::Serialize;

use crate::service::Generate;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct Scoped(pub Arc<Generate>);

pub struct Transient(pub Generate);

#[async_trait]
impl<S> FromRequestParts<S> for Transient
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Transient(Generate::new()))
    }
}

pub async fn scope_generate(mut request: Request, next: Next) -> Response {
    request
        .extensions_mut()
        .insert(Scoped(Arc::new(Generate::new())));
    next.run(request).await
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifetimesReport {
    pub singleton: Generate,
    pub scoped: [Generate; 2],
    pub transient: [Generate; 2],
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lifetimes))
        .layer(middleware::from_fn(scope_generate))
}

async fn lifetimes(
    State(state): State<AppState>,
    Extension(Scoped(first_scoped)): Extension<Scoped>,
    Extension(Scoped(second_scoped)): Extension<Scoped>,
    Transient(first_transient): Transient,
    Transient(second_transient): Transient,
) -> Json<LifetimesReport> {
    Json(LifetimesReport {
        singleton: Generate::clone(&state.singleton),
        scoped: [Generate::clone(&first_scoped), Generate::clone(&second_scoped)],
        transient: [first_transient, second_transient],
    })
}
