use std::convert::Infallible;
use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::auth::JwtAuth;
use crate::repository::{CarStore, CarsRepository};
use crate::service::Generate;

/// Process-wide dependencies, shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CarStore>,
    pub auth: Arc<JwtAuth>,
    pub singleton: Arc<Generate>,
}

impl AppState {
    pub fn new(store: Arc<dyn CarStore>, auth: JwtAuth) -> Self {
        Self {
            store,
            auth: Arc::new(auth),
            singleton: Arc::new(Generate::new()),
        }
    }
}

/// Each handler invocation gets a fresh unit of work over the shared store.
#[async_trait]
impl FromRequestParts<AppState> for CarsRepository {
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(CarsRepository::new(state.store.clone()))
    }
}
