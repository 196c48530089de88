use axum::Router;

use crate::AppState;

mod error;
mod handlers;
mod routes;

pub use error::AppError;

/// Builds the service router. API routes are nested under `api_prefix`
/// (an empty prefix mounts them at the root); `/health` always sits at the
/// root.
pub fn router(state: AppState, api_prefix: &str) -> Router {
    let api = if api_prefix.is_empty() {
        routes::posts()
    } else {
        Router::new().nest(api_prefix, routes::posts())
    };

    Router::new()
        .merge(routes::health())
        .merge(api)
        .with_state(state)
}
