pub mod api;
pub mod trips;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.static_dir);
    Router::new()
        .merge(trips::router())
        .nest("/api", api::router())
        .nest_service("/static", static_dir)
        .with_state(state)
}
