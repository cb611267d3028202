use axum::{routing::get, Router};

use super::handlers::probes::livez;
use super::handlers::ui;
use super::state::AppState;

pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::list))
        .route("/jobs/:id", get(ui::detail))
        .route("/livez", get(livez))
        .with_state(state)
}
