pub mod predict;
pub mod root;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::root_handler))
        .route("/predict", post(predict::handle_predict))
        .with_state(state)
}
