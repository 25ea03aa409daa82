use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_utils::session::ProfileStore;

use crate::handlers;

pub fn auth_routes(store: Arc<ProfileStore>) -> Router {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/me", get(handlers::current_user))
        .with_state(store)
}
