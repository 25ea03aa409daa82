use std::sync::Arc;

use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
    body::Body,
};

use shared_models::error::AppError;

use crate::session::ProfileStore;

// Middleware that requires a stored profile and exposes it to handlers
pub async fn session_middleware(
    State(store): State<Arc<ProfileStore>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let profile = store
        .load()
        .await
        .ok_or_else(|| AppError::Auth("Not signed in".to_string()))?;

    request.extensions_mut().insert(profile);

    Ok(next.run(request).await)
}

