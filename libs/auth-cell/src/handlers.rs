use std::sync::Arc;

use axum::{
    extract::{State, Json},
};
use serde_json::{json, Value};

use shared_models::auth::UserProfile;
use shared_models::error::AppError;
use shared_utils::session::ProfileStore;

use crate::models::{AuthError, LoginRequest};
use crate::services::SessionService;

fn into_app_error(error: AuthError) -> AppError {
    match error {
        AuthError::UnknownUser(_) => AppError::Auth(error.to_string()),
        AuthError::MissingPassword => AppError::ValidationError(error.to_string()),
        AuthError::Session(e) => AppError::Internal(e.to_string()),
    }
}

pub async fn login(
    State(store): State<Arc<ProfileStore>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = SessionService::new(store)
        .login(request)
        .await
        .map_err(into_app_error)?;

    Ok(Json(profile))
}

pub async fn logout(
    State(store): State<Arc<ProfileStore>>,
) -> Result<Json<Value>, AppError> {
    let was_signed_in = SessionService::new(store)
        .logout()
        .await
        .map_err(into_app_error)?;

    Ok(Json(json!({ "signed_out": was_signed_in })))
}

pub async fn current_user(
    State(store): State<Arc<ProfileStore>>,
) -> Result<Json<UserProfile>, AppError> {
    SessionService::new(store)
        .current()
        .await
        .map(Json)
        .ok_or_else(|| AppError::Auth("Not signed in".to_string()))
}
