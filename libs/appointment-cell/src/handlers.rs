// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State, Extension},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::auth::UserProfile;
use shared_models::error::AppError;
use shared_utils::session::ProfileStore;

use crate::models::{
    AppointmentError, AppointmentFilter, AppointmentId, CreateAppointmentRequest,
    DeleteAppointmentQuery, UpdateStatusRequest,
};
use crate::services::export::export_filename;
use crate::services::tracker::AppointmentTracker;

/// Shared state for the appointment routes.
pub struct AppointmentState {
    pub tracker: Arc<AppointmentTracker>,
    pub sessions: Arc<ProfileStore>,
}

impl AppointmentState {
    pub fn new(tracker: Arc<AppointmentTracker>, sessions: Arc<ProfileStore>) -> Self {
        Self { tracker, sessions }
    }
}

fn into_app_error(error: AppointmentError) -> AppError {
    match error {
        AppointmentError::NotFound(_) => AppError::NotFound(error.to_string()),
        AppointmentError::DeletionNotConfirmed(_) => {
            AppError::BadRequest("Deletion must be confirmed with confirm=true".to_string())
        }
        AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
    }
}

fn require_manager(profile: &UserProfile) -> Result<(), AppError> {
    if profile.role.can_manage_appointments() {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Role {} cannot modify appointments",
            profile.role
        )))
    }
}

/// Fetches a record and hides it when it falls outside the caller's view.
async fn visible_appointment(
    state: &AppointmentState,
    profile: &UserProfile,
    appointment_id: AppointmentId,
) -> Result<crate::models::Appointment, AppError> {
    let appointment = state.tracker.get(appointment_id).await.map_err(into_app_error)?;

    if !AppointmentFilter::default().scoped_to(profile).matches(&appointment) {
        return Err(into_app_error(AppointmentError::NotFound(appointment_id)));
    }

    Ok(appointment)
}

// ==============================================================================
// LISTING AND LOOKUP
// ==============================================================================

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppointmentState>>,
    Extension(profile): Extension<UserProfile>,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Json<Value>, AppError> {
    let filter = filter.scoped_to(&profile);
    let appointments = state.tracker.list(&filter).await;

    debug!("Listing {} appointments for {} ({})", appointments.len(), profile.email, profile.role);

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppointmentState>>,
    Extension(profile): Extension<UserProfile>,
    Path(appointment_id): Path<AppointmentId>,
) -> Result<Json<Value>, AppError> {
    let appointment = visible_appointment(&state, &profile, appointment_id).await?;
    Ok(Json(json!(appointment)))
}

// ==============================================================================
// MUTATIONS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppointmentState>>,
    Extension(profile): Extension<UserProfile>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    require_manager(&profile)?;

    let appointment = state.tracker.create(request).await.map_err(into_app_error)?;

    Ok((StatusCode::CREATED, Json(json!(appointment))))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppointmentState>>,
    Extension(profile): Extension<UserProfile>,
    Path(appointment_id): Path<AppointmentId>,
    Query(query): Query<DeleteAppointmentQuery>,
) -> Result<Json<Value>, AppError> {
    require_manager(&profile)?;
    visible_appointment(&state, &profile, appointment_id).await?;

    let removed = state
        .tracker
        .delete(appointment_id, query.confirm.unwrap_or(false))
        .await
        .map_err(into_app_error)?;

    Ok(Json(json!({
        "success": true,
        "deleted": removed
    })))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppointmentState>>,
    Extension(profile): Extension<UserProfile>,
    Path(appointment_id): Path<AppointmentId>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    require_manager(&profile)?;
    visible_appointment(&state, &profile, appointment_id).await?;

    let appointment = state
        .tracker
        .override_status(appointment_id, request.status)
        .await
        .map_err(into_app_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn complete_appointment(
    State(state): State<Arc<AppointmentState>>,
    Extension(profile): Extension<UserProfile>,
    Path(appointment_id): Path<AppointmentId>,
) -> Result<Json<Value>, AppError> {
    require_manager(&profile)?;
    visible_appointment(&state, &profile, appointment_id).await?;

    let appointment = state
        .tracker
        .mark_complete(appointment_id)
        .await
        .map_err(into_app_error)?;

    Ok(Json(json!(appointment)))
}

// ==============================================================================
// DERIVED VIEWS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_appointment_stats(
    State(state): State<Arc<AppointmentState>>,
    Extension(profile): Extension<UserProfile>,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Json<Value>, AppError> {
    let stats = state.tracker.stats(&filter.scoped_to(&profile)).await;
    Ok(Json(json!(stats)))
}

#[axum::debug_handler]
pub async fn get_queue_board(
    State(state): State<Arc<AppointmentState>>,
    Extension(profile): Extension<UserProfile>,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Json<Value>, AppError> {
    let board = state.tracker.queue_board(&filter.scoped_to(&profile)).await;
    Ok(Json(json!({
        "doctors": board
    })))
}

#[axum::debug_handler]
pub async fn export_appointments(
    State(state): State<Arc<AppointmentState>>,
    Extension(profile): Extension<UserProfile>,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Response, AppError> {
    let csv = state.tracker.export_csv(&filter.scoped_to(&profile)).await;
    let filename = export_filename(chrono::Local::now().date_naive());

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
    ];

    Ok((headers, csv).into_response())
}
