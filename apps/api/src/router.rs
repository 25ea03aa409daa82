use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::{appointment_routes, AppointmentState};
use auth_cell::router::auth_routes;

pub fn create_router(state: Arc<AppointmentState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic dashboard API is running!" }))
        .nest("/auth", auth_routes(state.sessions.clone()))
        .nest("/appointments", appointment_routes(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{Request, StatusCode}};
    use tower::ServiceExt;

    use appointment_cell::services::lifecycle::AppointmentLifecycleService;
    use appointment_cell::services::tracker::AppointmentTracker;
    use shared_utils::session::ProfileStore;

    fn state(dir: &tempfile::TempDir) -> Arc<AppointmentState> {
        Arc::new(AppointmentState::new(
            Arc::new(AppointmentTracker::new(AppointmentLifecycleService::new(), true)),
            Arc::new(ProfileStore::new(dir.path().join("session.json"))),
        ))
    }

    #[tokio::test]
    async fn test_root_responds() {
        let dir = tempfile::tempdir().unwrap();
        let response = create_router(state(&dir))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_appointments_need_login_then_work() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);

        let response = create_router(state.clone())
            .oneshot(Request::builder().uri("/appointments/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let login = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"email":"admin@clinic.com","password":"demo"}"#))
            .unwrap();
        let response = create_router(state.clone()).oneshot(login).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = create_router(state)
            .oneshot(Request::builder().uri("/appointments/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
