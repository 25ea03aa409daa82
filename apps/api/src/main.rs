use std::sync::Arc;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::{self, TraceLayer};
use tracing::{Level, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use appointment_cell::services::lifecycle::AppointmentLifecycleService;
use appointment_cell::services::seed::demo_appointments;
use appointment_cell::services::simulation::SimulationService;
use appointment_cell::services::tracker::AppointmentTracker;
use appointment_cell::AppointmentState;
use shared_config::AppConfig;
use shared_utils::session::ProfileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting clinic dashboard API server");

    // Load configuration
    let config = AppConfig::from_env();

    // Restore the signed-in profile, if any
    let sessions = Arc::new(ProfileStore::new(config.profile_store_path.clone()));
    match sessions.load().await {
        Some(profile) => info!("Restored session for {} ({})", profile.email, profile.role),
        None => info!("No stored session, starting signed out"),
    }

    // Appointment store
    let appointments = if config.seed_demo_data {
        demo_appointments(chrono::Local::now().date_naive())
    } else {
        Vec::new()
    };
    let tracker = Arc::new(AppointmentTracker::with_appointments(
        AppointmentLifecycleService::new(),
        config.reconcile_queue,
        appointments,
    ));
    info!("Tracking {} appointments", tracker.len().await);

    let simulation = if config.simulation_enabled {
        Some(
            SimulationService::new(tracker.clone(), config.tick_interval())
                .with_seed(config.simulation_seed)
                .spawn(),
        )
    } else {
        warn!("Appointment simulation disabled");
        None
    };

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = Arc::new(AppointmentState::new(tracker, sessions));

    // Build the application router
    let app = router::create_router(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new()
                    .level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new()
                    .level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(simulation) = simulation {
        simulation.stop().await;
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
