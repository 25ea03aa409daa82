pub mod models;
pub mod services;
pub mod handlers;
pub mod router;

pub use models::*;
pub use services::*;
pub use handlers::AppointmentState;
pub use router::appointment_routes;
