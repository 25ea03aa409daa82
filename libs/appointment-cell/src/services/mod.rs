pub mod lifecycle;
pub mod tracker;
pub mod simulation;
pub mod stats;
pub mod export;
pub mod seed;

pub use lifecycle::*;
pub use tracker::*;
pub use simulation::*;
pub use stats::*;
pub use export::*;
pub use seed::demo_appointments;
