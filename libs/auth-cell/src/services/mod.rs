pub mod directory;
pub mod session;

pub use directory::*;
pub use session::*;
