use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_utils::session::SessionError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No account registered for {0}")]
    UnknownUser(String),

    #[error("Password is required")]
    MissingPassword,

    #[error(transparent)]
    Session(#[from] SessionError),
}
