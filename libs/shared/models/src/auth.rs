use std::fmt;

use serde::{Deserialize, Serialize};

/// Dashboard role. Each role gets its own view over the appointment board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    ClinicStaff,
    Patient,
}

impl UserRole {
    /// Whether this role may change appointments (create, override, delete).
    pub fn can_manage_appointments(&self) -> bool {
        matches!(self, UserRole::SuperAdmin | UserRole::ClinicStaff)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::SuperAdmin => write!(f, "super_admin"),
            UserRole::ClinicStaff => write!(f, "clinic_staff"),
            UserRole::Patient => write!(f, "patient"),
        }
    }
}

/// The signed-in user, as kept in the session store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}
