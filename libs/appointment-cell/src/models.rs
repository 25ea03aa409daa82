// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use std::fmt;

use shared_models::auth::{UserProfile, UserRole};

pub type AppointmentId = u64;

pub const DEFAULT_EXPECTED_DURATION: u32 = 30;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient: String,
    pub doctor: String,
    pub department: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub phone: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    #[serde(with = "time_format")]
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    /// Planned consultation length in minutes. Fixed at creation.
    pub expected_duration: u32,
    /// Minutes spent with the doctor so far.
    pub elapsed_time: u32,
    pub estimated_wait_time: u32,
    /// Rank among waiting patients of the same doctor, 0 when not queued.
    pub queue_position: u32,
}

impl Appointment {
    pub fn is_waiting(&self) -> bool {
        self.status.is_waiting()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    CheckedIn,
    InWaitingRoom,
    WithDoctor,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 9] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::CheckedIn,
        AppointmentStatus::InWaitingRoom,
        AppointmentStatus::WithDoctor,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    /// No simulated transition ever leaves a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }

    /// Statuses for which wait time and queue position carry meaning.
    pub fn is_waiting(&self) -> bool {
        matches!(self, AppointmentStatus::CheckedIn | AppointmentStatus::InWaitingRoom)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::CheckedIn => write!(f, "checked_in"),
            AppointmentStatus::InWaitingRoom => write!(f, "in_waiting_room"),
            AppointmentStatus::WithDoctor => write!(f, "with_doctor"),
            AppointmentStatus::InProgress => write!(f, "in_progress"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::NoShow => write!(f, "no_show"),
        }
    }
}

mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

mod time_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    // Accepts "09:30" as well as "09:30:00"
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

pub use date_format::FORMAT as DATE_FORMAT;
pub use time_format::FORMAT as TIME_FORMAT;

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient: String,
    pub doctor: String,
    pub department: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    #[serde(default)]
    pub phone: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    #[serde(with = "time_format")]
    pub time: NaiveTime,
    pub status: Option<AppointmentStatus>,
    pub expected_duration: Option<u32>,
    pub estimated_wait_time: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteAppointmentQuery {
    pub confirm: Option<bool>,
}

/// Visible-set filter shared by listings, stats and CSV export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub department: Option<String>,
    pub doctor: Option<String>,
    pub patient: Option<String>,
    pub date: Option<NaiveDate>,
    /// Case-insensitive substring over patient, doctor and type.
    pub search: Option<String>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        if self.status.is_some_and(|s| s != appointment.status) {
            return false;
        }
        if let Some(department) = &self.department {
            if !appointment.department.eq_ignore_ascii_case(department) {
                return false;
            }
        }
        if let Some(doctor) = &self.doctor {
            if appointment.doctor != *doctor {
                return false;
            }
        }
        if let Some(patient) = &self.patient {
            if appointment.patient != *patient {
                return false;
            }
        }
        if self.date.is_some_and(|d| d != appointment.date) {
            return false;
        }
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            let hit = [&appointment.patient, &appointment.doctor, &appointment.appointment_type]
                .iter()
                .any(|field| field.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }
        true
    }

    /// Narrows the filter to what the given profile is allowed to see.
    ///
    /// Super admins see every record, clinic staff see their department (or
    /// everything when they have none), patients see only their own bookings.
    pub fn scoped_to(mut self, profile: &UserProfile) -> Self {
        match profile.role {
            UserRole::SuperAdmin => {}
            UserRole::ClinicStaff => {
                if let Some(department) = &profile.department {
                    self.department = Some(department.clone());
                }
            }
            UserRole::Patient => {
                self.patient = Some(profile.name.clone());
            }
        }
        self
    }
}

// ==============================================================================
// STATISTICS AND SUMMARY MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub total_appointments: usize,
    pub by_status: BTreeMap<AppointmentStatus, usize>,
    pub by_department: BTreeMap<String, usize>,
    pub waiting_patients: usize,
    pub with_doctor: usize,
    pub completed_appointments: usize,
    pub cancelled_appointments: usize,
    pub no_show_appointments: usize,
    pub average_wait_minutes: f64,
    pub longest_wait_minutes: u32,
    pub average_consultation_minutes: f64,
    /// Share of terminal appointments that were completed, in percent.
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueEntry {
    pub appointment_id: AppointmentId,
    pub patient: String,
    pub status: AppointmentStatus,
    pub queue_position: u32,
    pub estimated_wait_time: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorQueue {
    pub doctor: String,
    pub department: String,
    pub current_patient: Option<String>,
    pub waiting: Vec<QueueEntry>,
}

// ==============================================================================
// SIMULATION MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusTransition {
    pub appointment_id: AppointmentId,
    pub from: AppointmentStatus,
    pub to: AppointmentStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Records whose fields changed during the tick, queue re-ranking included.
    pub updated: usize,
    pub transitions: Vec<StatusTransition>,
}

/// Change notifications published by the tracker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrackerEvent {
    Ticked(TickReport),
    Created { appointment_id: AppointmentId },
    Deleted { appointment_id: AppointmentId },
    StatusOverridden(StatusTransition),
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error, PartialEq)]
pub enum AppointmentError {
    #[error("Appointment {0} not found")]
    NotFound(AppointmentId),

    #[error("Deletion of appointment {0} was not confirmed")]
    DeletionNotConfirmed(AppointmentId),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
