// Shared fixtures for appointment-cell tests
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};

use appointment_cell::models::{Appointment, AppointmentStatus};
use appointment_cell::services::lifecycle::SimulationRules;

pub fn clinic_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

pub fn appointment(id: u64, status: AppointmentStatus) -> Appointment {
    Appointment {
        id,
        patient: format!("Patient {}", id),
        doctor: "Dr. Emily Chen".to_string(),
        department: "Cardiology".to_string(),
        appointment_type: "Consultation".to_string(),
        phone: format!("555-010{}", id),
        date: clinic_day(),
        time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        status,
        expected_duration: 30,
        elapsed_time: 0,
        estimated_wait_time: 0,
        queue_position: 0,
    }
}

/// Every chance fires and every random amount is pinned.
pub fn certain_rules() -> SimulationRules {
    SimulationRules {
        confirm_chance: 1.0,
        check_in_chance: 1.0,
        waiting_room_chance: 1.0,
        call_in_chance: 1.0,
        completion_chance: 1.0,
        check_in_drift: (1, 1),
        waiting_decrement: (2, 2),
        ..SimulationRules::default()
    }
}

/// No chance ever fires; only the unconditional rules run.
pub fn stalled_rules() -> SimulationRules {
    SimulationRules {
        confirm_chance: 0.0,
        check_in_chance: 0.0,
        waiting_room_chance: 0.0,
        call_in_chance: 0.0,
        completion_chance: 0.0,
        check_in_drift: (1, 1),
        waiting_decrement: (2, 2),
        ..SimulationRules::default()
    }
}
