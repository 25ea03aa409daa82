// libs/appointment-cell/src/services/seed.rs
use chrono::{NaiveDate, NaiveTime};

use crate::models::{Appointment, AppointmentStatus};

struct SeedRow {
    patient: &'static str,
    doctor: &'static str,
    department: &'static str,
    appointment_type: &'static str,
    phone: &'static str,
    time: (u32, u32),
    status: AppointmentStatus,
    expected_duration: u32,
    elapsed_time: u32,
    estimated_wait_time: u32,
}

const SEED_ROWS: &[SeedRow] = &[
    SeedRow {
        patient: "Sarah Johnson",
        doctor: "Dr. Emily Chen",
        department: "Cardiology",
        appointment_type: "Follow-up",
        phone: "+1 (555) 123-4567",
        time: (9, 0),
        status: AppointmentStatus::WithDoctor,
        expected_duration: 30,
        elapsed_time: 12,
        estimated_wait_time: 0,
    },
    SeedRow {
        patient: "Michael Brown",
        doctor: "Dr. Emily Chen",
        department: "Cardiology",
        appointment_type: "Consultation",
        phone: "+1 (555) 234-5678",
        time: (9, 30),
        status: AppointmentStatus::InWaitingRoom,
        expected_duration: 45,
        elapsed_time: 0,
        estimated_wait_time: 15,
    },
    SeedRow {
        patient: "Emma Davis",
        doctor: "Dr. James Wilson",
        department: "Pediatrics",
        appointment_type: "Check-up",
        phone: "+1 (555) 345-6789",
        time: (10, 0),
        status: AppointmentStatus::CheckedIn,
        expected_duration: 20,
        elapsed_time: 0,
        estimated_wait_time: 25,
    },
    SeedRow {
        patient: "Robert Taylor",
        doctor: "Dr. James Wilson",
        department: "Pediatrics",
        appointment_type: "Vaccination",
        phone: "+1 (555) 456-7890",
        time: (10, 30),
        status: AppointmentStatus::Confirmed,
        expected_duration: 15,
        elapsed_time: 0,
        estimated_wait_time: 40,
    },
    SeedRow {
        patient: "Olivia Martinez",
        doctor: "Dr. Sarah Lee",
        department: "Dermatology",
        appointment_type: "Consultation",
        phone: "+1 (555) 567-8901",
        time: (11, 0),
        status: AppointmentStatus::Scheduled,
        expected_duration: 30,
        elapsed_time: 0,
        estimated_wait_time: 60,
    },
    SeedRow {
        patient: "William Anderson",
        doctor: "Dr. Sarah Lee",
        department: "Dermatology",
        appointment_type: "Procedure",
        phone: "+1 (555) 678-9012",
        time: (8, 30),
        status: AppointmentStatus::Completed,
        expected_duration: 40,
        elapsed_time: 42,
        estimated_wait_time: 0,
    },
    SeedRow {
        patient: "Sophia Thomas",
        doctor: "Dr. Michael Park",
        department: "Orthopedics",
        appointment_type: "Telemedicine",
        phone: "+1 (555) 789-0123",
        time: (11, 30),
        status: AppointmentStatus::Cancelled,
        expected_duration: 30,
        elapsed_time: 0,
        estimated_wait_time: 0,
    },
    SeedRow {
        patient: "David Garcia",
        doctor: "Dr. Michael Park",
        department: "Orthopedics",
        appointment_type: "Follow-up",
        phone: "+1 (555) 890-1234",
        time: (12, 0),
        status: AppointmentStatus::InWaitingRoom,
        expected_duration: 30,
        elapsed_time: 0,
        estimated_wait_time: 8,
    },
];

/// Demo appointments for one clinic day, ids 1..=n in seed order.
pub fn demo_appointments(date: NaiveDate) -> Vec<Appointment> {
    SEED_ROWS
        .iter()
        .enumerate()
        .map(|(index, row)| Appointment {
            id: index as u64 + 1,
            patient: row.patient.to_string(),
            doctor: row.doctor.to_string(),
            department: row.department.to_string(),
            appointment_type: row.appointment_type.to_string(),
            phone: row.phone.to_string(),
            date,
            time: NaiveTime::from_hms_opt(row.time.0, row.time.1, 0).unwrap_or(NaiveTime::MIN),
            status: row.status,
            expected_duration: row.expected_duration,
            elapsed_time: row.elapsed_time,
            estimated_wait_time: row.estimated_wait_time,
            queue_position: 0,
        })
        .collect()
}
