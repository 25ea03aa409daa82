// libs/appointment-cell/src/services/stats.rs
use std::collections::BTreeMap;

use crate::models::{Appointment, AppointmentStatus, DashboardStats, DoctorQueue, QueueEntry};

/// Dashboard aggregates, recomputed from scratch on every call.
pub fn compute_stats(appointments: &[Appointment]) -> DashboardStats {
    let mut by_status: BTreeMap<AppointmentStatus, usize> =
        AppointmentStatus::ALL.iter().map(|s| (*s, 0)).collect();
    let mut by_department: BTreeMap<String, usize> = BTreeMap::new();

    for appointment in appointments {
        *by_status.entry(appointment.status).or_default() += 1;
        *by_department.entry(appointment.department.clone()).or_default() += 1;
    }

    let waiting: Vec<&Appointment> = appointments.iter().filter(|a| a.is_waiting()).collect();
    let consulting: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::WithDoctor)
        .collect();

    let count = |status: AppointmentStatus| by_status.get(&status).copied().unwrap_or(0);
    let completed = count(AppointmentStatus::Completed);
    let cancelled = count(AppointmentStatus::Cancelled);
    let no_show = count(AppointmentStatus::NoShow);
    let concluded = completed + cancelled + no_show;

    DashboardStats {
        total_appointments: appointments.len(),
        waiting_patients: waiting.len(),
        with_doctor: consulting.len(),
        completed_appointments: completed,
        cancelled_appointments: cancelled,
        no_show_appointments: no_show,
        average_wait_minutes: average(waiting.iter().map(|a| a.estimated_wait_time)),
        longest_wait_minutes: waiting.iter().map(|a| a.estimated_wait_time).max().unwrap_or(0),
        average_consultation_minutes: average(consulting.iter().map(|a| a.elapsed_time)),
        completion_rate: if concluded > 0 {
            (completed as f64 / concluded as f64) * 100.0
        } else {
            0.0
        },
        by_status,
        by_department,
    }
}

fn average(values: impl Iterator<Item = u32>) -> f64 {
    let (sum, n) = values.fold((0u64, 0u64), |(sum, n), v| (sum + v as u64, n + 1));
    if n == 0 {
        0.0
    } else {
        sum as f64 / n as f64
    }
}

/// Live board of each doctor's current patient and waiting line.
///
/// Doctors with nobody waiting and nobody in consultation are left out.
pub fn queue_board(appointments: &[Appointment]) -> Vec<DoctorQueue> {
    let mut board: BTreeMap<&str, DoctorQueue> = BTreeMap::new();

    for appointment in appointments {
        let consulting = appointment.status == AppointmentStatus::WithDoctor;
        if !consulting && !appointment.is_waiting() {
            continue;
        }

        let queue = board.entry(appointment.doctor.as_str()).or_insert_with(|| DoctorQueue {
            doctor: appointment.doctor.clone(),
            department: appointment.department.clone(),
            current_patient: None,
            waiting: Vec::new(),
        });

        if consulting {
            if queue.current_patient.is_none() {
                queue.current_patient = Some(appointment.patient.clone());
            }
        } else {
            queue.waiting.push(QueueEntry {
                appointment_id: appointment.id,
                patient: appointment.patient.clone(),
                status: appointment.status,
                queue_position: appointment.queue_position,
                estimated_wait_time: appointment.estimated_wait_time,
            });
        }
    }

    board
        .into_values()
        .map(|mut queue| {
            // Unranked entries (position 0) go last
            queue
                .waiting
                .sort_by_key(|e| (e.queue_position == 0, e.queue_position, e.estimated_wait_time));
            queue
        })
        .collect()
}
