// libs/appointment-cell/src/services/tracker.rs
use std::collections::HashMap;

use rand::Rng;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, instrument, warn};

use crate::models::{
    Appointment, AppointmentError, AppointmentFilter, AppointmentId, AppointmentStatus,
    CreateAppointmentRequest, DashboardStats, DoctorQueue, StatusTransition, TickReport,
    TrackerEvent, DEFAULT_EXPECTED_DURATION,
};
use crate::services::export::export_csv;
use crate::services::lifecycle::AppointmentLifecycleService;
use crate::services::stats::{compute_stats, queue_board};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Runs one tick over the whole collection, in collection order.
///
/// Returns a changed flag per record alongside the status transitions.
pub fn advance_all<R: Rng + ?Sized>(
    lifecycle: &AppointmentLifecycleService,
    appointments: &mut [Appointment],
    rng: &mut R,
) -> (Vec<bool>, Vec<StatusTransition>) {
    let mut changed = Vec::with_capacity(appointments.len());
    let mut transitions = Vec::new();

    for appointment in appointments.iter_mut() {
        let outcome = lifecycle.step(appointment, rng);
        changed.push(outcome.changed || outcome.transition.is_some());
        transitions.extend(outcome.transition);
    }

    (changed, transitions)
}

/// Re-ranks waiting patients per doctor so positions run 1..n without gaps.
///
/// Patients already in the waiting room go ahead of those just checked in,
/// then shorter waits first; ties keep collection order. Returns how many
/// records got a new position.
pub fn reconcile_queue_positions(appointments: &mut [Appointment]) -> usize {
    let mut queues: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, appointment) in appointments.iter().enumerate() {
        if appointment.is_waiting() {
            queues.entry(appointment.doctor.as_str()).or_default().push(index);
        }
    }

    let mut ranked: Vec<(usize, u32)> = Vec::new();
    for mut indices in queues.into_values() {
        indices.sort_by_key(|&i| {
            let a = &appointments[i];
            let stage = if a.status == AppointmentStatus::InWaitingRoom { 0 } else { 1 };
            (stage, a.estimated_wait_time)
        });
        ranked.extend(indices.into_iter().enumerate().map(|(rank, i)| (i, rank as u32 + 1)));
    }

    let mut moved = 0;
    for (index, position) in ranked {
        let appointment = &mut appointments[index];
        if appointment.queue_position != position {
            appointment.queue_position = position;
            moved += 1;
        }
    }
    moved
}

/// Removes the record with `id`, keeping the relative order of the rest.
pub fn remove_by_id(appointments: &mut Vec<Appointment>, id: AppointmentId) -> Option<Appointment> {
    let index = appointments.iter().position(|a| a.id == id)?;
    Some(appointments.remove(index))
}

#[derive(Debug)]
struct TrackerState {
    appointments: Vec<Appointment>,
    next_id: AppointmentId,
    ticks: u64,
}

/// The single owned appointment store.
///
/// Every writer (simulation tick, status override, create, delete) goes
/// through these methods, so each mutation completes under one write lock.
#[derive(Debug)]
pub struct AppointmentTracker {
    state: RwLock<TrackerState>,
    lifecycle: AppointmentLifecycleService,
    reconcile_queue: bool,
    events: broadcast::Sender<TrackerEvent>,
}

impl AppointmentTracker {
    pub fn new(lifecycle: AppointmentLifecycleService, reconcile_queue: bool) -> Self {
        Self::with_appointments(lifecycle, reconcile_queue, Vec::new())
    }

    /// Builds a tracker around existing records. Ids are kept as given and new
    /// ids continue after the largest one.
    pub fn with_appointments(
        lifecycle: AppointmentLifecycleService,
        reconcile_queue: bool,
        mut appointments: Vec<Appointment>,
    ) -> Self {
        let next_id = appointments.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        if reconcile_queue {
            reconcile_queue_positions(&mut appointments);
        }

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(TrackerState {
                appointments,
                next_id,
                ticks: 0,
            }),
            lifecycle,
            reconcile_queue,
            events,
        }
    }

    pub fn lifecycle(&self) -> &AppointmentLifecycleService {
        &self.lifecycle
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: TrackerEvent) {
        // No receivers is the normal case when nobody is watching
        let _ = self.events.send(event);
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.appointments.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn tick_count(&self) -> u64 {
        self.state.read().await.ticks
    }

    /// Current records in collection order.
    pub async fn snapshot(&self) -> Vec<Appointment> {
        self.state.read().await.appointments.clone()
    }

    pub async fn list(&self, filter: &AppointmentFilter) -> Vec<Appointment> {
        let state = self.state.read().await;
        state
            .appointments
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: AppointmentId) -> Result<Appointment, AppointmentError> {
        let state = self.state.read().await;
        state
            .appointments
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(AppointmentError::NotFound(id))
    }

    #[instrument(skip(self, request), fields(patient = %request.patient))]
    pub async fn create(&self, request: CreateAppointmentRequest) -> Result<Appointment, AppointmentError> {
        let status = request.status.unwrap_or(AppointmentStatus::Confirmed);
        let estimated_wait_time = request.estimated_wait_time.unwrap_or(0);

        let appointment = {
            let mut state = self.state.write().await;
            let appointment = Appointment {
                id: state.next_id,
                patient: request.patient,
                doctor: request.doctor,
                department: request.department,
                appointment_type: request.appointment_type,
                phone: request.phone,
                date: request.date,
                time: request.time,
                status,
                expected_duration: request.expected_duration.unwrap_or(DEFAULT_EXPECTED_DURATION),
                elapsed_time: 0,
                estimated_wait_time,
                queue_position: 0,
            };
            state.next_id += 1;
            state.appointments.push(appointment);

            if self.reconcile_queue {
                reconcile_queue_positions(&mut state.appointments);
            }
            let last = state.appointments.len() - 1;
            state.appointments[last].clone()
        };

        info!("Created appointment {} with status {}", appointment.id, appointment.status);
        self.publish(TrackerEvent::Created { appointment_id: appointment.id });
        Ok(appointment)
    }

    /// Deletes a record. Unconfirmed deletions are refused without touching
    /// the collection.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: AppointmentId, confirmed: bool) -> Result<Appointment, AppointmentError> {
        if !confirmed {
            warn!("Deletion of appointment {} not confirmed", id);
            return Err(AppointmentError::DeletionNotConfirmed(id));
        }

        let removed = {
            let mut state = self.state.write().await;
            remove_by_id(&mut state.appointments, id).ok_or(AppointmentError::NotFound(id))?
        };

        info!("Deleted appointment {}", id);
        self.publish(TrackerEvent::Deleted { appointment_id: id });
        Ok(removed)
    }

    /// Sets any status regardless of the current one. Timing fields are left
    /// exactly as they are.
    #[instrument(skip(self))]
    pub async fn override_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        let (updated, transition) = {
            let mut state = self.state.write().await;
            let appointment = state
                .appointments
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or(AppointmentError::NotFound(id))?;

            let transition = StatusTransition {
                appointment_id: id,
                from: appointment.status,
                to: status,
            };
            appointment.status = status;
            (appointment.clone(), transition)
        };

        info!("Appointment {} manually set {} -> {}", id, transition.from, transition.to);
        self.publish(TrackerEvent::StatusOverridden(transition));
        Ok(updated)
    }

    pub async fn mark_complete(&self, id: AppointmentId) -> Result<Appointment, AppointmentError> {
        self.override_status(id, AppointmentStatus::Completed).await
    }

    /// Runs one simulation tick over every record.
    pub async fn tick<R: Rng + ?Sized>(&self, rng: &mut R) -> TickReport {
        let report = {
            let mut state = self.state.write().await;
            let (mut changed, transitions) = advance_all(&self.lifecycle, &mut state.appointments, rng);
            if self.reconcile_queue {
                let positions: Vec<u32> = state.appointments.iter().map(|a| a.queue_position).collect();
                reconcile_queue_positions(&mut state.appointments);
                for (index, appointment) in state.appointments.iter().enumerate() {
                    if appointment.queue_position != positions[index] {
                        changed[index] = true;
                    }
                }
            }
            let updated = changed.iter().filter(|c| **c).count();
            state.ticks += 1;
            TickReport {
                tick: state.ticks,
                updated,
                transitions,
            }
        };

        debug!(
            "Tick {} updated {} appointments ({} transitions)",
            report.tick,
            report.updated,
            report.transitions.len()
        );
        self.publish(TrackerEvent::Ticked(report.clone()));
        report
    }

    pub async fn stats(&self, filter: &AppointmentFilter) -> DashboardStats {
        compute_stats(&self.list(filter).await)
    }

    pub async fn queue_board(&self, filter: &AppointmentFilter) -> Vec<DoctorQueue> {
        queue_board(&self.list(filter).await)
    }

    pub async fn export_csv(&self, filter: &AppointmentFilter) -> String {
        export_csv(&self.list(filter).await)
    }
}
