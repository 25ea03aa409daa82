use std::sync::Arc;
use std::time::Duration;

use appointment_cell::models::{AppointmentStatus, TrackerEvent};
use appointment_cell::services::lifecycle::AppointmentLifecycleService;
use appointment_cell::services::simulation::SimulationService;
use appointment_cell::services::tracker::AppointmentTracker;

mod common;
use common::{appointment, certain_rules};

#[tokio::test]
async fn test_simulation_ticks_until_stopped() {
    let tracker = Arc::new(AppointmentTracker::with_appointments(
        AppointmentLifecycleService::new(),
        true,
        vec![appointment(1, AppointmentStatus::WithDoctor)],
    ));

    let handle = SimulationService::new(tracker.clone(), Duration::from_millis(10))
        .with_seed(Some(7))
        .spawn();

    tokio::time::sleep(Duration::from_millis(120)).await;
    let ticks = handle.stop().await;

    assert!(ticks > 0, "simulation should have ticked at least once");
    assert_eq!(tracker.tick_count().await, ticks);

    // Nothing moves once the task is gone
    let frozen = tracker.snapshot().await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(tracker.snapshot().await, frozen);
}

#[tokio::test]
async fn test_simulation_publishes_tick_events() {
    let tracker = Arc::new(AppointmentTracker::with_appointments(
        AppointmentLifecycleService::with_rules(certain_rules()).unwrap(),
        true,
        vec![appointment(1, AppointmentStatus::Scheduled)],
    ));
    let mut events = tracker.subscribe();

    let handle = SimulationService::new(tracker.clone(), Duration::from_millis(5))
        .with_seed(Some(1))
        .spawn();

    let event = tokio::time::timeout(Duration::from_secs(2), events.recv())
        .await
        .expect("a tick should arrive")
        .expect("channel open");
    handle.stop().await;

    match event {
        TrackerEvent::Ticked(report) => {
            assert_eq!(report.tick, 1);
            assert_eq!(report.transitions.len(), 1);
            assert_eq!(report.transitions[0].to, AppointmentStatus::Confirmed);
        }
        other => panic!("expected a tick event, got {:?}", other),
    }
}

#[tokio::test]
async fn test_stop_before_first_tick() {
    let tracker = Arc::new(AppointmentTracker::new(AppointmentLifecycleService::new(), true));

    let handle = SimulationService::new(tracker.clone(), Duration::from_secs(3600)).spawn();
    assert!(!handle.is_finished());

    assert_eq!(handle.stop().await, 0);
    assert_eq!(tracker.tick_count().await, 0);
}
