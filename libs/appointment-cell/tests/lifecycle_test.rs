use rand::rngs::StdRng;
use rand::SeedableRng;

use appointment_cell::models::AppointmentStatus;
use appointment_cell::services::lifecycle::{AppointmentLifecycleService, SimulationRules};
use appointment_cell::services::tracker::advance_all;

mod common;
use common::{appointment, certain_rules, stalled_rules};

#[test]
fn test_with_doctor_accrues_exactly_one_minute_per_tick() {
    let service = AppointmentLifecycleService::new();

    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut record = appointment(1, AppointmentStatus::WithDoctor);
        record.expected_duration = 10_000;
        record.elapsed_time = 7;

        for _ in 0..200 {
            let before = record.elapsed_time;
            service.step(&mut record, &mut rng);
            assert_eq!(record.elapsed_time, before + 1);
            assert_eq!(record.status, AppointmentStatus::WithDoctor);
        }
    }
}

#[test]
fn test_completion_tick_still_accrues_the_minute() {
    let service = AppointmentLifecycleService::with_rules(certain_rules()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let mut record = appointment(1, AppointmentStatus::WithDoctor);
    record.elapsed_time = 29;
    record.expected_duration = 30;
    record.estimated_wait_time = 4;

    let outcome = service.step(&mut record, &mut rng);

    assert_eq!(record.status, AppointmentStatus::Completed);
    assert_eq!(record.elapsed_time, 30);
    assert_eq!(record.estimated_wait_time, 0);
    let transition = outcome.transition.expect("completion should be reported");
    assert_eq!(transition.from, AppointmentStatus::WithDoctor);
    assert_eq!(transition.to, AppointmentStatus::Completed);
}

#[test]
fn test_consultation_not_completed_before_expected_duration() {
    let service = AppointmentLifecycleService::with_rules(certain_rules()).unwrap();
    let mut rng = StdRng::seed_from_u64(2);

    let mut record = appointment(1, AppointmentStatus::WithDoctor);
    record.elapsed_time = 10;
    record.expected_duration = 30;

    service.step(&mut record, &mut rng);

    assert_eq!(record.status, AppointmentStatus::WithDoctor);
    assert_eq!(record.elapsed_time, 11);
}

#[test]
fn test_terminal_statuses_are_never_touched() {
    let service = AppointmentLifecycleService::with_rules(certain_rules()).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    for status in [AppointmentStatus::Completed, AppointmentStatus::Cancelled, AppointmentStatus::NoShow] {
        let mut record = appointment(1, status);
        record.estimated_wait_time = 12;
        record.queue_position = 3;
        record.elapsed_time = 5;
        let original = record.clone();

        for _ in 0..50 {
            let outcome = service.step(&mut record, &mut rng);
            assert!(!outcome.changed);
            assert!(outcome.transition.is_none());
        }
        assert_eq!(record, original);
    }
}

#[test]
fn test_in_progress_is_idle_under_simulation() {
    let service = AppointmentLifecycleService::with_rules(certain_rules()).unwrap();
    let mut rng = StdRng::seed_from_u64(4);

    let mut record = appointment(1, AppointmentStatus::InProgress);
    record.estimated_wait_time = 9;
    let original = record.clone();

    service.step(&mut record, &mut rng);
    assert_eq!(record, original);
}

#[test]
fn test_forward_progression_with_certain_triggers() {
    let service = AppointmentLifecycleService::with_rules(certain_rules()).unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    let mut record = appointment(1, AppointmentStatus::Scheduled);
    record.estimated_wait_time = 14;
    record.expected_duration = 1;

    let mut seen = vec![record.status];
    for _ in 0..10 {
        service.step(&mut record, &mut rng);
        if seen.last() != Some(&record.status) {
            seen.push(record.status);
        }
    }

    assert_eq!(
        seen,
        vec![
            AppointmentStatus::Scheduled,
            AppointmentStatus::Confirmed,
            AppointmentStatus::CheckedIn,
            AppointmentStatus::InWaitingRoom,
            AppointmentStatus::WithDoctor,
            AppointmentStatus::Completed,
        ]
    );
}

#[test]
fn test_one_transition_per_tick() {
    let service = AppointmentLifecycleService::with_rules(certain_rules()).unwrap();
    let mut rng = StdRng::seed_from_u64(6);

    let mut record = appointment(1, AppointmentStatus::Scheduled);
    service.step(&mut record, &mut rng);
    assert_eq!(record.status, AppointmentStatus::Confirmed);
    service.step(&mut record, &mut rng);
    assert_eq!(record.status, AppointmentStatus::CheckedIn);
}

#[test]
fn test_arrival_reduces_wait_by_fixed_amount() {
    let service = AppointmentLifecycleService::with_rules(certain_rules()).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    let mut record = appointment(1, AppointmentStatus::Confirmed);
    record.estimated_wait_time = 30;
    service.step(&mut record, &mut rng);
    assert_eq!(record.status, AppointmentStatus::CheckedIn);
    assert_eq!(record.estimated_wait_time, 25);

    service.step(&mut record, &mut rng);
    assert_eq!(record.status, AppointmentStatus::InWaitingRoom);
    assert_eq!(record.estimated_wait_time, 20);
}

#[test]
fn test_wait_reduction_floors_at_zero() {
    let service = AppointmentLifecycleService::with_rules(certain_rules()).unwrap();
    let mut rng = StdRng::seed_from_u64(8);

    let mut record = appointment(1, AppointmentStatus::CheckedIn);
    record.estimated_wait_time = 3;
    service.step(&mut record, &mut rng);

    assert_eq!(record.status, AppointmentStatus::InWaitingRoom);
    assert_eq!(record.estimated_wait_time, 0);
}

#[test]
fn test_checked_in_drift_without_transition() {
    let service = AppointmentLifecycleService::with_rules(stalled_rules()).unwrap();
    let mut rng = StdRng::seed_from_u64(9);

    let mut record = appointment(1, AppointmentStatus::CheckedIn);
    record.estimated_wait_time = 10;
    let outcome = service.step(&mut record, &mut rng);

    assert_eq!(record.status, AppointmentStatus::CheckedIn);
    assert_eq!(record.estimated_wait_time, 9);
    assert!(outcome.changed);
    assert!(outcome.transition.is_none());
}

#[test]
fn test_waiting_room_counts_down_until_called() {
    let service = AppointmentLifecycleService::with_rules(certain_rules()).unwrap();
    let mut rng = StdRng::seed_from_u64(10);

    let mut record = appointment(1, AppointmentStatus::InWaitingRoom);
    record.estimated_wait_time = 9;
    record.queue_position = 2;

    // 9 is above the call-in threshold: only the countdown runs
    service.step(&mut record, &mut rng);
    assert_eq!(record.status, AppointmentStatus::InWaitingRoom);
    assert_eq!(record.estimated_wait_time, 7);

    service.step(&mut record, &mut rng);
    assert_eq!(record.estimated_wait_time, 5);

    service.step(&mut record, &mut rng);
    assert_eq!(record.status, AppointmentStatus::WithDoctor);
    assert_eq!(record.estimated_wait_time, 0);
    assert_eq!(record.queue_position, 0);
    assert_eq!(record.elapsed_time, 0);
}

#[test]
fn test_empty_waiting_room_wait_with_no_call_is_noop() {
    let service = AppointmentLifecycleService::with_rules(stalled_rules()).unwrap();
    let mut rng = StdRng::seed_from_u64(11);

    let mut record = appointment(1, AppointmentStatus::InWaitingRoom);
    record.queue_position = 1;
    let original = record.clone();

    let outcome = service.step(&mut record, &mut rng);
    assert!(!outcome.changed);
    assert_eq!(record, original);
}

#[test]
fn test_checked_in_patient_reaches_waiting_room_with_lower_wait() {
    let service = AppointmentLifecycleService::new();

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut record = appointment(1, AppointmentStatus::CheckedIn);
        record.estimated_wait_time = 25;

        let mut ticks = 0;
        while record.status == AppointmentStatus::CheckedIn {
            let before = record.estimated_wait_time;
            service.step(&mut record, &mut rng);
            assert!(record.estimated_wait_time <= before, "wait must never increase");
            ticks += 1;
            assert!(ticks < 1_000, "seed {} never left checked_in", seed);
        }

        assert_eq!(record.status, AppointmentStatus::InWaitingRoom);
        assert!(record.estimated_wait_time <= 20);
    }
}

#[test]
fn test_simulation_is_deterministic_for_a_seed() {
    let service = AppointmentLifecycleService::new();
    let statuses = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::CheckedIn,
        AppointmentStatus::InWaitingRoom,
        AppointmentStatus::WithDoctor,
    ];
    let seed_records: Vec<_> = statuses
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let mut a = appointment(i as u64 + 1, *s);
            a.estimated_wait_time = 20;
            a
        })
        .collect();

    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut records = seed_records.clone();
        for _ in 0..40 {
            advance_all(&service, &mut records, &mut rng);
        }
        records
    };

    assert_eq!(run(42), run(42));
}

#[test]
fn test_default_rules_keep_simulated_flow_forward_only() {
    let service = AppointmentLifecycleService::with_rules(SimulationRules::default()).unwrap();
    let order = |s: AppointmentStatus| match s {
        AppointmentStatus::Scheduled => 0,
        AppointmentStatus::Confirmed => 1,
        AppointmentStatus::CheckedIn => 2,
        AppointmentStatus::InWaitingRoom => 3,
        AppointmentStatus::WithDoctor => 4,
        _ => 5,
    };

    let mut rng = StdRng::seed_from_u64(99);
    let mut record = appointment(1, AppointmentStatus::Scheduled);
    record.estimated_wait_time = 30;
    record.expected_duration = 5;

    for _ in 0..2_000 {
        let before = record.status;
        let elapsed_before = record.elapsed_time;
        service.step(&mut record, &mut rng);
        assert!(order(record.status) >= order(before));
        if before != AppointmentStatus::WithDoctor {
            assert_eq!(record.elapsed_time, elapsed_before, "elapsed time moved outside consultation");
        }
    }
}
