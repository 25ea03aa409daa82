// libs/appointment-cell/src/services/lifecycle.rs
use rand::Rng;
use tracing::debug;

use crate::models::{Appointment, AppointmentStatus, AppointmentError, StatusTransition};

/// Tunables for the simulated clinic flow.
///
/// Chances are per record, per tick. Ranges are inclusive minute amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRules {
    pub confirm_chance: f64,
    pub check_in_chance: f64,
    pub waiting_room_chance: f64,
    pub call_in_chance: f64,
    pub completion_chance: f64,
    /// Fixed wait reduction applied when a patient arrives or moves to the waiting room.
    pub arrival_wait_reduction: u32,
    pub check_in_drift: (u32, u32),
    pub waiting_decrement: (u32, u32),
    /// Waiting-room patients are only called in once their wait is at or below this.
    pub call_in_threshold: u32,
    /// Consultation minutes accrued per tick.
    pub minutes_per_tick: u32,
}

impl Default for SimulationRules {
    fn default() -> Self {
        Self {
            confirm_chance: 0.1,
            check_in_chance: 0.1,
            waiting_room_chance: 0.7,
            call_in_chance: 0.3,
            completion_chance: 0.3,
            arrival_wait_reduction: 5,
            check_in_drift: (0, 2),
            waiting_decrement: (1, 3),
            call_in_threshold: 5,
            minutes_per_tick: 1,
        }
    }
}

impl SimulationRules {
    pub fn validate(&self) -> Result<(), AppointmentError> {
        let chances = [
            ("confirm_chance", self.confirm_chance),
            ("check_in_chance", self.check_in_chance),
            ("waiting_room_chance", self.waiting_room_chance),
            ("call_in_chance", self.call_in_chance),
            ("completion_chance", self.completion_chance),
        ];
        for (name, p) in chances {
            if !(0.0..=1.0).contains(&p) {
                return Err(AppointmentError::ValidationError(format!(
                    "{} must be between 0 and 1, got {}",
                    name, p
                )));
            }
        }

        for (name, (min, max)) in [
            ("check_in_drift", self.check_in_drift),
            ("waiting_decrement", self.waiting_decrement),
        ] {
            if min > max {
                return Err(AppointmentError::ValidationError(format!(
                    "{} range is empty ({}..={})",
                    name, min, max
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Guard {
    Always,
    WaitAtMost(u32),
    WaitAbove(u32),
    /// The next accrued minute reaches the expected duration.
    ConsultationDue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    Always,
    Chance(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    ReduceWait(u32),
    ReduceWaitBetween(u32, u32),
    ClearWait,
    ClearQueue,
    AccrueConsultation(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRule {
    pub from: AppointmentStatus,
    pub guard: Guard,
    pub trigger: Trigger,
    pub to: Option<AppointmentStatus>,
    pub effects: Vec<Effect>,
}

impl TransitionRule {
    fn new(from: AppointmentStatus, guard: Guard, trigger: Trigger, to: Option<AppointmentStatus>, effects: Vec<Effect>) -> Self {
        Self { from, guard, trigger, to, effects }
    }
}

/// Outcome of running one tick against a single record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    pub changed: bool,
    pub transition: Option<StatusTransition>,
}

/// Table-driven appointment state machine.
///
/// Each status owns an ordered list of rules. Per tick the first rule whose
/// guard holds and whose trigger fires is applied; nothing else runs for that
/// record in the same tick.
#[derive(Debug, Clone)]
pub struct AppointmentLifecycleService {
    rules: SimulationRules,
    table: Vec<TransitionRule>,
}

impl Default for AppointmentLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        let rules = SimulationRules::default();
        let table = Self::build_table(&rules);
        Self { rules, table }
    }

    /// Builds the table from custom tunables. Chances outside 0..=1 (NaN
    /// included) and empty ranges are rejected.
    pub fn with_rules(rules: SimulationRules) -> Result<Self, AppointmentError> {
        rules.validate()?;
        let table = Self::build_table(&rules);
        Ok(Self { rules, table })
    }

    pub fn rules(&self) -> &SimulationRules {
        &self.rules
    }

    pub fn table(&self) -> &[TransitionRule] {
        &self.table
    }

    fn build_table(rules: &SimulationRules) -> Vec<TransitionRule> {
        use AppointmentStatus::*;

        let (drift_min, drift_max) = rules.check_in_drift;
        let (wait_min, wait_max) = rules.waiting_decrement;

        vec![
            TransitionRule::new(Scheduled, Guard::Always, Trigger::Chance(rules.confirm_chance), Some(Confirmed), vec![]),
            TransitionRule::new(
                Confirmed,
                Guard::Always,
                Trigger::Chance(rules.check_in_chance),
                Some(CheckedIn),
                vec![Effect::ReduceWait(rules.arrival_wait_reduction)],
            ),
            TransitionRule::new(
                CheckedIn,
                Guard::Always,
                Trigger::Chance(rules.waiting_room_chance),
                Some(InWaitingRoom),
                vec![Effect::ReduceWait(rules.arrival_wait_reduction)],
            ),
            TransitionRule::new(
                CheckedIn,
                Guard::Always,
                Trigger::Always,
                None,
                vec![Effect::ReduceWaitBetween(drift_min, drift_max)],
            ),
            TransitionRule::new(
                InWaitingRoom,
                Guard::WaitAtMost(rules.call_in_threshold),
                Trigger::Chance(rules.call_in_chance),
                Some(WithDoctor),
                vec![Effect::ClearWait, Effect::ClearQueue],
            ),
            TransitionRule::new(
                InWaitingRoom,
                Guard::WaitAbove(0),
                Trigger::Always,
                None,
                vec![Effect::ReduceWaitBetween(wait_min, wait_max)],
            ),
            TransitionRule::new(
                WithDoctor,
                Guard::ConsultationDue,
                Trigger::Chance(rules.completion_chance),
                Some(Completed),
                vec![Effect::AccrueConsultation(rules.minutes_per_tick), Effect::ClearWait],
            ),
            TransitionRule::new(
                WithDoctor,
                Guard::Always,
                Trigger::Always,
                None,
                vec![Effect::AccrueConsultation(rules.minutes_per_tick)],
            ),
        ]
    }

    /// Rules that apply to `status`, in evaluation order.
    pub fn rules_for(&self, status: AppointmentStatus) -> impl Iterator<Item = &TransitionRule> {
        self.table.iter().filter(move |rule| rule.from == status)
    }

    /// Advances one record by a single tick.
    pub fn step<R: Rng + ?Sized>(&self, appointment: &mut Appointment, rng: &mut R) -> StepOutcome {
        if appointment.status.is_terminal() {
            return StepOutcome::default();
        }

        let rule = self
            .rules_for(appointment.status)
            .find(|rule| self.guard_holds(rule.guard, appointment) && Self::fires(rule.trigger, rng));

        let Some(rule) = rule else {
            return StepOutcome::default();
        };

        let before = appointment.clone();
        for effect in &rule.effects {
            Self::apply(*effect, appointment, rng);
        }

        let transition = rule.to.map(|to| {
            appointment.status = to;
            debug!("Appointment {} moved {} -> {}", appointment.id, before.status, to);
            StatusTransition {
                appointment_id: appointment.id,
                from: before.status,
                to,
            }
        });

        StepOutcome {
            changed: *appointment != before,
            transition,
        }
    }

    fn guard_holds(&self, guard: Guard, appointment: &Appointment) -> bool {
        match guard {
            Guard::Always => true,
            Guard::WaitAtMost(limit) => appointment.estimated_wait_time <= limit,
            Guard::WaitAbove(limit) => appointment.estimated_wait_time > limit,
            Guard::ConsultationDue => {
                appointment.elapsed_time.saturating_add(self.rules.minutes_per_tick) >= appointment.expected_duration
            }
        }
    }

    fn fires<R: Rng + ?Sized>(trigger: Trigger, rng: &mut R) -> bool {
        match trigger {
            Trigger::Always => true,
            Trigger::Chance(p) => rng.gen_bool(p.clamp(0.0, 1.0)),
        }
    }

    fn apply<R: Rng + ?Sized>(effect: Effect, appointment: &mut Appointment, rng: &mut R) {
        match effect {
            Effect::ReduceWait(minutes) => {
                appointment.estimated_wait_time = appointment.estimated_wait_time.saturating_sub(minutes);
            }
            Effect::ReduceWaitBetween(min, max) => {
                let minutes = if min >= max { min } else { rng.gen_range(min..=max) };
                appointment.estimated_wait_time = appointment.estimated_wait_time.saturating_sub(minutes);
            }
            Effect::ClearWait => appointment.estimated_wait_time = 0,
            Effect::ClearQueue => appointment.queue_position = 0,
            Effect::AccrueConsultation(minutes) => {
                appointment.elapsed_time = appointment.elapsed_time.saturating_add(minutes);
            }
        }
    }
}
