// libs/appointment-cell/src/services/simulation.rs
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::services::tracker::AppointmentTracker;

/// Drives the tracker on a fixed period from a single task.
///
/// Ticks never overlap: each one finishes before the next interval is awaited.
pub struct SimulationService {
    tracker: Arc<AppointmentTracker>,
    period: Duration,
    seed: Option<u64>,
}

impl SimulationService {
    pub fn new(tracker: Arc<AppointmentTracker>, period: Duration) -> Self {
        Self {
            tracker,
            period,
            seed: None,
        }
    }

    /// Fixes the random source so runs can be replayed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn spawn(self) -> SimulationHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(shutdown_rx));
        SimulationHandle { shutdown_tx, task }
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) -> u64 {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of an interval completes immediately
        interval.tick().await;

        info!("Appointment simulation started (period {:?})", self.period);
        let mut ticks = 0u64;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let report = self.tracker.tick(&mut rng).await;
                    ticks += 1;
                    if !report.transitions.is_empty() {
                        debug!("Simulation tick {} moved {} appointments", report.tick, report.transitions.len());
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        warn!("Simulation handle dropped without stop, ending simulation");
                    }
                    break;
                }
            }
        }

        info!("Appointment simulation stopped after {} ticks", ticks);
        ticks
    }
}

pub struct SimulationHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<u64>,
}

impl SimulationHandle {
    /// Signals the task to stop and waits for it. Returns the number of ticks it ran.
    pub async fn stop(self) -> u64 {
        let _ = self.shutdown_tx.send(true);
        match self.task.await {
            Ok(ticks) => ticks,
            Err(e) => {
                warn!("Simulation task ended abnormally: {}", e);
                0
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
