use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_TICK_MS: u64 = 3000;
pub const DEFAULT_PROFILE_STORE_PATH: &str = ".clinic/session.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub simulation_enabled: bool,
    pub simulation_tick_ms: u64,
    pub simulation_seed: Option<u64>,
    pub reconcile_queue: bool,
    pub seed_demo_data: bool,
    pub profile_store_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            simulation_enabled: true,
            simulation_tick_ms: DEFAULT_TICK_MS,
            simulation_seed: None,
            reconcile_queue: true,
            seed_demo_data: true,
            profile_store_path: PathBuf::from(DEFAULT_PROFILE_STORE_PATH),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| {
                    warn!("BIND_ADDRESS not set, using default");
                    defaults.bind_address.clone()
                }),
            simulation_enabled: parse_var("SIMULATION_ENABLED", defaults.simulation_enabled),
            simulation_tick_ms: parse_var("SIMULATION_TICK_MS", defaults.simulation_tick_ms),
            simulation_seed: env::var("SIMULATION_SEED")
                .ok()
                .and_then(|raw| parse_value("SIMULATION_SEED", &raw)),
            reconcile_queue: parse_var("RECONCILE_QUEUE", defaults.reconcile_queue),
            seed_demo_data: parse_var("SEED_DEMO_DATA", defaults.seed_demo_data),
            profile_store_path: env::var("PROFILE_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("PROFILE_STORE_PATH not set, using default");
                    defaults.profile_store_path.clone()
                }),
        };

        if config.simulation_tick_ms == 0 {
            warn!("SIMULATION_TICK_MS must be positive, simulation will use the default period");
        }

        config
    }

    /// Tick period for the simulation task. A zero period falls back to the default.
    pub fn tick_interval(&self) -> Duration {
        match self.simulation_tick_ms {
            0 => Duration::from_millis(DEFAULT_TICK_MS),
            ms => Duration::from_millis(ms),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw).unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Option<T> {
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("{} has invalid value '{}', using default", name, raw);
            None
        }
    }
}
