//! Per-flight serialization. Every operation that touches a flight's
//! seat counter holds that flight's mutex for the whole
//! read-modify-write sequence; locks for distinct flights are
//! independent, so bookings on different flights never contend.

use crate::utils::error::{AppError, AppResult};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::{sleep, timeout};

const DEFAULT_WAIT: Duration = Duration::from_millis(500);
const DEFAULT_ATTEMPTS: u32 = 4;

pub struct FlightLockRegistry {
    locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
    wait: Duration,
    attempts: u32,
}

impl Default for FlightLockRegistry {
    fn default() -> Self {
        Self::with_budget(DEFAULT_WAIT, DEFAULT_ATTEMPTS)
    }
}

impl FlightLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(wait: Duration, attempts: u32) -> Self {
        FlightLockRegistry {
            locks: Mutex::new(HashMap::new()),
            wait,
            attempts,
        }
    }

    async fn handle(&self, flight_id: i64) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(flight_id).or_default().clone()
    }

    /// Acquire the flight's lock with a bounded wait. Exhausting the
    /// budget surfaces `Busy`, never `InsufficientInventory`.
    pub async fn acquire(&self, flight_id: i64) -> AppResult<OwnedMutexGuard<()>> {
        let handle = self.handle(flight_id).await;

        for attempt in 1..=self.attempts {
            match timeout(self.wait, handle.clone().lock_owned()).await {
                Ok(guard) => return Ok(guard),
                Err(_) if attempt < self.attempts => {
                    let jitter_ms = {
                        let mut rng = rand::thread_rng();
                        rng.gen_range(2..20)
                    };
                    sleep(Duration::from_millis(jitter_ms)).await;
                }
                Err(_) => {}
            }
        }

        Err(AppError::Busy(format!(
            "flight {flight_id} is under heavy contention"
        )))
    }
}
